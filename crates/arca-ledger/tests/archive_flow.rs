//! Cross-component flows: upload, record membership, unsorted
//! transitions, blob garbage collection, and the no-lost-append
//! concurrency property.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use arca_catalog::{DocumentCatalog, InMemoryDocumentStore};
use arca_directory::{ArchiveDirectory, InMemoryArchiveStore};
use arca_ledger::{InMemoryRecordStore, RecordLedger};
use arca_registry::{ArchivistRegistry, InMemoryArchivistStore};
use arca_store::{InMemoryObjectStore, ObjectStore};
use arca_types::ContentHash;

struct Harness {
    registry: Arc<ArchivistRegistry>,
    directory: Arc<ArchiveDirectory>,
    catalog: Arc<DocumentCatalog>,
    ledger: Arc<RecordLedger>,
    objects: Arc<InMemoryObjectStore>,
    staging_dir: tempfile::TempDir,
}

fn harness() -> Harness {
    let registry = Arc::new(ArchivistRegistry::new(Arc::new(
        InMemoryArchivistStore::new(),
    )));
    let directory = Arc::new(ArchiveDirectory::new(
        Arc::new(InMemoryArchiveStore::new()),
        Arc::clone(&registry),
    ));
    let objects = Arc::new(InMemoryObjectStore::new());
    let catalog = Arc::new(DocumentCatalog::new(
        Arc::new(InMemoryDocumentStore::new()),
        Arc::clone(&objects) as Arc<dyn ObjectStore>,
        Arc::clone(&directory),
        Arc::clone(&registry),
    ));
    let ledger = Arc::new(RecordLedger::new(
        Arc::new(InMemoryRecordStore::new()),
        Arc::clone(&catalog),
        Arc::clone(&directory),
        Arc::clone(&registry),
    ));

    Harness {
        registry,
        directory,
        catalog,
        ledger,
        objects,
        staging_dir: tempfile::tempdir().unwrap(),
    }
}

impl Harness {
    fn stage(&self, content: &[u8]) -> PathBuf {
        let path = self
            .staging_dir
            .path()
            .join(ContentHash::from_bytes(content).to_hex());
        std::fs::write(&path, content).unwrap();
        path
    }

    fn upload(&self, archive: &str, name: &str, content: &[u8]) -> ContentHash {
        let staging = self.stage(content);
        self.catalog
            .create(
                archive,
                "alice",
                name,
                "text/plain",
                content.len() as u64,
                &staging,
            )
            .unwrap()
            .hash
    }
}

#[test]
fn upload_sort_unsort_scenario() {
    let h = harness();
    h.registry.create("alice").unwrap();
    h.directory.create("lab", "lab notes", "alice").unwrap();

    let hash = h.upload("lab", "notes.txt", b"hello");
    assert_eq!(hash.to_hex(), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
    assert_eq!(h.catalog.get_unsorted("lab").unwrap(), vec![hash]);

    let week1 = h.ledger.create("lab", "week1", "alice").unwrap();
    h.ledger.add_document("lab", &week1.id, hash, "alice").unwrap();
    assert_eq!(h.catalog.get_unsorted("lab").unwrap(), Vec::<ContentHash>::new());

    h.ledger.remove_document_at("lab", &week1.id, 0, "alice").unwrap();
    assert_eq!(h.catalog.get_unsorted("lab").unwrap(), vec![hash]);
}

#[test]
fn document_shared_by_two_records_stays_sorted() {
    let h = harness();
    h.registry.create("alice").unwrap();
    h.directory.create("lab", "", "alice").unwrap();

    let hash = h.upload("lab", "shared.txt", b"shared across records");
    let one = h.ledger.create("lab", "one", "alice").unwrap();
    let two = h.ledger.create("lab", "two", "alice").unwrap();

    h.ledger.add_document("lab", &one.id, hash, "alice").unwrap();
    h.ledger.add_document("lab", &two.id, hash, "alice").unwrap();

    h.ledger.remove_document_at("lab", &one.id, 0, "alice").unwrap();
    assert!(h.catalog.get_unsorted("lab").unwrap().is_empty());
}

#[test]
fn blob_survives_until_last_archive_releases_it() {
    let h = harness();
    h.registry.create("alice").unwrap();
    h.directory.create("lab", "", "alice").unwrap();
    h.directory.create("attic", "", "alice").unwrap();

    let hash = h.upload("lab", "common.txt", b"cross-archive bytes");
    {
        let staging = h.stage(b"cross-archive bytes");
        h.catalog
            .create("attic", "alice", "common.txt", "text/plain", 19, &staging)
            .unwrap();
    }
    assert_eq!(h.objects.len(), 1);

    h.catalog.delete("lab", &hash, "alice").unwrap();
    assert!(h.objects.exists(&hash).unwrap());

    h.catalog.delete("attic", &hash, "alice").unwrap();
    assert!(!h.objects.exists(&hash).unwrap());
}

#[test]
fn concurrent_add_document_loses_no_appends() {
    const WRITERS: usize = 8;
    const APPENDS_PER_WRITER: usize = 10;

    let h = harness();
    h.registry.create("alice").unwrap();
    h.directory.create("lab", "", "alice").unwrap();

    let hash = h.upload("lab", "contended.txt", b"contended");
    let record = h.ledger.create("lab", "contended", "alice").unwrap();

    let handles: Vec<_> = (0..WRITERS)
        .map(|_| {
            let ledger = Arc::clone(&h.ledger);
            let id = record.id;
            thread::spawn(move || {
                for _ in 0..APPENDS_PER_WRITER {
                    ledger.add_document("lab", &id, hash, "alice").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("writer should not panic");
    }

    let stored = h.ledger.get("lab", &record.id).unwrap();
    assert_eq!(stored.documents.len(), WRITERS * APPENDS_PER_WRITER);
    assert_eq!(stored.revision, (WRITERS * APPENDS_PER_WRITER) as u64);
}

#[test]
fn archive_rename_carries_no_content_loss() {
    let h = harness();
    h.registry.create("alice").unwrap();
    h.directory.create("lab", "", "alice").unwrap();
    h.directory.create("attic", "", "alice").unwrap();

    let _hash = h.upload("lab", "notes.txt", b"content stays");

    // Renaming onto a taken name fails and leaves both archives intact.
    let err = h.directory.rename("lab", "attic", "alice").unwrap_err();
    assert!(matches!(
        err,
        arca_directory::DirectoryError::ArchiveAlreadyExists(_)
    ));
    assert!(h.directory.exists("lab").unwrap());
    assert_eq!(h.catalog.get_unsorted("lab").unwrap().len(), 1);
}

#[test]
fn sweep_after_archive_delete_collects_orphans() {
    let h = harness();
    h.registry.create("alice").unwrap();
    h.directory.create("lab", "", "alice").unwrap();

    let hash = h.upload("lab", "doomed.txt", b"doomed");

    // Archive delete does not cascade; the document row survives and the
    // blob is still referenced.
    h.directory.delete("lab", "alice").unwrap();
    assert!(h.objects.exists(&hash).unwrap());
    assert!(h.catalog.sweep_orphans().unwrap().is_empty());
}

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arca_directory::ArchiveDirectory;
use arca_registry::ArchivistRegistry;
use arca_store::ObjectStore;
use arca_types::ContentHash;
use chrono::Utc;
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};
use crate::traits::DocumentStore;
use crate::types::DocumentMeta;

/// The document catalog service.
///
/// Validates referenced archive/archivist existence before any mutation,
/// owns the metadata rows, and drives the object-store lifecycle: dedup on
/// hash at ingest, garbage collection when the last row referencing a
/// hash disappears.
///
/// On delete, the metadata row is removed first and the blob second. A
/// crash between the two steps leaves an unreferenced blob — a safe leak,
/// collected by [`sweep_orphans`](DocumentCatalog::sweep_orphans) — never
/// a row pointing at missing bytes.
pub struct DocumentCatalog {
    documents: Arc<dyn DocumentStore>,
    objects: Arc<dyn ObjectStore>,
    directory: Arc<ArchiveDirectory>,
    registry: Arc<ArchivistRegistry>,
}

impl DocumentCatalog {
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        objects: Arc<dyn ObjectStore>,
        directory: Arc<ArchiveDirectory>,
        registry: Arc<ArchivistRegistry>,
    ) -> Self {
        Self {
            documents,
            objects,
            directory,
            registry,
        }
    }

    /// Check whether a document row exists for `(archive, hash)`.
    pub fn exists(&self, archive: &str, hash: &ContentHash) -> CatalogResult<bool> {
        Ok(self.documents.get(archive, hash)?.is_some())
    }

    /// Ingest a staged upload as a new document in `archive`.
    ///
    /// Fails `ArchiveNotFound`, then `ArchivistNotFound`, then —
    /// after streaming-hashing the staged file — `DocumentAlreadyExists`
    /// if the archive already carries a row for the computed hash (the
    /// staging file is deleted in that case).
    ///
    /// On success the row is inserted `unsorted`, the blob is moved into
    /// the object store (a no-op when another archive's document already
    /// stored the same content), and the creator is appended to the
    /// archive's maintainers.
    pub fn create(
        &self,
        archive: &str,
        creator: &str,
        filename: &str,
        mime_type: &str,
        size: u64,
        staging: &Path,
    ) -> CatalogResult<DocumentMeta> {
        self.directory.get(archive)?;
        let creator = self.registry.get(creator)?;
        debug!(archive, filename, creator = %creator.username, "creating document");

        let hash = ContentHash::from_reader(File::open(staging)?)?;

        if self.documents.get(archive, &hash)?.is_some() {
            std::fs::remove_file(staging)?;
            return Err(CatalogError::DocumentAlreadyExists {
                archive: archive.to_string(),
                hash,
            });
        }

        let meta =
            DocumentMeta::new(archive, hash, filename, mime_type, size, creator.username.clone());
        self.documents.insert(&meta)?;
        self.objects.put_file(&hash, staging)?;
        self.directory.add_maintainer(archive, &creator.username)?;

        Ok(meta)
    }

    /// Fetch a document's metadata row.
    pub fn get_meta(&self, archive: &str, hash: &ContentHash) -> CatalogResult<DocumentMeta> {
        self.directory.get(archive)?;
        self.documents
            .get(archive, hash)?
            .ok_or_else(|| CatalogError::DocumentNotFound {
                archive: archive.to_string(),
                hash: *hash,
            })
    }

    /// Fetch the raw object bytes for a hash.
    ///
    /// `ObjectNotFound` is unreachable while catalog invariants hold;
    /// the check guards against a blob lost out-of-band.
    pub fn get_object_bytes(&self, hash: &ContentHash) -> CatalogResult<Vec<u8>> {
        self.objects
            .get(hash)?
            .ok_or(CatalogError::ObjectNotFound(*hash))
    }

    /// Delete a document row and garbage-collect its blob.
    ///
    /// Fails `ArchiveNotFound`, `ArchivistNotFound`, `DocumentNotFound`.
    /// The blob is deleted only when no row in any archive still
    /// references the hash, decided atomically with the row removal.
    pub fn delete(&self, archive: &str, hash: &ContentHash, archivist: &str) -> CatalogResult<()> {
        self.directory.get(archive)?;
        let archivist = self.registry.get(archivist)?;
        debug!(archive, hash = %hash.short_hex(), archivist = %archivist.username, "deleting document");

        let (_, remaining) = self
            .documents
            .remove_counting_refs(archive, hash)?
            .ok_or_else(|| CatalogError::DocumentNotFound {
                archive: archive.to_string(),
                hash: *hash,
            })?;

        if remaining == 0 {
            self.objects.delete(hash)?;
        }

        self.directory.add_maintainer(archive, &archivist.username)?;
        Ok(())
    }

    /// Rename a document. Appends the actor to the document's and the
    /// archive's maintainer lists.
    pub fn rename(
        &self,
        archive: &str,
        hash: &ContentHash,
        new_name: &str,
        archivist: &str,
    ) -> CatalogResult<()> {
        self.directory.get(archive)?;
        let archivist = self.registry.get(archivist)?;
        let mut meta =
            self.documents
                .get(archive, hash)?
                .ok_or_else(|| CatalogError::DocumentNotFound {
                    archive: archive.to_string(),
                    hash: *hash,
                })?;
        debug!(archive, hash = %hash.short_hex(), new_name, "renaming document");

        meta.name = new_name.to_string();
        if !meta.has_maintainer(&archivist.username) {
            meta.maintainers.push(archivist.username.clone());
        }
        meta.updated_at = Utc::now();
        self.documents.update(&meta)?;
        self.directory.add_maintainer(archive, &archivist.username)?;
        Ok(())
    }

    /// Hashes of documents in `archive` that belong to zero records.
    pub fn get_unsorted(&self, archive: &str) -> CatalogResult<Vec<ContentHash>> {
        self.directory.get(archive)?;
        self.documents.list_unsorted(archive)
    }

    /// Flip the unsorted flag on a document.
    ///
    /// Internal: invoked by the record ledger when a document's record
    /// membership crosses 0↔1.
    pub fn set_unsorted(
        &self,
        archive: &str,
        hash: &ContentHash,
        unsorted: bool,
    ) -> CatalogResult<()> {
        self.directory.get(archive)?;
        if !self.documents.set_unsorted(archive, hash, unsorted)? {
            return Err(CatalogError::DocumentNotFound {
                archive: archive.to_string(),
                hash: *hash,
            });
        }
        Ok(())
    }

    /// All document rows in `archive`.
    pub fn list(&self, archive: &str) -> CatalogResult<Vec<DocumentMeta>> {
        self.directory.get(archive)?;
        self.documents.list_by_archive(archive)
    }

    /// Delete every stored blob that no document row references, and
    /// return the swept hashes.
    ///
    /// Recovery path for blobs leaked by a crash between row removal and
    /// blob delete, or left behind by a non-cascading archive delete.
    pub fn sweep_orphans(&self) -> CatalogResult<Vec<ContentHash>> {
        let mut swept = Vec::new();
        for hash in self.objects.list()? {
            if self.documents.count_by_hash(&hash)? == 0 {
                self.objects.delete(&hash)?;
                swept.push(hash);
            }
        }
        if !swept.is_empty() {
            debug!(count = swept.len(), "swept orphaned objects");
        }
        Ok(swept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryDocumentStore;
    use arca_directory::{DirectoryError, InMemoryArchiveStore};
    use arca_registry::{InMemoryArchivistStore, RegistryError};
    use arca_store::InMemoryObjectStore;
    use std::path::PathBuf;

    struct Fixture {
        catalog: DocumentCatalog,
        directory: Arc<ArchiveDirectory>,
        objects: Arc<InMemoryObjectStore>,
        staging_dir: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let registry = Arc::new(ArchivistRegistry::new(Arc::new(
            InMemoryArchivistStore::new(),
        )));
        registry.create("alice").unwrap();
        registry.create("bob").unwrap();

        let directory = Arc::new(ArchiveDirectory::new(
            Arc::new(InMemoryArchiveStore::new()),
            Arc::clone(&registry),
        ));
        directory.create("lab", "", "alice").unwrap();
        directory.create("attic", "", "alice").unwrap();

        let objects = Arc::new(InMemoryObjectStore::new());
        let catalog = DocumentCatalog::new(
            Arc::new(InMemoryDocumentStore::new()),
            Arc::clone(&objects) as Arc<dyn ObjectStore>,
            Arc::clone(&directory),
            registry,
        );

        Fixture {
            catalog,
            directory,
            objects,
            staging_dir: tempfile::tempdir().unwrap(),
        }
    }

    impl Fixture {
        fn stage(&self, content: &[u8]) -> PathBuf {
            let path = self
                .staging_dir
                .path()
                .join(format!("upload-{}", ContentHash::from_bytes(content).short_hex()));
            std::fs::write(&path, content).unwrap();
            path
        }

        fn create(&self, archive: &str, content: &[u8]) -> CatalogResult<DocumentMeta> {
            let staging = self.stage(content);
            self.catalog.create(
                archive,
                "alice",
                "notes.txt",
                "text/plain",
                content.len() as u64,
                &staging,
            )
        }
    }

    #[test]
    fn create_inserts_unsorted_row_and_stores_blob() {
        let fx = fixture();
        let meta = fx.create("lab", b"hello").unwrap();

        assert_eq!(meta.hash.to_hex(), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
        assert!(meta.unsorted);
        assert!(fx.catalog.exists("lab", &meta.hash).unwrap());
        assert_eq!(fx.catalog.get_unsorted("lab").unwrap(), vec![meta.hash]);
        assert_eq!(fx.catalog.get_object_bytes(&meta.hash).unwrap(), b"hello");
    }

    #[test]
    fn create_appends_creator_to_archive_maintainers() {
        let fx = fixture();
        let staging = fx.stage(b"by bob");
        fx.catalog
            .create("lab", "bob", "b.txt", "text/plain", 6, &staging)
            .unwrap();

        let archive = fx.directory.get("lab").unwrap();
        assert!(archive.has_maintainer("bob"));
    }

    #[test]
    fn create_in_unknown_archive_fails_first() {
        let fx = fixture();
        let staging = fx.stage(b"data");
        let err = fx
            .catalog
            .create("nowhere", "ghost", "d.txt", "text/plain", 4, &staging)
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Directory(DirectoryError::ArchiveNotFound(_))
        ));
    }

    #[test]
    fn create_with_unknown_creator_fails() {
        let fx = fixture();
        let staging = fx.stage(b"data");
        let err = fx
            .catalog
            .create("lab", "ghost", "d.txt", "text/plain", 4, &staging)
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Registry(RegistryError::ArchivistNotFound(_))
        ));
    }

    #[test]
    fn duplicate_content_in_same_archive_is_rejected_and_staging_removed() {
        let fx = fixture();
        fx.create("lab", b"same bytes").unwrap();

        let staging = fx.stage(b"same bytes");
        let err = fx
            .catalog
            .create("lab", "alice", "again.txt", "text/plain", 10, &staging)
            .unwrap_err();
        assert!(matches!(err, CatalogError::DocumentAlreadyExists { .. }));
        assert!(!staging.exists());
    }

    #[test]
    fn same_content_across_archives_shares_one_blob() {
        let fx = fixture();
        let first = fx.create("lab", b"shared").unwrap();
        let second = fx.create("attic", b"shared").unwrap();

        assert_eq!(first.hash, second.hash);
        assert_eq!(fx.objects.len(), 1);
    }

    #[test]
    fn delete_last_reference_collects_blob() {
        let fx = fixture();
        let meta = fx.create("lab", b"solo").unwrap();

        fx.catalog.delete("lab", &meta.hash, "bob").unwrap();
        assert!(!fx.catalog.exists("lab", &meta.hash).unwrap());
        assert!(!fx.objects.exists(&meta.hash).unwrap());

        // Deleting archivist became an archive maintainer.
        assert!(fx.directory.get("lab").unwrap().has_maintainer("bob"));
    }

    #[test]
    fn delete_keeps_blob_while_another_archive_references_it() {
        let fx = fixture();
        let meta = fx.create("lab", b"shared").unwrap();
        fx.create("attic", b"shared").unwrap();

        fx.catalog.delete("lab", &meta.hash, "alice").unwrap();
        assert!(fx.objects.exists(&meta.hash).unwrap());

        fx.catalog.delete("attic", &meta.hash, "alice").unwrap();
        assert!(!fx.objects.exists(&meta.hash).unwrap());
    }

    #[test]
    fn delete_missing_document_fails() {
        let fx = fixture();
        let hash = ContentHash::from_bytes(b"never uploaded");
        let err = fx.catalog.delete("lab", &hash, "alice").unwrap_err();
        assert!(matches!(err, CatalogError::DocumentNotFound { .. }));
    }

    #[test]
    fn rename_updates_name_and_maintainers() {
        let fx = fixture();
        let meta = fx.create("lab", b"renameme").unwrap();

        fx.catalog.rename("lab", &meta.hash, "better.txt", "bob").unwrap();

        let fetched = fx.catalog.get_meta("lab", &meta.hash).unwrap();
        assert_eq!(fetched.name, "better.txt");
        assert_eq!(fetched.maintainers, vec!["alice", "bob"]);
    }

    #[test]
    fn get_object_bytes_for_missing_blob_fails() {
        let fx = fixture();
        let hash = ContentHash::from_bytes(b"no blob");
        let err = fx.catalog.get_object_bytes(&hash).unwrap_err();
        assert!(matches!(err, CatalogError::ObjectNotFound(_)));
    }

    #[test]
    fn set_unsorted_flips_listing() {
        let fx = fixture();
        let meta = fx.create("lab", b"flag").unwrap();

        fx.catalog.set_unsorted("lab", &meta.hash, false).unwrap();
        assert!(fx.catalog.get_unsorted("lab").unwrap().is_empty());

        fx.catalog.set_unsorted("lab", &meta.hash, true).unwrap();
        assert_eq!(fx.catalog.get_unsorted("lab").unwrap(), vec![meta.hash]);
    }

    #[test]
    fn sweep_orphans_removes_unreferenced_blobs_only() {
        let fx = fixture();
        let kept = fx.create("lab", b"kept").unwrap();

        // A blob with no metadata row, as a crash between row removal and
        // blob delete would leave behind.
        let orphan = ContentHash::from_bytes(b"orphan");
        fx.objects.put_bytes(&orphan, b"orphan").unwrap();

        let swept = fx.catalog.sweep_orphans().unwrap();
        assert_eq!(swept, vec![orphan]);
        assert!(fx.objects.exists(&kept.hash).unwrap());
        assert!(!fx.objects.exists(&orphan).unwrap());
    }
}

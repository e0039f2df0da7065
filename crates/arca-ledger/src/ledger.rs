use std::sync::Arc;

use arca_catalog::DocumentCatalog;
use arca_directory::ArchiveDirectory;
use arca_registry::ArchivistRegistry;
use arca_types::{ContentHash, RecordId};
use chrono::Utc;
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::traits::RecordStore;
use crate::types::Record;

/// The record ledger service.
///
/// Owns list-splice semantics, tag set semantics, maintainer bookkeeping,
/// and the synchronization of document unsorted flags with membership
/// changes. All handles are injected at construction.
///
/// Record deletion intentionally does not recompute the unsorted flags of
/// formerly referenced documents — the reference behavior is preserved
/// rather than silently fixed. [`reconcile_unsorted`](Self::reconcile_unsorted)
/// is the explicit recovery operation.
pub struct RecordLedger {
    records: Arc<dyn RecordStore>,
    catalog: Arc<DocumentCatalog>,
    directory: Arc<ArchiveDirectory>,
    registry: Arc<ArchivistRegistry>,
}

impl RecordLedger {
    pub fn new(
        records: Arc<dyn RecordStore>,
        catalog: Arc<DocumentCatalog>,
        directory: Arc<ArchiveDirectory>,
        registry: Arc<ArchivistRegistry>,
    ) -> Self {
        Self {
            records,
            catalog,
            directory,
            registry,
        }
    }

    fn require_record(&self, archive: &str, id: &RecordId) -> LedgerResult<Record> {
        self.records
            .get(archive, id)?
            .ok_or_else(|| LedgerError::RecordNotFound {
                archive: archive.to_string(),
                id: *id,
            })
    }

    /// Run one read-modify-write cycle against a record until the
    /// revision CAS lands.
    ///
    /// The closure re-runs on every retry against a fresh snapshot, so
    /// index validation inside it always sees current state. Maintainer
    /// bookkeeping rides along in the same write.
    fn mutate_record<T, F>(
        &self,
        archive: &str,
        id: &RecordId,
        archivist: &str,
        mut mutate: F,
    ) -> LedgerResult<(Record, T)>
    where
        F: FnMut(&mut Record) -> LedgerResult<T>,
    {
        loop {
            let mut record = self.require_record(archive, id)?;
            let value = mutate(&mut record)?;
            if !record.has_maintainer(archivist) {
                record.maintainers.push(archivist.to_string());
            }
            record.updated_at = Utc::now();
            if self.records.update(&record)? {
                // Mirror the revision bump the store just persisted.
                record.revision += 1;
                return Ok((record, value));
            }
            // Lost the race; reload and replay.
        }
    }

    /// Create an empty record in `archive`.
    ///
    /// Fails `ArchiveNotFound`, then `ArchivistNotFound`.
    pub fn create(&self, archive: &str, name: &str, creator: &str) -> LedgerResult<Record> {
        self.directory.get(archive)?;
        let creator = self.registry.get(creator)?;
        debug!(archive, name, creator = %creator.username, "creating record");

        let record = Record::new(archive, name, creator.username);
        self.records.insert(&record)?;
        Ok(record)
    }

    /// Fetch a record. Fails `ArchiveNotFound`, `RecordNotFound`.
    pub fn get(&self, archive: &str, id: &RecordId) -> LedgerResult<Record> {
        self.directory.get(archive)?;
        self.require_record(archive, id)
    }

    /// Delete a record. Fails `ArchiveNotFound`, `RecordNotFound`.
    ///
    /// Unsorted flags of the documents the record referenced are left
    /// untouched; run [`reconcile_unsorted`](Self::reconcile_unsorted) to
    /// restore the invariant.
    pub fn delete(&self, archive: &str, id: &RecordId) -> LedgerResult<()> {
        self.directory.get(archive)?;
        debug!(archive, %id, "deleting record");
        if !self.records.remove(archive, id)? {
            return Err(LedgerError::RecordNotFound {
                archive: archive.to_string(),
                id: *id,
            });
        }
        Ok(())
    }

    /// Append a document reference to the end of a record's list.
    ///
    /// Fails `ArchiveNotFound`, `RecordNotFound`, `DocumentNotFound`,
    /// `ArchivistNotFound` — in that order. Duplicates are allowed; no
    /// uniqueness check is made. The document's unsorted flag is set to
    /// false unconditionally.
    pub fn add_document(
        &self,
        archive: &str,
        id: &RecordId,
        hash: ContentHash,
        archivist: &str,
    ) -> LedgerResult<Record> {
        self.directory.get(archive)?;
        self.require_record(archive, id)?;
        self.catalog.get_meta(archive, &hash)?;
        let archivist = self.registry.get(archivist)?;
        debug!(archive, %id, hash = %hash.short_hex(), "adding document to record");

        let (record, ()) = self.mutate_record(archive, id, &archivist.username, |record| {
            record.documents.push(hash);
            Ok(())
        })?;

        self.catalog.set_unsorted(archive, &hash, false)?;
        Ok(record)
    }

    /// Remove the document reference at `index` (positional — duplicates
    /// make removal by value ambiguous).
    ///
    /// Fails `ArchiveNotFound`, `RecordNotFound`, `ArchivistNotFound`,
    /// then `DocumentIndexOutOfBounds` for `index` outside `[0, len)`.
    /// If no record in the archive still references the removed hash, the
    /// document becomes unsorted again.
    pub fn remove_document_at(
        &self,
        archive: &str,
        id: &RecordId,
        index: usize,
        archivist: &str,
    ) -> LedgerResult<Record> {
        self.directory.get(archive)?;
        self.require_record(archive, id)?;
        let archivist = self.registry.get(archivist)?;
        debug!(archive, %id, index, "removing document from record");

        let (record, removed) =
            self.mutate_record(archive, id, &archivist.username, |record| {
                let len = record.documents.len();
                if index >= len {
                    return Err(LedgerError::DocumentIndexOutOfBounds { index, len });
                }
                Ok(record.documents.remove(index))
            })?;

        // Membership may survive in other records (or as a duplicate in
        // this one): count before flipping the flag back.
        if self.records.count_referencing(archive, &removed)? == 0 {
            self.catalog.set_unsorted(archive, &removed, true)?;
        }
        Ok(record)
    }

    /// Move the document at `index` to `new_index` (splice-out then
    /// splice-in, standard array-move semantics).
    ///
    /// `NewIndexSameAsOld` short-circuits before any existence check.
    /// Then fails `ArchiveNotFound`, `RecordNotFound`,
    /// `ArchivistNotFound`, `DocumentIndexOutOfBounds`,
    /// `NewIndexOutOfBounds`.
    pub fn reorder(
        &self,
        archive: &str,
        id: &RecordId,
        index: usize,
        new_index: usize,
        archivist: &str,
    ) -> LedgerResult<Record> {
        if index == new_index {
            return Err(LedgerError::NewIndexSameAsOld { index });
        }
        self.directory.get(archive)?;
        self.require_record(archive, id)?;
        let archivist = self.registry.get(archivist)?;
        debug!(archive, %id, index, new_index, "reordering record documents");

        let (record, ()) = self.mutate_record(archive, id, &archivist.username, |record| {
            let len = record.documents.len();
            if index >= len {
                return Err(LedgerError::DocumentIndexOutOfBounds { index, len });
            }
            if new_index >= len {
                return Err(LedgerError::NewIndexOutOfBounds {
                    index: new_index,
                    len,
                });
            }
            let hash = record.documents.remove(index);
            record.documents.insert(new_index, hash);
            Ok(())
        })?;
        Ok(record)
    }

    /// Add a tag (set semantics — adding a present tag is a no-op, but
    /// maintainer bookkeeping still runs).
    ///
    /// Fails `ArchiveNotFound`, `RecordNotFound`, `ArchivistNotFound`.
    pub fn add_tag(
        &self,
        archive: &str,
        id: &RecordId,
        archivist: &str,
        tag: &str,
    ) -> LedgerResult<Record> {
        self.directory.get(archive)?;
        self.require_record(archive, id)?;
        let archivist = self.registry.get(archivist)?;
        debug!(archive, %id, tag, "adding tag to record");

        let (record, ()) = self.mutate_record(archive, id, &archivist.username, |record| {
            if !record.has_tag(tag) {
                record.tags.push(tag.to_string());
            }
            Ok(())
        })?;
        Ok(record)
    }

    /// Remove a tag (set semantics — removing an absent tag is a no-op,
    /// but maintainer bookkeeping still runs).
    ///
    /// Fails `ArchiveNotFound`, `RecordNotFound`, `ArchivistNotFound`.
    pub fn remove_tag(
        &self,
        archive: &str,
        id: &RecordId,
        archivist: &str,
        tag: &str,
    ) -> LedgerResult<Record> {
        self.directory.get(archive)?;
        self.require_record(archive, id)?;
        let archivist = self.registry.get(archivist)?;
        debug!(archive, %id, tag, "removing tag from record");

        let (record, ()) = self.mutate_record(archive, id, &archivist.username, |record| {
            if let Some(position) = record.tags.iter().position(|t| t == tag) {
                record.tags.remove(position);
            }
            Ok(())
        })?;
        Ok(record)
    }

    /// Recompute every document's unsorted flag in `archive` from live
    /// record membership. Returns the number of flags corrected.
    ///
    /// Recovery operation for the documented gaps: record deletion and
    /// archive-level cleanup leave flags stale.
    pub fn reconcile_unsorted(&self, archive: &str) -> LedgerResult<u64> {
        self.directory.get(archive)?;
        let mut corrected = 0;
        for meta in self.catalog.list(archive)? {
            let expected = self.records.count_referencing(archive, &meta.hash)? == 0;
            if meta.unsorted != expected {
                self.catalog.set_unsorted(archive, &meta.hash, expected)?;
                corrected += 1;
            }
        }
        if corrected > 0 {
            debug!(archive, corrected, "reconciled unsorted flags");
        }
        Ok(corrected)
    }
}

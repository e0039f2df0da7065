use std::collections::HashMap;
use std::sync::RwLock;

use arca_types::{ContentHash, RecordId};

use crate::error::{LedgerError, LedgerResult};
use crate::traits::RecordStore;
use crate::types::Record;

/// In-memory record store for tests and embedding.
///
/// The revision compare-and-swap in `update` runs under the single write
/// lock, which is what makes it a usable stand-in for a database with
/// per-document atomic updates.
pub struct InMemoryRecordStore {
    rows: RwLock<HashMap<RecordId, Record>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }

    /// Number of rows currently stored.
    pub fn len(&self) -> usize {
        self.rows.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, archive: &str, id: &RecordId) -> LedgerResult<Option<Record>> {
        let rows = self.rows.read().expect("lock poisoned");
        Ok(rows
            .get(id)
            .filter(|record| record.archive == archive)
            .cloned())
    }

    fn insert(&self, record: &Record) -> LedgerResult<()> {
        let mut rows = self.rows.write().expect("lock poisoned");
        if rows.contains_key(&record.id) {
            return Err(LedgerError::Storage(format!(
                "record id collision: {}",
                record.id
            )));
        }
        rows.insert(record.id, record.clone());
        Ok(())
    }

    fn update(&self, record: &Record) -> LedgerResult<bool> {
        let mut rows = self.rows.write().expect("lock poisoned");
        match rows.get_mut(&record.id) {
            Some(row) if row.revision == record.revision => {
                *row = record.clone();
                row.revision += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn remove(&self, archive: &str, id: &RecordId) -> LedgerResult<bool> {
        let mut rows = self.rows.write().expect("lock poisoned");
        match rows.get(id) {
            Some(record) if record.archive == archive => {
                rows.remove(id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn count_referencing(&self, archive: &str, hash: &ContentHash) -> LedgerResult<u64> {
        let rows = self.rows.read().expect("lock poisoned");
        Ok(rows
            .values()
            .filter(|record| record.archive == archive && record.documents.contains(hash))
            .count() as u64)
    }

    fn list(&self, archive: &str) -> LedgerResult<Vec<Record>> {
        let rows = self.rows.read().expect("lock poisoned");
        let mut records: Vec<Record> = rows
            .values()
            .filter(|record| record.archive == archive)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    fn list_all(&self) -> LedgerResult<Vec<Record>> {
        let rows = self.rows.read().expect("lock poisoned");
        let mut records: Vec<Record> = rows.values().cloned().collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("row_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_is_archive_scoped() {
        let store = InMemoryRecordStore::new();
        let record = Record::new("lab", "week1", "alice");
        store.insert(&record).unwrap();

        assert!(store.get("lab", &record.id).unwrap().is_some());
        assert!(store.get("attic", &record.id).unwrap().is_none());
    }

    #[test]
    fn update_succeeds_only_on_matching_revision() {
        let store = InMemoryRecordStore::new();
        let record = Record::new("lab", "week1", "alice");
        store.insert(&record).unwrap();

        let mut first = store.get("lab", &record.id).unwrap().unwrap();
        let mut second = first.clone();

        first.name = "first writer".into();
        assert!(store.update(&first).unwrap());

        // Same snapshot revision: stale now.
        second.name = "second writer".into();
        assert!(!store.update(&second).unwrap());

        let stored = store.get("lab", &record.id).unwrap().unwrap();
        assert_eq!(stored.name, "first writer");
        assert_eq!(stored.revision, 1);
    }

    #[test]
    fn update_missing_row_is_conflict() {
        let store = InMemoryRecordStore::new();
        let record = Record::new("lab", "week1", "alice");
        assert!(!store.update(&record).unwrap());
    }

    #[test]
    fn remove_is_archive_scoped() {
        let store = InMemoryRecordStore::new();
        let record = Record::new("lab", "week1", "alice");
        store.insert(&record).unwrap();

        assert!(!store.remove("attic", &record.id).unwrap());
        assert!(store.remove("lab", &record.id).unwrap());
    }

    #[test]
    fn count_referencing_counts_records_not_occurrences() {
        let store = InMemoryRecordStore::new();
        let hash = ContentHash::from_bytes(b"counted");

        let mut with_duplicates = Record::new("lab", "a", "alice");
        with_duplicates.documents = vec![hash, hash];
        store.insert(&with_duplicates).unwrap();

        let mut single = Record::new("lab", "b", "alice");
        single.documents = vec![hash];
        store.insert(&single).unwrap();

        let mut elsewhere = Record::new("attic", "c", "alice");
        elsewhere.documents = vec![hash];
        store.insert(&elsewhere).unwrap();

        assert_eq!(store.count_referencing("lab", &hash).unwrap(), 2);
        assert_eq!(store.count_referencing("attic", &hash).unwrap(), 1);
    }
}

use std::collections::HashMap;
use std::sync::RwLock;

use arca_types::ContentHash;
use chrono::Utc;

use crate::error::{CatalogError, CatalogResult};
use crate::traits::DocumentStore;
use crate::types::DocumentMeta;

/// In-memory document store for tests and embedding.
///
/// Rows are keyed by `(archive, hash)`. All compound operations run under
/// one `RwLock` guard, matching the atomicity contracts on
/// [`DocumentStore`].
pub struct InMemoryDocumentStore {
    rows: RwLock<HashMap<(String, ContentHash), DocumentMeta>>,
}

impl InMemoryDocumentStore {
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

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get(&self, archive: &str, hash: &ContentHash) -> CatalogResult<Option<DocumentMeta>> {
        let rows = self.rows.read().expect("lock poisoned");
        Ok(rows.get(&(archive.to_string(), *hash)).cloned())
    }

    fn insert(&self, meta: &DocumentMeta) -> CatalogResult<()> {
        let mut rows = self.rows.write().expect("lock poisoned");
        let key = (meta.archive.clone(), meta.hash);
        if rows.contains_key(&key) {
            return Err(CatalogError::DocumentAlreadyExists {
                archive: meta.archive.clone(),
                hash: meta.hash,
            });
        }
        rows.insert(key, meta.clone());
        Ok(())
    }

    fn update(&self, meta: &DocumentMeta) -> CatalogResult<bool> {
        let mut rows = self.rows.write().expect("lock poisoned");
        match rows.get_mut(&(meta.archive.clone(), meta.hash)) {
            Some(row) => {
                *row = meta.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove_counting_refs(
        &self,
        archive: &str,
        hash: &ContentHash,
    ) -> CatalogResult<Option<(DocumentMeta, u64)>> {
        // Remove and count under one guard: the GC decision needs a
        // consistent read.
        let mut rows = self.rows.write().expect("lock poisoned");
        let removed = rows.remove(&(archive.to_string(), *hash));
        match removed {
            Some(meta) => {
                let remaining = rows.keys().filter(|(_, h)| h == hash).count() as u64;
                Ok(Some((meta, remaining)))
            }
            None => Ok(None),
        }
    }

    fn count_by_hash(&self, hash: &ContentHash) -> CatalogResult<u64> {
        let rows = self.rows.read().expect("lock poisoned");
        Ok(rows.keys().filter(|(_, h)| h == hash).count() as u64)
    }

    fn list_unsorted(&self, archive: &str) -> CatalogResult<Vec<ContentHash>> {
        let rows = self.rows.read().expect("lock poisoned");
        let mut hashes: Vec<ContentHash> = rows
            .values()
            .filter(|meta| meta.archive == archive && meta.unsorted)
            .map(|meta| meta.hash)
            .collect();
        hashes.sort();
        Ok(hashes)
    }

    fn set_unsorted(
        &self,
        archive: &str,
        hash: &ContentHash,
        unsorted: bool,
    ) -> CatalogResult<bool> {
        let mut rows = self.rows.write().expect("lock poisoned");
        match rows.get_mut(&(archive.to_string(), *hash)) {
            Some(row) => {
                row.unsorted = unsorted;
                row.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn list_by_archive(&self, archive: &str) -> CatalogResult<Vec<DocumentMeta>> {
        let rows = self.rows.read().expect("lock poisoned");
        let mut metas: Vec<DocumentMeta> = rows
            .values()
            .filter(|meta| meta.archive == archive)
            .cloned()
            .collect();
        metas.sort_by_key(|meta| meta.hash);
        Ok(metas)
    }
}

impl std::fmt::Debug for InMemoryDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryDocumentStore")
            .field("row_count", &self.len())
            .finish()
    }
}

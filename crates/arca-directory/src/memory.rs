use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{DirectoryError, DirectoryResult};
use crate::traits::ArchiveStore;
use crate::types::Archive;

/// In-memory archive store for tests and embedding.
pub struct InMemoryArchiveStore {
    rows: RwLock<HashMap<String, Archive>>,
}

impl InMemoryArchiveStore {
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

impl Default for InMemoryArchiveStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveStore for InMemoryArchiveStore {
    fn get(&self, name: &str) -> DirectoryResult<Option<Archive>> {
        let rows = self.rows.read().expect("lock poisoned");
        Ok(rows.get(name).cloned())
    }

    fn insert(&self, archive: &Archive) -> DirectoryResult<()> {
        let mut rows = self.rows.write().expect("lock poisoned");
        if rows.contains_key(&archive.name) {
            return Err(DirectoryError::ArchiveAlreadyExists(archive.name.clone()));
        }
        rows.insert(archive.name.clone(), archive.clone());
        Ok(())
    }

    fn update(&self, archive: &Archive) -> DirectoryResult<bool> {
        let mut rows = self.rows.write().expect("lock poisoned");
        match rows.get_mut(&archive.name) {
            Some(row) => {
                *row = archive.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&self, name: &str) -> DirectoryResult<bool> {
        let mut rows = self.rows.write().expect("lock poisoned");
        Ok(rows.remove(name).is_some())
    }

    fn list_names(&self) -> DirectoryResult<Vec<String>> {
        let rows = self.rows.read().expect("lock poisoned");
        let mut names: Vec<String> = rows.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl std::fmt::Debug for InMemoryArchiveStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryArchiveStore")
            .field("row_count", &self.len())
            .finish()
    }
}

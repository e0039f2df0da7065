use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{RegistryError, RegistryResult};
use crate::traits::ArchivistStore;
use crate::types::Archivist;

/// In-memory archivist store for tests and embedding.
pub struct InMemoryArchivistStore {
    rows: RwLock<HashMap<String, Archivist>>,
}

impl InMemoryArchivistStore {
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

impl Default for InMemoryArchivistStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchivistStore for InMemoryArchivistStore {
    fn get(&self, username: &str) -> RegistryResult<Option<Archivist>> {
        let rows = self.rows.read().expect("lock poisoned");
        Ok(rows.get(username).cloned())
    }

    fn insert(&self, archivist: &Archivist) -> RegistryResult<()> {
        let mut rows = self.rows.write().expect("lock poisoned");
        if rows.contains_key(&archivist.username) {
            return Err(RegistryError::ArchivistAlreadyExists(
                archivist.username.clone(),
            ));
        }
        rows.insert(archivist.username.clone(), archivist.clone());
        Ok(())
    }

    fn update(&self, archivist: &Archivist) -> RegistryResult<bool> {
        let mut rows = self.rows.write().expect("lock poisoned");
        match rows.get_mut(&archivist.username) {
            Some(row) => {
                *row = archivist.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&self, username: &str) -> RegistryResult<bool> {
        let mut rows = self.rows.write().expect("lock poisoned");
        Ok(rows.remove(username).is_some())
    }

    fn list(&self) -> RegistryResult<Vec<Archivist>> {
        let rows = self.rows.read().expect("lock poisoned");
        let mut all: Vec<Archivist> = rows.values().cloned().collect();
        all.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(all)
    }
}

impl std::fmt::Debug for InMemoryArchivistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryArchivistStore")
            .field("row_count", &self.len())
            .finish()
    }
}

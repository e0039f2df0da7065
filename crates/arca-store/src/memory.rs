use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use arca_types::ContentHash;

use crate::error::StoreResult;
use crate::traits::ObjectStore;

/// In-memory, HashMap-based object store.
///
/// Intended for tests and embedding. All objects are held in memory behind
/// a `RwLock`. `put_file` still consumes the staging file so callers see
/// the same contract as the durable backend.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ContentHash, Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.objects.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.read().expect("lock poisoned").is_empty()
    }

    /// Total bytes across all stored objects.
    pub fn total_bytes(&self) -> u64 {
        self.objects
            .read()
            .expect("lock poisoned")
            .values()
            .map(|bytes| bytes.len() as u64)
            .sum()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn put_bytes(&self, hash: &ContentHash, bytes: &[u8]) -> StoreResult<()> {
        let mut map = self.objects.write().expect("lock poisoned");
        // Idempotent: content-addressing guarantees the same hash always
        // maps to the same bytes.
        map.entry(*hash).or_insert_with(|| bytes.to_vec());
        Ok(())
    }

    fn put_file(&self, hash: &ContentHash, staging: &Path) -> StoreResult<PathBuf> {
        let bytes = fs::read(staging)?;
        fs::remove_file(staging)?;
        self.put_bytes(hash, &bytes)?;
        Ok(PathBuf::from(format!(
            "memory://{}/{}",
            hash.shard_prefix(),
            hash.shard_rest()
        )))
    }

    fn get(&self, hash: &ContentHash) -> StoreResult<Option<Vec<u8>>> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.get(hash).cloned())
    }

    fn exists(&self, hash: &ContentHash) -> StoreResult<bool> {
        let map = self.objects.read().expect("lock poisoned");
        Ok(map.contains_key(hash))
    }

    fn delete(&self, hash: &ContentHash) -> StoreResult<bool> {
        let mut map = self.objects.write().expect("lock poisoned");
        Ok(map.remove(hash).is_some())
    }

    fn list(&self) -> StoreResult<Vec<ContentHash>> {
        let map = self.objects.read().expect("lock poisoned");
        let mut hashes: Vec<ContentHash> = map.keys().copied().collect();
        hashes.sort();
        Ok(hashes)
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_and_get() {
        let store = InMemoryObjectStore::new();
        let hash = ContentHash::from_bytes(b"hello world");
        store.put_bytes(&hash, b"hello world").unwrap();
        assert_eq!(store.get(&hash).unwrap().unwrap(), b"hello world");
    }

    #[test]
    fn same_content_stored_once() {
        let store = InMemoryObjectStore::new();
        let hash = ContentHash::from_bytes(b"identical");
        store.put_bytes(&hash, b"identical").unwrap();
        store.put_bytes(&hash, b"identical").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn put_file_consumes_staging() {
        let dir = tempfile::tempdir().unwrap();
        let staging = dir.path().join("upload");
        fs::write(&staging, b"staged").unwrap();

        let store = InMemoryObjectStore::new();
        let hash = ContentHash::from_bytes(b"staged");
        store.put_file(&hash, &staging).unwrap();

        assert!(!staging.exists());
        assert_eq!(store.get(&hash).unwrap().unwrap(), b"staged");
    }

    #[test]
    fn exists_and_delete() {
        let store = InMemoryObjectStore::new();
        let hash = ContentHash::from_bytes(b"to-delete");
        assert!(!store.exists(&hash).unwrap());

        store.put_bytes(&hash, b"to-delete").unwrap();
        assert!(store.exists(&hash).unwrap());

        assert!(store.delete(&hash).unwrap());
        assert!(!store.delete(&hash).unwrap());
    }

    #[test]
    fn list_is_sorted() {
        let store = InMemoryObjectStore::new();
        for data in [b"aaa".as_slice(), b"bbb", b"ccc"] {
            store.put_bytes(&ContentHash::from_bytes(data), data).unwrap();
        }
        let hashes = store.list().unwrap();
        assert_eq!(hashes.len(), 3);
        for pair in hashes.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn total_bytes_sums_objects() {
        let store = InMemoryObjectStore::new();
        store.put_bytes(&ContentHash::from_bytes(b"12345"), b"12345").unwrap();
        store.put_bytes(&ContentHash::from_bytes(b"123456789"), b"123456789").unwrap();
        assert_eq!(store.total_bytes(), 14);
    }

    #[test]
    fn concurrent_reads_are_safe() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(InMemoryObjectStore::new());
        let hash = ContentHash::from_bytes(b"shared data");
        store.put_bytes(&hash, b"shared data").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let bytes = store.get(&hash).unwrap().unwrap();
                    assert_eq!(ContentHash::from_bytes(&bytes), hash);
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("thread should not panic");
        }
    }
}

use std::path::{Path, PathBuf};

use arca_types::ContentHash;

use crate::error::StoreResult;

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
///
/// - Objects are immutable once written; the same hash always maps to the
///   same bytes.
/// - Puts are idempotent. If the target hash already exists, the incoming
///   bytes (and any staging file) are discarded — content-addressing
///   guarantees byte-identity.
/// - Readers never observe a partially written object.
/// - Concurrent reads are always safe.
pub trait ObjectStore: Send + Sync {
    /// Write raw bytes under `hash`. No-op if the object already exists.
    fn put_bytes(&self, hash: &ContentHash, bytes: &[u8]) -> StoreResult<()>;

    /// Move a staged file into place under `hash` and return the stored
    /// path.
    ///
    /// If the object already exists, the staging file is deleted and the
    /// existing location is returned. Otherwise the file lands via an
    /// atomic move/rename from `staging`.
    fn put_file(&self, hash: &ContentHash, staging: &Path) -> StoreResult<PathBuf>;

    /// Read an object's bytes. Returns `Ok(None)` if it does not exist.
    fn get(&self, hash: &ContentHash) -> StoreResult<Option<Vec<u8>>>;

    /// Check whether an object exists in the store.
    fn exists(&self, hash: &ContentHash) -> StoreResult<bool>;

    /// Delete an object. Returns `true` if it existed.
    ///
    /// Intended for garbage collection only: the caller is responsible for
    /// ensuring no metadata row still references `hash`.
    fn delete(&self, hash: &ContentHash) -> StoreResult<bool>;

    /// Every hash currently stored. Used by the orphaned-blob sweep.
    fn list(&self) -> StoreResult<Vec<ContentHash>>;
}

use crate::error::DirectoryResult;
use crate::types::Archive;

/// Metadata-store boundary for archive rows.
///
/// Implementations must be thread-safe (`Send + Sync`). Each method is a
/// single-row atomic operation; `insert` enforces the unique index on the
/// archive name.
pub trait ArchiveStore: Send + Sync {
    /// Look up an archive by name.
    fn get(&self, name: &str) -> DirectoryResult<Option<Archive>>;

    /// Insert a new row. Fails `ArchiveAlreadyExists` on name collision.
    fn insert(&self, archive: &Archive) -> DirectoryResult<()>;

    /// Overwrite an existing row. Returns `false` if the name is absent.
    fn update(&self, archive: &Archive) -> DirectoryResult<bool>;

    /// Remove a row. Returns `true` if it existed.
    fn remove(&self, name: &str) -> DirectoryResult<bool>;

    /// All archive names, sorted.
    fn list_names(&self) -> DirectoryResult<Vec<String>>;
}

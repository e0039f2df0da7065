use crate::error::RegistryResult;
use crate::types::Archivist;

/// Metadata-store boundary for archivist rows.
///
/// Implementations must be thread-safe (`Send + Sync`). Each method is a
/// single-row operation and must be atomic; `insert` enforces the unique
/// index on the username key. Usernames are expected in normalized form —
/// normalization happens once in the [`ArchivistRegistry`](crate::ArchivistRegistry)
/// service, never here.
pub trait ArchivistStore: Send + Sync {
    /// Look up an archivist by username key.
    fn get(&self, username: &str) -> RegistryResult<Option<Archivist>>;

    /// Insert a new row. Fails `ArchivistAlreadyExists` on key collision.
    fn insert(&self, archivist: &Archivist) -> RegistryResult<()>;

    /// Overwrite an existing row. Returns `false` if the key is absent.
    fn update(&self, archivist: &Archivist) -> RegistryResult<bool>;

    /// Remove a row. Returns `true` if it existed.
    fn remove(&self, username: &str) -> RegistryResult<bool>;

    /// All rows, sorted by username.
    fn list(&self) -> RegistryResult<Vec<Archivist>>;
}

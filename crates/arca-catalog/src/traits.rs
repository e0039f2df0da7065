use arca_types::ContentHash;

use crate::error::CatalogResult;
use crate::types::DocumentMeta;

/// Metadata-store boundary for document rows.
///
/// Implementations must be thread-safe (`Send + Sync`). `insert` enforces
/// the unique index on `(archive, hash)`. `remove_counting_refs` is the
/// one compound operation: it must remove the row and count the surviving
/// references to the same hash under a single lock or transaction, so the
/// blob garbage-collection decision is made against a consistent read.
pub trait DocumentStore: Send + Sync {
    /// Look up a row by `(archive, hash)`.
    fn get(&self, archive: &str, hash: &ContentHash) -> CatalogResult<Option<DocumentMeta>>;

    /// Insert a new row. Fails `DocumentAlreadyExists` on `(archive, hash)`
    /// collision.
    fn insert(&self, meta: &DocumentMeta) -> CatalogResult<()>;

    /// Overwrite an existing row. Returns `false` if absent.
    fn update(&self, meta: &DocumentMeta) -> CatalogResult<bool>;

    /// Remove the row and, atomically with the removal, count remaining
    /// rows in any archive referencing the same hash. Returns `None` if
    /// the row did not exist.
    fn remove_counting_refs(
        &self,
        archive: &str,
        hash: &ContentHash,
    ) -> CatalogResult<Option<(DocumentMeta, u64)>>;

    /// Number of rows (any archive) referencing `hash`.
    fn count_by_hash(&self, hash: &ContentHash) -> CatalogResult<u64>;

    /// Hashes of unsorted rows in `archive`, sorted.
    fn list_unsorted(&self, archive: &str) -> CatalogResult<Vec<ContentHash>>;

    /// Set the unsorted flag on a row. Returns `false` if the row is
    /// absent.
    fn set_unsorted(&self, archive: &str, hash: &ContentHash, unsorted: bool)
        -> CatalogResult<bool>;

    /// All rows in `archive`, sorted by hash.
    fn list_by_archive(&self, archive: &str) -> CatalogResult<Vec<DocumentMeta>>;
}

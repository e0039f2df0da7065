use arca_types::RecordId;
use thiserror::Error;

/// Errors from record ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// No record with this id in the archive.
    #[error("record not found: {id} in {archive}")]
    RecordNotFound { archive: String, id: RecordId },

    /// Document index outside `[0, len)`.
    #[error("document index out of bounds: {index} (length {len})")]
    DocumentIndexOutOfBounds { index: usize, len: usize },

    /// Target index of a reorder outside `[0, len)`.
    #[error("new index out of bounds: {index} (length {len})")]
    NewIndexOutOfBounds { index: usize, len: usize },

    /// A reorder where the element would not move.
    #[error("new index is the same as the old index: {index}")]
    NewIndexSameAsOld { index: usize },

    /// Failure from the archive directory (existence gating).
    #[error(transparent)]
    Directory(#[from] arca_directory::DirectoryError),

    /// Failure from the archivist registry (existence gating).
    #[error(transparent)]
    Registry(#[from] arca_registry::RegistryError),

    /// Failure from the document catalog (existence gating, unsorted
    /// synchronization).
    #[error(transparent)]
    Catalog(#[from] arca_catalog::CatalogError),

    /// Failure in the backing metadata store.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

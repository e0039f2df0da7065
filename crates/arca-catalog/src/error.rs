use arca_types::ContentHash;
use thiserror::Error;

/// Errors from document catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No document row for this `(archive, hash)` pair.
    #[error("document not found: {hash} in {archive}")]
    DocumentNotFound { archive: String, hash: ContentHash },

    /// A row for this `(archive, hash)` pair already exists.
    #[error("document already exists: {hash} in {archive}")]
    DocumentAlreadyExists { archive: String, hash: ContentHash },

    /// The object store has no blob for this hash.
    ///
    /// Unreachable while catalog invariants hold; kept as a defensive
    /// check on the read path.
    #[error("object not found: {0}")]
    ObjectNotFound(ContentHash),

    /// Failure from the archive directory (existence gating).
    #[error(transparent)]
    Directory(#[from] arca_directory::DirectoryError),

    /// Failure from the archivist registry (existence gating).
    #[error(transparent)]
    Registry(#[from] arca_registry::RegistryError),

    /// Failure from the object store.
    #[error(transparent)]
    Store(#[from] arca_store::StoreError),

    /// I/O failure while hashing or staging an upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure in the backing metadata store.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

use thiserror::Error;

/// Errors from archive directory operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// No archive with this name.
    #[error("archive not found: {0}")]
    ArchiveNotFound(String),

    /// An archive with this name already exists.
    #[error("archive already exists: {0}")]
    ArchiveAlreadyExists(String),

    /// The acting archivist is not the archive owner.
    #[error("not authorized: {archivist} is not the owner of {archive}")]
    NotAuthorized { archive: String, archivist: String },

    /// Failure from the archivist registry (existence gating).
    #[error(transparent)]
    Registry(#[from] arca_registry::RegistryError),

    /// Failure in the backing metadata store.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result alias for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

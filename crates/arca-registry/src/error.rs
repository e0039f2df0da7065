use thiserror::Error;

/// Errors from archivist registry operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// No archivist with this (normalized) username.
    #[error("archivist not found: {0}")]
    ArchivistNotFound(String),

    /// The (normalized) username is already taken.
    #[error("archivist already exists: {0}")]
    ArchivistAlreadyExists(String),

    /// Failure in the backing metadata store.
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

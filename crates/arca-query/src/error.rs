use thiserror::Error;

/// Errors from query operations.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Failure from the archive directory (existence gating).
    #[error(transparent)]
    Directory(#[from] arca_directory::DirectoryError),

    /// Failure from the record store.
    #[error(transparent)]
    Ledger(#[from] arca_ledger::LedgerError),
}

/// Result alias for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use arca_catalog::CatalogError;
use arca_directory::DirectoryError;
use arca_ledger::LedgerError;
use arca_query::QueryError;
use arca_registry::RegistryError;
use arca_types::TypeError;

/// Boundary error: every domain failure plus the request-shape failures
/// raised at this layer. Each kind has a fixed status code — the mapping
/// is a closed table, not runtime type inspection.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request shape: empty name, bad index, same-name rename.
    #[error("{0}")]
    BadRequest(String),

    /// Malformed identifier in a path segment.
    #[error(transparent)]
    Types(#[from] TypeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Status mapping: 400 for malformed-input failures, 401 for
    /// not-authorized, 404 for missing entities, 409 for unique-key
    /// collisions, 500 for anything infrastructural.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Types(_) => StatusCode::BAD_REQUEST,
            Self::Registry(e) => registry_status(e),
            Self::Directory(e) => directory_status(e),
            Self::Catalog(e) => catalog_status(e),
            Self::Ledger(e) => ledger_status(e),
            Self::Query(e) => query_status(e),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn registry_status(error: &RegistryError) -> StatusCode {
    match error {
        RegistryError::ArchivistNotFound(_) => StatusCode::NOT_FOUND,
        RegistryError::ArchivistAlreadyExists(_) => StatusCode::CONFLICT,
        RegistryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn directory_status(error: &DirectoryError) -> StatusCode {
    match error {
        DirectoryError::ArchiveNotFound(_) => StatusCode::NOT_FOUND,
        DirectoryError::ArchiveAlreadyExists(_) => StatusCode::CONFLICT,
        DirectoryError::NotAuthorized { .. } => StatusCode::UNAUTHORIZED,
        DirectoryError::Registry(e) => registry_status(e),
        DirectoryError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn catalog_status(error: &CatalogError) -> StatusCode {
    match error {
        CatalogError::DocumentNotFound { .. } | CatalogError::ObjectNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        CatalogError::DocumentAlreadyExists { .. } => StatusCode::CONFLICT,
        CatalogError::Directory(e) => directory_status(e),
        CatalogError::Registry(e) => registry_status(e),
        CatalogError::Store(_) | CatalogError::Io(_) | CatalogError::Storage(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn ledger_status(error: &LedgerError) -> StatusCode {
    match error {
        LedgerError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
        LedgerError::DocumentIndexOutOfBounds { .. }
        | LedgerError::NewIndexOutOfBounds { .. }
        | LedgerError::NewIndexSameAsOld { .. } => StatusCode::BAD_REQUEST,
        LedgerError::Directory(e) => directory_status(e),
        LedgerError::Registry(e) => registry_status(e),
        LedgerError::Catalog(e) => catalog_status(e),
        LedgerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn query_status(error: &QueryError) -> StatusCode {
    match error {
        QueryError::Directory(e) => directory_status(e),
        QueryError::Ledger(e) => ledger_status(e),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}

/// Result alias for handler functions.
pub type ApiResult<T> = Result<T, ApiError>;

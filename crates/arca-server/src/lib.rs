//! HTTP server for the ARCA document archive.
//!
//! Translates the core operations — archive directory, archivist
//! registry, document catalog, record ledger, query engine — into REST
//! routes, with a fixed mapping from failure kinds to status codes:
//! malformed input 400, not authorized 401, missing entities 404,
//! unique-key collisions 409, infrastructure failures 500.
//!
//! Uploads arrive as multipart forms, are staged to the upload directory,
//! and are handed to the catalog as `(filename, mime type, size, staging
//! path)` — the staging file is deleted on any failure raised before the
//! catalog takes over.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use server::ArcaServer;
pub use state::AppState;

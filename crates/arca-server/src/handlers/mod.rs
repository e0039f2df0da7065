//! Request handlers, one module per resource.
//!
//! Handlers do trivial shape validation (non-empty names, parseable
//! identifiers), then delegate to the core services. Domain failures
//! bubble up as [`ApiError`](crate::error::ApiError) and render through
//! its status table.

pub mod archive;
pub mod archivist;
pub mod document;
pub mod record;

//! Record query engine for the ARCA document archive.
//!
//! Filters records by name substring and tag set operations. All provided
//! filters combine with logical AND; absent filters impose no constraint.
//! The name match is a deterministic lowercase-contains check — no regex
//! engine — so behavior is identical across backends.
//!
//! Matching is applied over all records after the archive existence
//! check, not scoped to the archive internally; callers scope the result
//! by `record.archive` equality (the HTTP layer does exactly that).

pub mod engine;
pub mod error;
pub mod query;

pub use engine::QueryEngine;
pub use error::{QueryError, QueryResult};
pub use query::RecordQuery;

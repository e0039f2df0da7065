//! Document catalog for the ARCA document archive.
//!
//! A document is an immutable, content-addressed file plus one metadata
//! row per archive that carries it. Uniqueness is on `(archive, hash)`:
//! the same content may appear in many archives as independent rows, but
//! the underlying bytes live exactly once in the object store, and are
//! garbage-collected only when the last row referencing that hash — in
//! any archive — is removed.
//!
//! The catalog also owns the `unsorted` flag on each row: true iff the
//! document currently belongs to zero records. The flag is flipped by the
//! record ledger through [`DocumentCatalog::set_unsorted`] as membership
//! crosses 0↔1.
//!
//! # Modules
//!
//! - [`error`] — Error types for catalog operations
//! - [`types`] — The [`DocumentMeta`] row
//! - [`traits`] — The [`DocumentStore`] metadata-store boundary
//! - [`memory`] — In-memory [`InMemoryDocumentStore`]
//! - [`catalog`] — The [`DocumentCatalog`] service

pub mod catalog;
pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use catalog::DocumentCatalog;
pub use error::{CatalogError, CatalogResult};
pub use memory::InMemoryDocumentStore;
pub use traits::DocumentStore;
pub use types::DocumentMeta;

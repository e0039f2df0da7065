//! Archivist identity registry for the ARCA document archive.
//!
//! Archivists are the bare identities behind every mutating operation in
//! the system. There is no authentication here — an archivist is a
//! normalized username plus a bio and timestamps — but every mutating
//! operation elsewhere in ARCA is gated on archivist existence, so the
//! registry is the root of the validation chain.
//!
//! # Modules
//!
//! - [`error`] — Error types for registry operations
//! - [`types`] — The [`Archivist`] row
//! - [`traits`] — The [`ArchivistStore`] metadata-store boundary
//! - [`memory`] — In-memory [`InMemoryArchivistStore`] for tests and embedding
//! - [`registry`] — The [`ArchivistRegistry`] service

pub mod error;
pub mod memory;
pub mod registry;
pub mod traits;
pub mod types;

pub use error::{RegistryError, RegistryResult};
pub use memory::InMemoryArchivistStore;
pub use registry::ArchivistRegistry;
pub use traits::ArchivistStore;
pub use types::Archivist;

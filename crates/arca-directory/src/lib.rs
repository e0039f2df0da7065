//! Named archive directory for the ARCA document archive.
//!
//! An archive is a named, owned namespace containing documents and
//! records. The owner is fixed at creation and is the sole authority for
//! deleting the archive; the maintainer list is a pure accumulate-only
//! audit trail with no authorization weight. Keep those two concepts
//! separate — they never merge.
//!
//! Deleting an archive does not cascade to the documents and records it
//! contains; orphaned rows remain until the maintenance operations in the
//! catalog and ledger crates collect them.
//!
//! # Modules
//!
//! - [`error`] — Error types for directory operations
//! - [`types`] — The [`Archive`] row
//! - [`traits`] — The [`ArchiveStore`] metadata-store boundary
//! - [`memory`] — In-memory [`InMemoryArchiveStore`]
//! - [`directory`] — The [`ArchiveDirectory`] service

pub mod directory;
pub mod error;
pub mod memory;
pub mod traits;
pub mod types;

pub use directory::ArchiveDirectory;
pub use error::{DirectoryError, DirectoryResult};
pub use memory::InMemoryArchiveStore;
pub use traits::ArchiveStore;
pub use types::Archive;

//! Content-addressed object storage for the ARCA document archive.
//!
//! Every uploaded document lands here exactly once per distinct content
//! hash, regardless of how many archives carry a metadata row for it. The
//! store is a pure key-value map from [`ContentHash`](arca_types::ContentHash)
//! to an immutable byte blob.
//!
//! # Storage Backends
//!
//! All backends implement the [`ObjectStore`] trait:
//!
//! - [`FsObjectStore`] — durable store sharded by hash prefix
//!   (`<2-char prefix>/<remaining 38 chars>`)
//! - [`InMemoryObjectStore`] — `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Writes are idempotent: a second put of the same hash discards the
//!    incoming bytes.
//! 3. No partial-write state is ever reader-visible: content lands via an
//!    atomic rename from a staging path into the sharded location.
//! 4. The store never interprets object contents.
//! 5. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsObjectStore;
pub use memory::InMemoryObjectStore;
pub use traits::ObjectStore;

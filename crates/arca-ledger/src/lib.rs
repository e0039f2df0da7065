//! Record ledger for the ARCA document archive.
//!
//! A record is a named, ordered, taggable list of document references
//! within one archive. The list is a sequence, not a set: duplicates are
//! allowed and position matters, so removal is by index and reordering is
//! an array move (splice-out, then splice-in).
//!
//! The ledger also keeps each referenced document's `unsorted` flag in
//! sync with record membership: a document is unsorted iff it belongs to
//! zero records archive-wide. The flag flips to false the instant a
//! document is added to any record, and back to true the instant its last
//! remaining membership is removed — decided by counting the records that
//! still reference the hash, never by per-record bookkeeping, because one
//! document can appear in many records.
//!
//! # Concurrency
//!
//! Every read-modify-write on a record goes through an optimistic
//! compare-and-swap on the row's revision counter (see
//! [`RecordStore::update`]), retried on conflict, so concurrent mutations
//! of the same record are never lost. The unsorted-flag write follows the
//! record write it belongs to; between the two a concurrent mutation can
//! briefly observe a stale flag. [`RecordLedger::reconcile_unsorted`]
//! restores the invariant from live membership.
//!
//! # Modules
//!
//! - [`error`] — Error types for ledger operations
//! - [`types`] — The [`Record`] row
//! - [`traits`] — The [`RecordStore`] metadata-store boundary
//! - [`memory`] — In-memory [`InMemoryRecordStore`]
//! - [`ledger`] — The [`RecordLedger`] service

pub mod error;
pub mod ledger;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{LedgerError, LedgerResult};
pub use ledger::RecordLedger;
pub use memory::InMemoryRecordStore;
pub use traits::RecordStore;
pub use types::Record;

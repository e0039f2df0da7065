use arca_types::{ContentHash, RecordId};

use crate::error::LedgerResult;
use crate::types::Record;

/// Metadata-store boundary for record rows.
///
/// Implementations must be thread-safe (`Send + Sync`). `update` is the
/// optimistic-concurrency primitive the whole ledger leans on: it
/// persists the caller's copy only when the stored revision still equals
/// the copy's revision, bumping the stored revision by one. Positional
/// list edits are read-modify-write sequences and would lose updates
/// without it.
pub trait RecordStore: Send + Sync {
    /// Look up a record by id, scoped to `archive`. A record that exists
    /// under a different archive is not visible here.
    fn get(&self, archive: &str, id: &RecordId) -> LedgerResult<Option<Record>>;

    /// Insert a freshly minted record. Ids are unique by construction; a
    /// key collision is a storage fault.
    fn insert(&self, record: &Record) -> LedgerResult<()>;

    /// Compare-and-swap update. Persists `record` (with revision bumped)
    /// iff the stored revision equals `record.revision`. Returns `false`
    /// when the row has moved on or no longer exists — callers reload and
    /// retry.
    fn update(&self, record: &Record) -> LedgerResult<bool>;

    /// Remove a record. Returns `true` if it existed in `archive`.
    fn remove(&self, archive: &str, id: &RecordId) -> LedgerResult<bool>;

    /// Number of records in `archive` whose document list contains
    /// `hash` (each record counted once, however many times the hash
    /// appears in it).
    fn count_referencing(&self, archive: &str, hash: &ContentHash) -> LedgerResult<u64>;

    /// All records in `archive`, sorted by id.
    fn list(&self, archive: &str) -> LedgerResult<Vec<Record>>;

    /// All records in every archive, sorted by id. Used by the query
    /// engine.
    fn list_all(&self) -> LedgerResult<Vec<Record>>;
}

use std::sync::Arc;

use arca_directory::ArchiveDirectory;
use arca_ledger::{Record, RecordStore};

use crate::error::QueryResult;
use crate::query::RecordQuery;

/// The record query service.
///
/// Validates archive existence, then runs the query predicate over all
/// records. Archive scoping of the result set is the caller's job.
pub struct QueryEngine {
    records: Arc<dyn RecordStore>,
    directory: Arc<ArchiveDirectory>,
}

impl QueryEngine {
    pub fn new(records: Arc<dyn RecordStore>, directory: Arc<ArchiveDirectory>) -> Self {
        Self { records, directory }
    }

    /// Find records matching `query`. Fails `ArchiveNotFound` when the
    /// named archive does not exist.
    pub fn find(&self, archive: &str, query: &RecordQuery) -> QueryResult<Vec<Record>> {
        self.directory.get(archive)?;
        let records = self.records.list_all()?;
        Ok(records
            .into_iter()
            .filter(|record| query.matches(record))
            .collect())
    }
}

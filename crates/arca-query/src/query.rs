use arca_ledger::Record;
use serde::{Deserialize, Serialize};

/// A record query. Absent fields impose no constraint; present fields
/// combine with logical AND.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecordQuery {
    /// Case-insensitive substring match on the record name.
    pub name: Option<String>,
    /// Record must carry at least one of these tags.
    pub include_tags: Option<Vec<String>>,
    /// Record must carry none of these tags.
    pub exclude_tags: Option<Vec<String>>,
    /// Record must carry all of these tags.
    pub filter_tags: Option<Vec<String>>,
}

impl RecordQuery {
    /// Whether `record` satisfies every provided filter.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(name) = &self.name {
            if !record
                .name
                .to_lowercase()
                .contains(&name.to_lowercase())
            {
                return false;
            }
        }
        if let Some(include) = &self.include_tags {
            if !include.iter().any(|tag| record.has_tag(tag)) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude_tags {
            if exclude.iter().any(|tag| record.has_tag(tag)) {
                return false;
            }
        }
        if let Some(filter) = &self.filter_tags {
            if !filter.iter().all(|tag| record.has_tag(tag)) {
                return false;
            }
        }
        true
    }
}

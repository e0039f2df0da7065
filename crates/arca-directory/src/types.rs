use arca_types::Timestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// An archive row: a named, owned namespace for documents and records.
///
/// `owner` is fixed at creation and always appears in `maintainers`.
/// Maintainers accumulate as archivists perform mutating actions anywhere
/// inside the archive; the list never shrinks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    pub name: String,
    pub description: String,
    pub owner: String,
    pub maintainers: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Archive {
    /// Create a fresh row owned by `owner`, who is also the first
    /// maintainer.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>,
    ) -> Self {
        let owner = owner.into();
        let now = Utc::now();
        Self {
            name: name.into(),
            description: description.into(),
            maintainers: vec![owner.clone()],
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `archivist` already appears in the maintainer list.
    pub fn has_maintainer(&self, archivist: &str) -> bool {
        self.maintainers.iter().any(|m| m == archivist)
    }
}

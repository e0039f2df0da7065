use arca_types::{ContentHash, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A document metadata row.
///
/// One row per `(archive, hash)` pair. A freshly created document is
/// `unsorted` until the first record references it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub archive: String,
    pub hash: ContentHash,
    pub name: String,
    pub file_type: String,
    pub file_size: u64,
    pub creator: String,
    pub maintainers: Vec<String>,
    pub unsorted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DocumentMeta {
    /// Create a fresh row, unsorted, with the creator as sole maintainer.
    pub fn new(
        archive: impl Into<String>,
        hash: ContentHash,
        name: impl Into<String>,
        file_type: impl Into<String>,
        file_size: u64,
        creator: impl Into<String>,
    ) -> Self {
        let creator = creator.into();
        let now = Utc::now();
        Self {
            archive: archive.into(),
            hash,
            name: name.into(),
            file_type: file_type.into(),
            file_size,
            maintainers: vec![creator.clone()],
            creator,
            unsorted: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `archivist` already appears in the maintainer list.
    pub fn has_maintainer(&self, archivist: &str) -> bool {
        self.maintainers.iter().any(|m| m == archivist)
    }
}

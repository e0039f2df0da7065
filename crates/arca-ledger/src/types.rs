use arca_types::{ContentHash, RecordId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A record row: an ordered, tagged list of document references.
///
/// `documents` is order-significant and may contain the same hash more
/// than once. `tags` has set semantics. `revision` is the optimistic
/// concurrency counter bumped by every successful
/// [`RecordStore::update`](crate::RecordStore::update).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    pub archive: String,
    pub documents: Vec<ContentHash>,
    pub tags: Vec<String>,
    pub creator: String,
    pub maintainers: Vec<String>,
    pub revision: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Record {
    /// Create a fresh, empty record with the creator as sole maintainer.
    pub fn new(
        archive: impl Into<String>,
        name: impl Into<String>,
        creator: impl Into<String>,
    ) -> Self {
        let creator = creator.into();
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            name: name.into(),
            archive: archive.into(),
            documents: Vec::new(),
            tags: Vec::new(),
            maintainers: vec![creator.clone()],
            creator,
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `archivist` already appears in the maintainer list.
    pub fn has_maintainer(&self, archivist: &str) -> bool {
        self.maintainers.iter().any(|m| m == archivist)
    }

    /// Whether the tag set contains `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// How many times `hash` appears in the document list.
    pub fn occurrences(&self, hash: &ContentHash) -> usize {
        self.documents.iter().filter(|h| *h == hash).count()
    }
}

use arca_types::Timestamp;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// An archivist identity row.
///
/// The username is stored in normalized form (trimmed, lowercased) and is
/// the unique key of the collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archivist {
    pub username: String,
    pub bio: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Archivist {
    /// Create a fresh row. The caller is responsible for normalizing the
    /// username first.
    pub fn new(username: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            username: username.into(),
            bio: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

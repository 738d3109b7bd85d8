use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle metadata of a stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Username of the author, stamped by the backend from the token
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Version for optimistic checks, bumped on every update
    #[serde(default)]
    pub version: i32,
}

impl EntityMetadata {
    /// Create metadata for a new record
    pub fn new(created_by: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            created_by,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Update the timestamp and bump the version
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.version += 1;
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new(None)
    }
}

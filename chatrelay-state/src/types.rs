//! Persisted record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted endpoint override
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedEndpoint {
    /// The override URL as given to the setter
    pub url: String,
    /// When the override was last written
    pub updated_at: DateTime<Utc>,
}

impl PersistedEndpoint {
    /// Create a record stamped with the current time
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            updated_at: Utc::now(),
        }
    }
}

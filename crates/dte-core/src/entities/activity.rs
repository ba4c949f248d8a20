//! Activity entity - audit trail of account and data operations

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

/// Recorded audit activity
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: i64,
    /// Acting account; `None` for system-initiated work (scheduled backups etc.)
    pub user_id: Option<i64>,
    /// Free-form action tag: "login", "register", "password_change", ...
    pub activity_type: String,
    pub description: String,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new audit record
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: Option<i64>,
    pub activity_type: String,
    pub description: String,
    pub metadata: Option<JsonValue>,
}

impl NewActivity {
    /// Create an audit record for a user action
    #[must_use]
    pub fn new(user_id: i64, activity_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id),
            activity_type: activity_type.into(),
            description: description.into(),
            metadata: None,
        }
    }

    /// Create an audit record for system-initiated work
    #[must_use]
    pub fn system(activity_type: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            user_id: None,
            activity_type: activity_type.into(),
            description: description.into(),
            metadata: None,
        }
    }

    /// Attach structured detail to the record
    #[must_use]
    pub fn with_metadata(mut self, metadata: JsonValue) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

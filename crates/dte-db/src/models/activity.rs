//! Row shape of the activities table

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// One row of `activities`
#[derive(Debug, Clone, FromRow)]
pub struct ActivityRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub activity_type: String,
    pub description: String,
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
}

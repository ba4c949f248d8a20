//! Row shape of the notifications table

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One row of `notifications`
#[derive(Debug, Clone, FromRow)]
pub struct NotificationRow {
    pub id: i64,
    pub user_id: Option<i64>,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub category: String,
    pub action_url: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

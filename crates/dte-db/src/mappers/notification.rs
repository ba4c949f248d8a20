//! Notification entity <-> row mapper

use dte_core::entities::{Notification, NotificationCategory, NotificationKind};

use crate::models::NotificationRow;

/// Convert NotificationRow to Notification entity
///
/// Kind and category strings the enums do not know fall back to their
/// defaults (info, system).
impl From<NotificationRow> for Notification {
    fn from(row: NotificationRow) -> Self {
        Notification {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            message: row.message,
            kind: NotificationKind::from(row.kind.as_str()),
            category: NotificationCategory::from(row.category.as_str()),
            action_url: row.action_url,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

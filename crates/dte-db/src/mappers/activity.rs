//! Activity entity <-> row mapper

use dte_core::entities::Activity;

use crate::models::ActivityRow;

/// Convert ActivityRow to Activity entity
impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Activity {
            id: row.id,
            user_id: row.user_id,
            activity_type: row.activity_type,
            description: row.description,
            metadata: row.metadata,
            created_at: row.created_at,
        }
    }
}

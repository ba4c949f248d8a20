//! Row shape of the users table

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One row of `users`.
///
/// Unlike the entity, the row carries the password hash; it stays inside
/// this crate and never crosses the repository boundary.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub open_id: String,
    pub username: Option<String>,
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: String,
    pub login_method: String,
    pub is_active: bool,
    pub last_signed_in: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

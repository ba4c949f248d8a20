//! User entity <-> row mapper

use dte_core::entities::{LoginMethod, User};

use crate::models::UserRow;

/// Convert UserRow to User entity
///
/// The password hash is dropped here; it leaves the crate only through
/// `UserRepository::password_hash`. A role string the enum does not know
/// collapses to the least-privileged role.
impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            open_id: row.open_id,
            username: row.username,
            name: row.name,
            email: row.email,
            role: row.role.parse().unwrap_or_default(),
            login_method: LoginMethod::from(row.login_method.as_str()),
            is_active: row.is_active,
            last_signed_in: row.last_signed_in,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

//! sqlx-to-domain error translation shared by the repositories

use dte_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Flatten any sqlx failure into [`DomainError::Storage`]
pub fn storage_error(e: SqlxError) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn unique_conflict(e: &SqlxError) -> Option<DomainError> {
    let db_err = e.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }
    match db_err.constraint() {
        Some("users_username_key") => Some(DomainError::UsernameAlreadyExists),
        Some("users_email_key") => Some(DomainError::EmailAlreadyExists),
        _ => None,
    }
}

/// Map a unique violation on the users table to the conflicting field
///
/// The violated constraint name decides whether the username or the email
/// collided. This is the authoritative duplicate signal; the friendly
/// pre-insert lookup only narrows the window.
pub fn map_user_unique_violation(e: SqlxError) -> DomainError {
    unique_conflict(&e).unwrap_or_else(|| storage_error(e))
}

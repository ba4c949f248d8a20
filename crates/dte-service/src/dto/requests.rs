//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; those carrying free-form input
//! also implement `Validate`.

use chrono::{DateTime, Utc};
use dte_core::entities::Role;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub password: String,
}

/// Login request; the identifier matches either a username or an email
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Identifier must not be empty"))]
    pub identifier: String,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Change own password request
///
/// `current_password` is absent when a social-only account sets its first
/// local password.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,

    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub new_password: String,
}

/// Admin password reset request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminSetPasswordRequest {
    #[validate(length(min = 6, max = 72, message = "Password must be 6-72 characters"))]
    pub new_password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update own profile request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Admin role change request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

/// Admin activation toggle request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateActiveRequest {
    pub is_active: bool,
}

// ============================================================================
// Activity Requests
// ============================================================================

/// Activity listing filters (query string)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityListQuery {
    pub user_id: Option<i64>,
    pub activity_type: Option<String>,
    /// Case-insensitive substring match against the description
    pub search: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

// ============================================================================
// Notification Requests
// ============================================================================

/// Notification listing filters (query string)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
}

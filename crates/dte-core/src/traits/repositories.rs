//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Activity, NewActivity, NewNotification, NewUser, Notification, Role, User,
};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// Find user by stable external identifier
    async fn find_by_open_id(&self, open_id: &str) -> RepoResult<Option<User>>;

    /// Find user by login identifier, matching username or email in a single
    /// lookup; an exact username match outranks an email match
    async fn find_by_identifier(&self, identifier: &str) -> RepoResult<Option<User>>;

    /// List all users, newest first
    async fn list_all(&self) -> RepoResult<Vec<User>>;

    /// Create a new user, returning the stored row
    ///
    /// A unique violation surfaces as `UsernameAlreadyExists` or
    /// `EmailAlreadyExists` depending on the violated constraint.
    async fn create(&self, new_user: &NewUser) -> RepoResult<User>;

    /// Update profile fields, returning the stored row
    async fn update_profile(&self, id: i64, name: &str, email: &str) -> RepoResult<User>;

    /// Change the access role, returning the stored row
    async fn set_role(&self, id: i64, role: Role) -> RepoResult<User>;

    /// Activate or deactivate the account, returning the stored row
    async fn set_active(&self, id: i64, active: bool) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn password_hash(&self, id: i64) -> RepoResult<Option<String>>;

    /// Replace the password hash, leaving the login method untouched
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()>;

    /// Replace the password hash and force the login method to local
    async fn set_password_local(&self, id: i64, password_hash: &str) -> RepoResult<()>;

    /// Record a successful sign-in
    async fn touch_last_signed_in(&self, id: i64) -> RepoResult<()>;
}

// ============================================================================
// Activity Repository
// ============================================================================

/// Filter options for audit queries
#[derive(Debug, Clone)]
pub struct ActivityQuery {
    pub user_id: Option<i64>,
    pub activity_type: Option<String>,
    /// Case-insensitive substring match on the description
    pub search: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub limit: i64,
}

impl Default for ActivityQuery {
    fn default() -> Self {
        Self {
            user_id: None,
            activity_type: None,
            search: None,
            since: None,
            until: None,
            limit: 50,
        }
    }
}

#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Append an audit record, returning the stored row
    async fn create(&self, activity: &NewActivity) -> RepoResult<Activity>;

    /// List audit records matching the filters, newest first
    async fn find(&self, query: &ActivityQuery) -> RepoResult<Vec<Activity>>;

    /// Distinct activity types present in the log, for filter dropdowns
    async fn distinct_types(&self) -> RepoResult<Vec<String>>;
}

// ============================================================================
// Notification Repository
// ============================================================================

/// Which notification rows a viewer may touch
///
/// Broadcast rows (no target user) are visible to administrators only, so
/// the scope carries whether they are included.
#[derive(Debug, Clone, Copy)]
pub struct NotificationScope {
    pub user_id: i64,
    pub include_broadcast: bool,
}

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Store a notification, returning the stored row
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification>;

    /// List notifications in scope, newest first
    async fn find(&self, scope: NotificationScope, unread_only: bool, limit: i64)
        -> RepoResult<Vec<Notification>>;

    /// Count unread notifications in scope
    async fn unread_count(&self, scope: NotificationScope) -> RepoResult<i64>;

    /// Mark one notification read; returns false when no row in scope matched
    async fn mark_read(&self, id: i64, scope: NotificationScope) -> RepoResult<bool>;

    /// Mark every notification in scope read, returning how many changed
    async fn mark_all_read(&self, scope: NotificationScope) -> RepoResult<u64>;

    /// Delete one notification; returns false when no row in scope matched
    async fn delete(&self, id: i64, scope: NotificationScope) -> RepoResult<bool>;
}

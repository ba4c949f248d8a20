//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use dte_core::entities::{Activity, Notification, User};

use super::responses::{ActivityResponse, NotificationResponse, UserResponse};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            open_id: user.open_id.clone(),
            username: user.username.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            login_method: user.login_method.to_string(),
            is_active: user.is_active,
            last_signed_in: user.last_signed_in,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Activity Mappers
// ============================================================================

impl From<&Activity> for ActivityResponse {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            user_id: activity.user_id,
            activity_type: activity.activity_type.clone(),
            description: activity.description.clone(),
            metadata: activity.metadata.clone(),
            created_at: activity.created_at,
        }
    }
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self::from(&activity)
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id,
            user_id: notification.user_id,
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind.as_str().to_string(),
            category: notification.category.as_str().to_string(),
            action_url: notification.action_url.clone(),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self::from(&notification)
    }
}

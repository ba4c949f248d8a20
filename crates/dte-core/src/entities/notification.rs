//! Notification entity - in-app messages for dashboard users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[default]
    Info,
    Warning,
    Error,
    Success,
}

impl NotificationKind {
    /// Get the stored string form
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "success",
        }
    }
}

impl From<&str> for NotificationKind {
    fn from(value: &str) -> Self {
        match value {
            "warning" => Self::Warning,
            "error" => Self::Error,
            "success" => Self::Success,
            _ => Self::Info, // Default for "info" and unknown values
        }
    }
}

/// Subsystem a notification originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationCategory {
    Backup,
    Security,
    #[default]
    System,
    User,
    Import,
}

impl NotificationCategory {
    /// Get the stored string form
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backup => "backup",
            Self::Security => "security",
            Self::System => "system",
            Self::User => "user",
            Self::Import => "import",
        }
    }
}

impl From<&str> for NotificationCategory {
    fn from(value: &str) -> Self {
        match value {
            "backup" => Self::Backup,
            "security" => Self::Security,
            "user" => Self::User,
            "import" => Self::Import,
            _ => Self::System, // Default for "system" and unknown values
        }
    }
}

/// Notification entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: i64,
    /// Target account; `None` broadcasts to every administrator
    pub user_id: Option<i64>,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub category: NotificationCategory,
    /// Dashboard path the notification links to
    pub action_url: Option<String>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if this notification targets all administrators
    #[inline]
    #[must_use]
    pub fn is_broadcast(&self) -> bool {
        self.user_id.is_none()
    }
}

/// Insert payload for a new notification
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: Option<i64>,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub category: NotificationCategory,
    pub action_url: Option<String>,
}

impl NewNotification {
    /// Create a notification addressed to one account
    #[must_use]
    pub fn targeted(
        user_id: i64,
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        category: NotificationCategory,
    ) -> Self {
        Self {
            user_id: Some(user_id),
            title: title.into(),
            message: message.into(),
            kind,
            category,
            action_url: None,
        }
    }

    /// Create a notification visible to every administrator
    #[must_use]
    pub fn broadcast(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        category: NotificationCategory,
    ) -> Self {
        Self {
            user_id: None,
            title: title.into(),
            message: message.into(),
            kind,
            category,
            action_url: None,
        }
    }

    /// Set the dashboard path the notification links to
    #[must_use]
    pub fn with_action_url(mut self, action_url: impl Into<String>) -> Self {
        self.action_url = Some(action_url.into());
        self
    }
}

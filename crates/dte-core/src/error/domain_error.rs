//! Domain error type shared by repositories and services

use thiserror::Error;

/// Broad classification of a [`DomainError`], used when picking an HTTP
/// status at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainErrorKind {
    NotFound,
    Invalid,
    Conflict,
    Storage,
}

/// Errors produced by the domain layer and its repositories
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("No user with id {0}")]
    UserNotFound(i64),

    #[error("No notification with id {0}")]
    NotificationNotFound(i64),

    #[error("Unknown role: {0}")]
    InvalidRole(String),

    #[error("Username already taken")]
    UsernameAlreadyExists,

    #[error("Email already registered")]
    EmailAlreadyExists,

    /// Driver or connection fault, with the original error flattened to text
    /// so the domain layer stays free of sqlx types.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn kind(&self) -> DomainErrorKind {
        match self {
            Self::UserNotFound(_) | Self::NotificationNotFound(_) => DomainErrorKind::NotFound,
            Self::InvalidRole(_) => DomainErrorKind::Invalid,
            Self::UsernameAlreadyExists | Self::EmailAlreadyExists => DomainErrorKind::Conflict,
            Self::Storage(_) => DomainErrorKind::Storage,
        }
    }

    /// Stable machine-readable code for API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::NotificationNotFound(_) => "UNKNOWN_NOTIFICATION",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

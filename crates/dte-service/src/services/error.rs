//! Service layer errors.
//!
//! Thin on purpose: authentication outcomes travel as `AuthResult`, so the
//! fallible surface here is lookups, input checks and whatever the domain
//! layer reports.

use dte_core::{DomainError, DomainErrorKind};
use thiserror::Error;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Domain rule violation or store fault, reported as-is
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Lookup target does not exist; ids are numeric everywhere in this system
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: i64 },

    /// Input rejected before reaching the store
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP status this error maps to at the API boundary
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => match e.kind() {
                DomainErrorKind::NotFound => 404,
                DomainErrorKind::Invalid => 400,
                DomainErrorKind::Conflict => 409,
                DomainErrorKind::Storage => 500,
            },
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
        }
    }

    /// Machine-readable code for API error bodies
    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

//! Domain error types

mod auth_error;
mod domain_error;

pub use auth_error::{AuthError, AuthResult};
pub use domain_error::{DomainError, DomainErrorKind};

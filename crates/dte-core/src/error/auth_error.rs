//! Authentication outcomes
//!
//! Login, registration, and password changes never fail with a transport
//! error; every outcome, including credential-store trouble, is folded into
//! an [`AuthResult`] whose error half carries a stable code and a user-safe
//! message. The dashboard's locale is pt-BR, so the user-facing strings are
//! Portuguese.

use thiserror::Error;

use crate::entities::User;

/// Why an authentication operation did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AuthError {
    #[error("no account matches the identifier")]
    NotFound,

    #[error("account is deactivated")]
    AccountDisabled,

    #[error("account has no local password")]
    SocialOnlyAccount,

    #[error("password verification failed")]
    WrongPassword,

    #[error("current password verification failed")]
    WrongCurrentPassword,

    #[error("username already registered")]
    DuplicateUsername,

    #[error("email already registered")]
    DuplicateEmail,

    #[error("password below the minimum length")]
    WeakPassword,

    #[error("credential store unavailable")]
    StoreUnavailable,
}

impl AuthError {
    /// Stable machine-readable code for API responses
    pub fn code(self) -> &'static str {
        match self {
            Self::NotFound => "USER_NOT_FOUND",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::SocialOnlyAccount => "SOCIAL_ONLY_ACCOUNT",
            Self::WrongPassword => "WRONG_PASSWORD",
            Self::WrongCurrentPassword => "WRONG_CURRENT_PASSWORD",
            Self::DuplicateUsername => "DUPLICATE_USERNAME",
            Self::DuplicateEmail => "DUPLICATE_EMAIL",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
        }
    }

    /// User-safe message shown by the dashboard
    ///
    /// These strings are part of the contract with the frontend; changing
    /// them breaks message matching in existing deployments.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::NotFound => "Usuário não encontrado",
            Self::AccountDisabled => "Conta desativada",
            Self::SocialOnlyAccount => {
                "Este usuário usa login social. Use Google ou GitHub para entrar."
            }
            Self::WrongPassword => "Senha incorreta",
            Self::WrongCurrentPassword => "Senha atual incorreta",
            Self::DuplicateUsername => "Nome de usuário já existe",
            Self::DuplicateEmail => "Email já cadastrado",
            Self::WeakPassword => "A senha deve ter pelo menos 6 caracteres",
            Self::StoreUnavailable => "Database not available",
        }
    }

    /// Check if this is a credential failure (as opposed to a conflict or an
    /// infrastructure problem)
    pub fn is_credential_failure(self) -> bool {
        matches!(
            self,
            Self::NotFound
                | Self::AccountDisabled
                | Self::SocialOnlyAccount
                | Self::WrongPassword
                | Self::WrongCurrentPassword
        )
    }

    /// Check if this is a uniqueness conflict
    pub fn is_conflict(self) -> bool {
        matches!(self, Self::DuplicateUsername | Self::DuplicateEmail)
    }
}

/// Outcome envelope for authentication operations
///
/// Mirrors what the dashboard consumes: a user on success, an error
/// otherwise, never both. Password-change operations succeed without a user
/// payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResult {
    pub user: Option<User>,
    pub error: Option<AuthError>,
}

impl AuthResult {
    /// Successful outcome carrying the authenticated user
    #[must_use]
    pub fn ok(user: User) -> Self {
        Self {
            user: Some(user),
            error: None,
        }
    }

    /// Successful outcome without a user payload
    #[must_use]
    pub fn ok_empty() -> Self {
        Self {
            user: None,
            error: None,
        }
    }

    /// Failed outcome
    #[must_use]
    pub fn err(error: AuthError) -> Self {
        Self {
            user: None,
            error: Some(error),
        }
    }

    /// Check if the operation succeeded
    #[inline]
    #[must_use]
    pub fn success(&self) -> bool {
        self.error.is_none()
    }

    /// User-safe message for the failure, if any
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        self.error.map(AuthError::user_message)
    }
}

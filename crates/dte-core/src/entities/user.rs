//! User entity - represents a dashboard account

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Access role, ordered from least to most privileged
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read-only demonstration access (default for new accounts)
    #[default]
    Demo,
    /// Elected official viewing their own electoral data
    Politico,
    /// Campaign manager
    Gestor,
    /// Full administrative access
    Admin,
}

impl Role {
    /// Get the stored string form
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Demo => "demo",
            Self::Politico => "politico",
            Self::Gestor => "gestor",
            Self::Admin => "admin",
        }
    }

    /// Check for full administrative access
    #[inline]
    #[must_use]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "demo" => Ok(Self::Demo),
            "politico" => Ok(Self::Politico),
            "gestor" => Ok(Self::Gestor),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::InvalidRole(other.to_string())),
        }
    }
}

/// How an account signs in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoginMethod {
    /// Username/password against the credential store
    Local,
    /// External identity provider, by name (e.g. "google", "github")
    OAuth(String),
}

impl LoginMethod {
    /// Get the stored string form
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Local => "local",
            Self::OAuth(provider) => provider,
        }
    }

    /// Check if the account signs in with a local password
    #[inline]
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local)
    }
}

impl From<&str> for LoginMethod {
    fn from(value: &str) -> Self {
        match value {
            "local" => Self::Local,
            provider => Self::OAuth(provider.to_string()),
        }
    }
}

impl fmt::Display for LoginMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity representing a dashboard account
///
/// The password hash is deliberately not a field here; it can only be read
/// through `UserRepository::password_hash`, so no response path can leak it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    /// Stable external identifier, unique across login methods
    pub open_id: String,
    pub username: Option<String>,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub login_method: LoginMethod,
    pub is_active: bool,
    pub last_signed_in: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check for full administrative access
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Check if the account holds at least the given role
    #[inline]
    #[must_use]
    pub fn has_role_at_least(&self, role: Role) -> bool {
        self.role >= role
    }

    /// Check if the account signs in with a local password
    #[inline]
    #[must_use]
    pub fn uses_local_login(&self) -> bool {
        self.login_method.is_local()
    }

    /// Update profile fields
    pub fn set_profile(&mut self, name: String, email: String) {
        self.name = name;
        self.email = email;
        self.updated_at = Utc::now();
    }

    /// Update the access role
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.updated_at = Utc::now();
    }

    /// Activate or deactivate the account
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }
}

/// Insert payload for a new account row
///
/// Carries the password hash only across the repository boundary; the stored
/// entity never does.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub open_id: String,
    pub username: Option<String>,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub login_method: LoginMethod,
    pub password_hash: Option<String>,
}

impl NewUser {
    /// Create a local-login account payload
    #[must_use]
    pub fn local(
        open_id: String,
        username: String,
        name: String,
        email: String,
        password_hash: String,
    ) -> Self {
        Self {
            open_id,
            username: Some(username),
            name,
            email,
            role: Role::default(),
            login_method: LoginMethod::Local,
            password_hash: Some(password_hash),
        }
    }
}

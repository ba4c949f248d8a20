//! Password hashing and verification utilities
//!
//! Uses bcrypt with a work factor of 12, matching every hash already present
//! in the credential store. Verification never faults: a malformed stored
//! hash counts as a failed match, not an error.

use crate::error::{AppError, AppResult};

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hash a password with the default work factor (12)
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> AppResult<String> {
    PasswordHasher::new().hash(password)
}

/// Verify a password against a stored hash
///
/// A malformed or truncated hash yields `false`; login paths must not fault
/// on bad store contents.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

/// Check the password length policy
#[must_use]
pub fn meets_password_policy(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Password hasher for dependency injection
///
/// Carries the bcrypt work factor so tests can run at the cheapest cost
/// while production stays at 12.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher {
    /// Create a hasher with the store's work factor (12)
    #[must_use]
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a hasher with an explicit work factor
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    /// Get the configured work factor
    #[must_use]
    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a password
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> AppResult<String> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Password hashing failed: {e}")))
    }

    /// Verify a password against a stored hash
    #[must_use]
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        verify_password(password, hash)
    }
}

//! Authentication service
//!
//! Registration, credential checks, and password management. Every operation
//! returns an `AuthResult` envelope; store faults are recovered into
//! `AuthError::StoreUnavailable` so no infrastructure error escapes as a
//! Rust error.

use chrono::Utc;
use dte_core::entities::{NewActivity, NewUser};
use dte_core::error::{AuthError, AuthResult, DomainError};
use dte_core::traits::UserRepository;
use dte_common::auth::meets_password_policy;
use tracing::{info, instrument, warn};

use crate::dto::RegisterRequest;

use super::activity::ActivityService;
use super::context::ServiceContext;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new local account
    ///
    /// The duplicate pre-checks are advisory; the UNIQUE constraints on the
    /// store arbitrate concurrent registrations and their violations map to
    /// the same field-specific errors.
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> AuthResult {
        if !meets_password_policy(&request.password) {
            return AuthResult::err(AuthError::WeakPassword);
        }

        match self.ctx.user_repo().find_by_identifier(&request.username).await {
            Ok(Some(existing)) if existing.username.as_deref() == Some(request.username.as_str()) => {
                warn!("registration failed: username taken");
                return AuthResult::err(AuthError::DuplicateUsername);
            }
            Ok(_) => {}
            Err(e) => return self.store_fault("register username lookup", &e),
        }
        match self.ctx.user_repo().find_by_identifier(&request.email).await {
            Ok(Some(existing)) if existing.email == request.email => {
                warn!("registration failed: email taken");
                return AuthResult::err(AuthError::DuplicateEmail);
            }
            Ok(_) => {}
            Err(e) => return self.store_fault("register email lookup", &e),
        }

        let password_hash = match self.hash_blocking(request.password).await {
            Ok(hash) => hash,
            Err(result) => return result,
        };

        let open_id = format!(
            "local_{}_{}",
            request.username,
            Utc::now().timestamp_millis()
        );
        let new_user = NewUser::local(
            open_id,
            request.username,
            request.name,
            request.email,
            password_hash,
        );

        match self.ctx.user_repo().create(&new_user).await {
            Ok(user) => {
                info!(user_id = user.id, "user registered");
                ActivityService::new(self.ctx)
                    .record(NewActivity::new(
                        user.id,
                        "register",
                        format!("{} criou uma conta", user.name),
                    ))
                    .await;
                AuthResult::ok(user)
            }
            Err(DomainError::UsernameAlreadyExists) => AuthResult::err(AuthError::DuplicateUsername),
            Err(DomainError::EmailAlreadyExists) => AuthResult::err(AuthError::DuplicateEmail),
            Err(e) => self.store_fault("register insert", &e),
        }
    }

    /// Check a credential pair against the store
    ///
    /// The identifier matches the username column first, the email column
    /// second. Account state is checked before any hash work so a disabled
    /// account never pays for a bcrypt round.
    #[instrument(skip(self, password), fields(identifier = %identifier))]
    pub async fn authenticate(&self, identifier: &str, password: &str) -> AuthResult {
        let user = match self.ctx.user_repo().find_by_identifier(identifier).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("login failed: unknown identifier");
                return AuthResult::err(AuthError::NotFound);
            }
            Err(e) => return self.store_fault("authenticate lookup", &e),
        };

        if !user.is_active {
            warn!(user_id = user.id, "login failed: account disabled");
            return AuthResult::err(AuthError::AccountDisabled);
        }

        let hash = match self.ctx.user_repo().password_hash(user.id).await {
            Ok(Some(hash)) => hash,
            Ok(None) => {
                warn!(user_id = user.id, "login failed: social-only account");
                return AuthResult::err(AuthError::SocialOnlyAccount);
            }
            Err(e) => return self.store_fault("authenticate hash fetch", &e),
        };

        if !self.verify_blocking(password.to_string(), hash).await {
            warn!(user_id = user.id, "login failed: wrong password");
            return AuthResult::err(AuthError::WrongPassword);
        }

        // Refresh the sign-in stamp; a persist failure never fails the login
        if let Err(e) = self.ctx.user_repo().touch_last_signed_in(user.id).await {
            warn!(user_id = user.id, error = %e, "failed to refresh last_signed_in");
        }

        info!(user_id = user.id, "user authenticated");
        ActivityService::new(self.ctx)
            .record(NewActivity::new(
                user.id,
                "login",
                format!("{} fez login", user.name),
            ))
            .await;

        AuthResult::ok(user)
    }

    /// Change the caller's own password
    ///
    /// The current password is required once a local hash exists; a
    /// social-only account sets its first local password without one. Only
    /// the hash is persisted, the login method is left alone.
    #[instrument(skip(self, current_password, new_password))]
    pub async fn change_password(
        &self,
        user_id: i64,
        current_password: Option<&str>,
        new_password: &str,
    ) -> AuthResult {
        let user = match self.ctx.user_repo().find_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return AuthResult::err(AuthError::NotFound),
            Err(e) => return self.store_fault("change_password lookup", &e),
        };

        if !meets_password_policy(new_password) {
            return AuthResult::err(AuthError::WeakPassword);
        }

        match self.ctx.user_repo().password_hash(user.id).await {
            Ok(Some(hash)) => {
                let Some(current) = current_password else {
                    return AuthResult::err(AuthError::WrongCurrentPassword);
                };
                if !self.verify_blocking(current.to_string(), hash).await {
                    warn!(user_id = user.id, "password change failed: wrong current password");
                    return AuthResult::err(AuthError::WrongCurrentPassword);
                }
            }
            Ok(None) => {}
            Err(e) => return self.store_fault("change_password hash fetch", &e),
        }

        let new_hash = match self.hash_blocking(new_password.to_string()).await {
            Ok(hash) => hash,
            Err(result) => return result,
        };

        if let Err(e) = self.ctx.user_repo().update_password(user.id, &new_hash).await {
            return self.store_fault("change_password persist", &e);
        }

        info!(user_id = user.id, "password changed");
        ActivityService::new(self.ctx)
            .record(NewActivity::new(
                user.id,
                "password_change",
                format!("{} alterou a senha", user.name),
            ))
            .await;

        AuthResult::ok_empty()
    }

    /// Reset a password on behalf of an administrator
    ///
    /// No current-password check, and the account is switched to local login
    /// so the new credential is usable immediately.
    #[instrument(skip(self, new_password))]
    pub async fn set_password_admin(&self, user_id: i64, new_password: &str) -> AuthResult {
        let user = match self.ctx.user_repo().find_by_id(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return AuthResult::err(AuthError::NotFound),
            Err(e) => return self.store_fault("set_password_admin lookup", &e),
        };

        if !meets_password_policy(new_password) {
            return AuthResult::err(AuthError::WeakPassword);
        }

        let new_hash = match self.hash_blocking(new_password.to_string()).await {
            Ok(hash) => hash,
            Err(result) => return result,
        };

        match self.ctx.user_repo().set_password_local(user.id, &new_hash).await {
            Ok(()) => {}
            Err(DomainError::UserNotFound(_)) => return AuthResult::err(AuthError::NotFound),
            Err(e) => return self.store_fault("set_password_admin persist", &e),
        }

        info!(user_id = user.id, "password reset by admin");
        ActivityService::new(self.ctx)
            .record(NewActivity::new(
                user.id,
                "password_change",
                format!("Senha de {} redefinida por administrador", user.name),
            ))
            .await;

        AuthResult::ok_empty()
    }

    // === Internal helpers ===

    fn store_fault(&self, operation: &str, err: &DomainError) -> AuthResult {
        warn!(operation, error = %err, "credential store unavailable");
        AuthResult::err(AuthError::StoreUnavailable)
    }

    /// Run a bcrypt hash on the blocking pool
    async fn hash_blocking(&self, password: String) -> Result<String, AuthResult> {
        let hasher = self.ctx.password_hasher().clone();
        match tokio::task::spawn_blocking(move || hasher.hash(&password)).await {
            Ok(Ok(hash)) => Ok(hash),
            Ok(Err(e)) => {
                warn!(error = %e, "password hashing failed");
                Err(AuthResult::err(AuthError::StoreUnavailable))
            }
            Err(e) => {
                warn!(error = %e, "password hashing task failed");
                Err(AuthResult::err(AuthError::StoreUnavailable))
            }
        }
    }

    /// Run a bcrypt verification on the blocking pool
    async fn verify_blocking(&self, password: String, hash: String) -> bool {
        let hasher = self.ctx.password_hasher().clone();
        match tokio::task::spawn_blocking(move || hasher.verify(&password, &hash)).await {
            Ok(valid) => valid,
            Err(e) => {
                warn!(error = %e, "password verification task failed");
                false
            }
        }
    }
}

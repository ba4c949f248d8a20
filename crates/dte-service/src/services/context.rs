//! Dependency wiring shared by every service.
//!
//! A [`ServiceContext`] is assembled once at startup and borrowed by the
//! per-request service values; swapping a repository for an in-memory fake
//! is how the service tests run without PostgreSQL.

use std::sync::Arc;

use dte_common::auth::{PasswordHasher, SessionTokenService};
use dte_core::traits::{ActivityRepository, NotificationRepository, UserRepository};
use dte_db::PgPool;

use super::error::{ServiceError, ServiceResult};

/// Everything the services depend on: the three repositories, the password
/// hasher and the session token signer. The raw pool rides along for the
/// readiness probe.
#[derive(Clone)]
pub struct ServiceContext {
    pool: PgPool,
    user_repo: Arc<dyn UserRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    password_hasher: Arc<PasswordHasher>,
    session_tokens: Arc<SessionTokenService>,
}

impl ServiceContext {
    /// Connection pool, exposed for the readiness probe only
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn activity_repo(&self) -> &dyn ActivityRepository {
        self.activity_repo.as_ref()
    }

    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    pub fn password_hasher(&self) -> &PasswordHasher {
        self.password_hasher.as_ref()
    }

    pub fn session_tokens(&self) -> &SessionTokenService {
        self.session_tokens.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The repositories are trait objects without Debug; show the rest.
        f.debug_struct("ServiceContext")
            .field("password_hasher", &self.password_hasher)
            .field("session_tokens", &self.session_tokens)
            .finish_non_exhaustive()
    }
}

/// Collects the dependencies and checks nothing was forgotten.
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    activity_repo: Option<Arc<dyn ActivityRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    password_hasher: Option<Arc<PasswordHasher>>,
    session_tokens: Option<Arc<SessionTokenService>>,
}

fn require<T>(field: Option<T>, name: &str) -> ServiceResult<T> {
    field.ok_or_else(|| ServiceError::validation(format!("{name} is required")))
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn activity_repo(mut self, repo: Arc<dyn ActivityRepository>) -> Self {
        self.activity_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn password_hasher(mut self, hasher: Arc<PasswordHasher>) -> Self {
        self.password_hasher = Some(hasher);
        self
    }

    pub fn session_tokens(mut self, service: Arc<SessionTokenService>) -> Self {
        self.session_tokens = Some(service);
        self
    }

    /// # Errors
    /// `ServiceError::Validation` naming the first missing dependency.
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            pool: require(self.pool, "pool")?,
            user_repo: require(self.user_repo, "user_repo")?,
            activity_repo: require(self.activity_repo, "activity_repo")?,
            notification_repo: require(self.notification_repo, "notification_repo")?,
            password_hasher: require(self.password_hasher, "password_hasher")?,
            session_tokens: require(self.session_tokens, "session_tokens")?,
        })
    }
}

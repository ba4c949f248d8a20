//! In-memory repository doubles for service unit tests
//!
//! Mirror the Postgres repositories' contracts closely enough for the
//! authentication and admin flows: identifier precedence, duplicate
//! detection, scope checks.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use dte_common::auth::{PasswordHasher, SessionTokenService};
use dte_core::entities::{
    Activity, NewActivity, NewNotification, NewUser, Notification, Role, User,
};
use dte_core::error::DomainError;
use dte_core::traits::{
    ActivityQuery, ActivityRepository, NotificationRepository, NotificationScope, RepoResult,
    UserRepository,
};
use dte_db::PgPool;

use crate::services::{ServiceContext, ServiceContextBuilder};

/// Build a full service context over in-memory stores
///
/// The pool is lazy and never connected; services reach storage only
/// through the repository traits.
pub(crate) fn test_context() -> ServiceContext {
    let pool =
        PgPool::connect_lazy("postgresql://postgres@localhost:5432/never_used").expect("lazy pool");

    ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(Arc::new(MemoryUserRepository::new()))
        .activity_repo(Arc::new(MemoryActivityRepository::new()))
        .notification_repo(Arc::new(MemoryNotificationRepository::new()))
        // Minimum bcrypt cost keeps the hashing tests fast
        .password_hasher(Arc::new(PasswordHasher::with_cost(4)))
        .session_tokens(Arc::new(SessionTokenService::new(
            "unit-test-secret-key-of-sufficient-length",
            3600,
        )))
        .build()
        .expect("test context")
}

// ============================================================================
// Users
// ============================================================================

struct StoredUser {
    user: User,
    password_hash: Option<String>,
}

pub(crate) struct MemoryUserRepository {
    next_id: AtomicI64,
    rows: Mutex<Vec<StoredUser>>,
}

impl MemoryUserRepository {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            rows: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<StoredUser>> {
        self.rows.lock().unwrap()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .iter()
            .find(|r| r.user.id == id)
            .map(|r| r.user.clone()))
    }

    async fn find_by_open_id(&self, open_id: &str) -> RepoResult<Option<User>> {
        Ok(self
            .lock()
            .iter()
            .find(|r| r.user.open_id == open_id)
            .map(|r| r.user.clone()))
    }

    async fn find_by_identifier(&self, identifier: &str) -> RepoResult<Option<User>> {
        let rows = self.lock();
        let found = rows
            .iter()
            .find(|r| r.user.username.as_deref() == Some(identifier))
            .or_else(|| rows.iter().find(|r| r.user.email == identifier));
        Ok(found.map(|r| r.user.clone()))
    }

    async fn list_all(&self) -> RepoResult<Vec<User>> {
        let mut users: Vec<User> = self.lock().iter().map(|r| r.user.clone()).collect();
        users.reverse();
        Ok(users)
    }

    async fn create(&self, new_user: &NewUser) -> RepoResult<User> {
        let mut rows = self.lock();
        if new_user.username.is_some()
            && rows.iter().any(|r| r.user.username == new_user.username)
        {
            return Err(DomainError::UsernameAlreadyExists);
        }
        if rows.iter().any(|r| r.user.email == new_user.email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        if rows.iter().any(|r| r.user.open_id == new_user.open_id) {
            return Err(DomainError::Storage("duplicate open_id".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            open_id: new_user.open_id.clone(),
            username: new_user.username.clone(),
            name: new_user.name.clone(),
            email: new_user.email.clone(),
            role: new_user.role,
            login_method: new_user.login_method.clone(),
            is_active: true,
            last_signed_in: None,
            created_at: now,
            updated_at: now,
        };
        rows.push(StoredUser {
            user: user.clone(),
            password_hash: new_user.password_hash.clone(),
        });
        Ok(user)
    }

    async fn update_profile(&self, id: i64, name: &str, email: &str) -> RepoResult<User> {
        let mut rows = self.lock();
        if rows.iter().any(|r| r.user.id != id && r.user.email == email) {
            return Err(DomainError::EmailAlreadyExists);
        }
        let row = rows
            .iter_mut()
            .find(|r| r.user.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        row.user.name = name.to_string();
        row.user.email = email.to_string();
        row.user.updated_at = Utc::now();
        Ok(row.user.clone())
    }

    async fn set_role(&self, id: i64, role: Role) -> RepoResult<User> {
        let mut rows = self.lock();
        let row = rows
            .iter_mut()
            .find(|r| r.user.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        row.user.role = role;
        row.user.updated_at = Utc::now();
        Ok(row.user.clone())
    }

    async fn set_active(&self, id: i64, active: bool) -> RepoResult<User> {
        let mut rows = self.lock();
        let row = rows
            .iter_mut()
            .find(|r| r.user.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        row.user.is_active = active;
        row.user.updated_at = Utc::now();
        Ok(row.user.clone())
    }

    async fn password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        Ok(self
            .lock()
            .iter()
            .find(|r| r.user.id == id)
            .and_then(|r| r.password_hash.clone()))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()> {
        let mut rows = self.lock();
        let row = rows
            .iter_mut()
            .find(|r| r.user.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        row.password_hash = Some(password_hash.to_string());
        row.user.updated_at = Utc::now();
        Ok(())
    }

    async fn set_password_local(&self, id: i64, password_hash: &str) -> RepoResult<()> {
        let mut rows = self.lock();
        let row = rows
            .iter_mut()
            .find(|r| r.user.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        row.password_hash = Some(password_hash.to_string());
        row.user.login_method = dte_core::entities::LoginMethod::Local;
        row.user.updated_at = Utc::now();
        Ok(())
    }

    async fn touch_last_signed_in(&self, id: i64) -> RepoResult<()> {
        let mut rows = self.lock();
        let row = rows
            .iter_mut()
            .find(|r| r.user.id == id)
            .ok_or(DomainError::UserNotFound(id))?;
        row.user.last_signed_in = Some(Utc::now());
        Ok(())
    }
}

// ============================================================================
// Activities
// ============================================================================

pub(crate) struct MemoryActivityRepository {
    next_id: AtomicI64,
    rows: Mutex<Vec<Activity>>,
}

impl MemoryActivityRepository {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            rows: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ActivityRepository for MemoryActivityRepository {
    async fn create(&self, activity: &NewActivity) -> RepoResult<Activity> {
        let stored = Activity {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: activity.user_id,
            activity_type: activity.activity_type.clone(),
            description: activity.description.clone(),
            metadata: activity.metadata.clone(),
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find(&self, query: &ActivityQuery) -> RepoResult<Vec<Activity>> {
        let rows = self.rows.lock().unwrap();
        let needle = query.search.as_ref().map(|s| s.to_lowercase());
        let matches: Vec<Activity> = rows
            .iter()
            .rev()
            .filter(|a| query.user_id.is_none_or(|id| a.user_id == Some(id)))
            .filter(|a| {
                query
                    .activity_type
                    .as_ref()
                    .is_none_or(|t| &a.activity_type == t)
            })
            .filter(|a| {
                needle
                    .as_ref()
                    .is_none_or(|n| a.description.to_lowercase().contains(n))
            })
            .filter(|a| query.since.is_none_or(|since| a.created_at >= since))
            .filter(|a| query.until.is_none_or(|until| a.created_at <= until))
            .take(usize::try_from(query.limit.clamp(1, 500)).unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(matches)
    }

    async fn distinct_types(&self) -> RepoResult<Vec<String>> {
        let rows = self.rows.lock().unwrap();
        let mut types: Vec<String> = rows.iter().map(|a| a.activity_type.clone()).collect();
        types.sort();
        types.dedup();
        Ok(types)
    }
}

// ============================================================================
// Notifications
// ============================================================================

pub(crate) struct MemoryNotificationRepository {
    next_id: AtomicI64,
    rows: Mutex<Vec<Notification>>,
}

impl MemoryNotificationRepository {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            rows: Mutex::new(Vec::new()),
        }
    }
}

fn in_scope(notification: &Notification, scope: NotificationScope) -> bool {
    match notification.user_id {
        Some(user_id) => user_id == scope.user_id,
        None => scope.include_broadcast,
    }
}

#[async_trait]
impl NotificationRepository for MemoryNotificationRepository {
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification> {
        let stored = Notification {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id: notification.user_id,
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind,
            category: notification.category,
            action_url: notification.action_url.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn find(
        &self,
        scope: NotificationScope,
        unread_only: bool,
        limit: i64,
    ) -> RepoResult<Vec<Notification>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .filter(|n| in_scope(n, scope))
            .filter(|n| !unread_only || !n.is_read)
            .take(usize::try_from(limit.max(0)).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn unread_count(&self, scope: NotificationScope) -> RepoResult<i64> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|n| in_scope(n, scope) && !n.is_read)
            .count() as i64)
    }

    async fn mark_read(&self, id: i64, scope: NotificationScope) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|n| n.id == id && in_scope(n, scope)) {
            Some(n) => {
                n.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, scope: NotificationScope) -> RepoResult<u64> {
        let mut rows = self.rows.lock().unwrap();
        let mut changed = 0;
        for n in rows.iter_mut().filter(|n| in_scope(n, scope)) {
            if !n.is_read {
                n.is_read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn delete(&self, id: i64, scope: NotificationScope) -> RepoResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|n| !(n.id == id && in_scope(n, scope)));
        Ok(rows.len() < before)
    }
}

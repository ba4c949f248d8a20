//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use dte_core::entities::{NewUser, Role, User};
use dte_core::traits::{RepoResult, UserRepository};

use crate::models::UserRow;

use dte_core::error::DomainError;

use super::error::{map_user_unique_violation, storage_error};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, open_id, username, name, email, password_hash, role, login_method,
                   is_active, last_signed_in, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_open_id(&self, open_id: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, open_id, username, name, email, password_hash, role, login_method,
                   is_active, last_signed_in, created_at, updated_at
            FROM users
            WHERE open_id = $1
            ",
        )
        .bind(open_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_identifier(&self, identifier: &str) -> RepoResult<Option<User>> {
        // Single lookup matching either column; an exact username match is
        // ranked above an email match so the precedence is deterministic even
        // when one account's email equals another account's username.
        let result = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, open_id, username, name, email, password_hash, role, login_method,
                   is_active, last_signed_in, created_at, updated_at
            FROM users
            WHERE username = $1 OR email = $1
            ORDER BY (username = $1) DESC NULLS LAST
            LIMIT 1
            ",
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn list_all(&self) -> RepoResult<Vec<User>> {
        let result = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, open_id, username, name, email, password_hash, role, login_method,
                   is_active, last_signed_in, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self, new_user), fields(username = ?new_user.username, email = %new_user.email))]
    async fn create(&self, new_user: &NewUser) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO users (open_id, username, name, email, password_hash, role, login_method, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
            RETURNING id, open_id, username, name, email, password_hash, role, login_method,
                      is_active, last_signed_in, created_at, updated_at
            ",
        )
        .bind(&new_user.open_id)
        .bind(&new_user.username)
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role.as_str())
        .bind(new_user.login_method.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_unique_violation)?;

        Ok(User::from(result))
    }

    #[instrument(skip(self))]
    async fn update_profile(&self, id: i64, name: &str, email: &str) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserRow>(
            r"
            UPDATE users
            SET name = $2, email = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, open_id, username, name, email, password_hash, role, login_method,
                      is_active, last_signed_in, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_unique_violation)?;

        result.map(User::from).ok_or(DomainError::UserNotFound(id))
    }

    #[instrument(skip(self))]
    async fn set_role(&self, id: i64, role: Role) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserRow>(
            r"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, open_id, username, name, email, password_hash, role, login_method,
                      is_active, last_signed_in, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        result.map(User::from).ok_or(DomainError::UserNotFound(id))
    }

    #[instrument(skip(self))]
    async fn set_active(&self, id: i64, active: bool) -> RepoResult<User> {
        let result = sqlx::query_as::<_, UserRow>(
            r"
            UPDATE users
            SET is_active = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, open_id, username, name, email, password_hash, role, login_method,
                      is_active, last_signed_in, created_at, updated_at
            ",
        )
        .bind(id)
        .bind(active)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        result.map(User::from).ok_or(DomainError::UserNotFound(id))
    }

    #[instrument(skip(self))]
    async fn password_hash(&self, id: i64) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, Option<String>>(
            r"
            SELECT password_hash FROM users WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        // Outer None: no such user. Inner None: social-only account.
        Ok(result.flatten())
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: i64, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self, password_hash))]
    async fn set_password_local(&self, id: i64, password_hash: &str) -> RepoResult<()> {
        // Administrative reset also flips the login method so the account can
        // sign in with the new password immediately.
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, login_method = 'local', updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn touch_last_signed_in(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET last_signed_in = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::UserNotFound(id));
        }

        Ok(())
    }
}

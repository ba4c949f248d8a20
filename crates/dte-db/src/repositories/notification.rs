//! PostgreSQL implementation of NotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use dte_core::entities::{NewNotification, Notification};
use dte_core::traits::{NotificationRepository, NotificationScope, RepoResult};

use crate::models::NotificationRow;

use super::error::storage_error;

/// PostgreSQL implementation of NotificationRepository
///
/// Every query is bounded by the viewer's scope: their own rows, plus
/// broadcast rows when the scope allows it. Row ids alone never grant
/// access.
#[derive(Clone)]
pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    /// Create a new PgNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    #[instrument(skip(self, notification), fields(category = %notification.category.as_str()))]
    async fn create(&self, notification: &NewNotification) -> RepoResult<Notification> {
        let result = sqlx::query_as::<_, NotificationRow>(
            r"
            INSERT INTO notifications (user_id, title, message, kind, category, action_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, title, message, kind, category, action_url, is_read, created_at
            ",
        )
        .bind(notification.user_id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.kind.as_str())
        .bind(notification.category.as_str())
        .bind(&notification.action_url)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(Notification::from(result))
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        scope: NotificationScope,
        unread_only: bool,
        limit: i64,
    ) -> RepoResult<Vec<Notification>> {
        let result = sqlx::query_as::<_, NotificationRow>(
            r"
            SELECT id, user_id, title, message, kind, category, action_url, is_read, created_at
            FROM notifications
            WHERE (user_id = $1 OR ($2 AND user_id IS NULL))
              AND (NOT $3 OR is_read = FALSE)
            ORDER BY created_at DESC
            LIMIT $4
            ",
        )
        .bind(scope.user_id)
        .bind(scope.include_broadcast)
        .bind(unread_only)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.into_iter().map(Notification::from).collect())
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, scope: NotificationScope) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM notifications
            WHERE (user_id = $1 OR ($2 AND user_id IS NULL))
              AND is_read = FALSE
            ",
        )
        .bind(scope.user_id)
        .bind(scope.include_broadcast)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn mark_read(&self, id: i64, scope: NotificationScope) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE notifications
            SET is_read = TRUE
            WHERE id = $1
              AND (user_id = $2 OR ($3 AND user_id IS NULL))
            ",
        )
        .bind(id)
        .bind(scope.user_id)
        .bind(scope.include_broadcast)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn mark_all_read(&self, scope: NotificationScope) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE notifications
            SET is_read = TRUE
            WHERE (user_id = $1 OR ($2 AND user_id IS NULL))
              AND is_read = FALSE
            ",
        )
        .bind(scope.user_id)
        .bind(scope.include_broadcast)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64, scope: NotificationScope) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM notifications
            WHERE id = $1
              AND (user_id = $2 OR ($3 AND user_id IS NULL))
            ",
        )
        .bind(id)
        .bind(scope.user_id)
        .bind(scope.include_broadcast)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}

//! PostgreSQL implementation of ActivityRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use dte_core::entities::{Activity, NewActivity};
use dte_core::traits::{ActivityQuery, ActivityRepository, RepoResult};

use crate::models::ActivityRow;

use super::error::storage_error;

/// Upper bound on audit page size, applied even when callers ask for more
const MAX_ACTIVITY_LIMIT: i64 = 500;

/// PostgreSQL implementation of ActivityRepository
#[derive(Clone)]
pub struct PgActivityRepository {
    pool: PgPool,
}

impl PgActivityRepository {
    /// Create a new PgActivityRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityRepository for PgActivityRepository {
    #[instrument(skip(self, activity), fields(activity_type = %activity.activity_type))]
    async fn create(&self, activity: &NewActivity) -> RepoResult<Activity> {
        let result = sqlx::query_as::<_, ActivityRow>(
            r"
            INSERT INTO activities (user_id, activity_type, description, metadata)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, activity_type, description, metadata, created_at
            ",
        )
        .bind(activity.user_id)
        .bind(&activity.activity_type)
        .bind(&activity.description)
        .bind(&activity.metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(Activity::from(result))
    }

    #[instrument(skip(self, query))]
    async fn find(&self, query: &ActivityQuery) -> RepoResult<Vec<Activity>> {
        let limit = query.limit.clamp(1, MAX_ACTIVITY_LIMIT);

        let result = sqlx::query_as::<_, ActivityRow>(
            r"
            SELECT id, user_id, activity_type, description, metadata, created_at
            FROM activities
            WHERE ($1::BIGINT IS NULL OR user_id = $1)
              AND ($2::TEXT IS NULL OR activity_type = $2)
              AND ($3::TEXT IS NULL OR description ILIKE '%' || $3 || '%')
              AND ($4::TIMESTAMPTZ IS NULL OR created_at >= $4)
              AND ($5::TIMESTAMPTZ IS NULL OR created_at <= $5)
            ORDER BY created_at DESC
            LIMIT $6
            ",
        )
        .bind(query.user_id)
        .bind(&query.activity_type)
        .bind(&query.search)
        .bind(query.since)
        .bind(query.until)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.into_iter().map(Activity::from).collect())
    }

    #[instrument(skip(self))]
    async fn distinct_types(&self) -> RepoResult<Vec<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT DISTINCT activity_type FROM activities ORDER BY activity_type
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result)
    }
}

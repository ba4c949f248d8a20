//! PostgreSQL connection pool management

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);
const IDLE_TIMEOUT: Duration = Duration::from_secs(300);
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Connection URL and pool bounds.
///
/// Timeouts are a fixed crate policy; only the URL and sizing vary per
/// deployment.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    url: String,
    max_connections: u32,
    min_connections: u32,
}

impl PoolConfig {
    /// Pool bounds for a database URL.
    ///
    /// sqlx misbehaves when the floor exceeds the ceiling, so
    /// `min_connections` is clamped to `max_connections`.
    pub fn new(url: impl Into<String>, max_connections: u32, min_connections: u32) -> Self {
        Self {
            url: url.into(),
            max_connections,
            min_connections: min_connections.min(max_connections),
        }
    }
}

/// Open a PostgreSQL pool with the crate's timeout policy
pub async fn create_pool(config: &PoolConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .max_lifetime(MAX_LIFETIME)
        .connect(&config.url)
        .await
}

/// Apply pending migrations from the crate's migrations directory
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Round-trip the database to confirm it answers queries
pub async fn check_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
}

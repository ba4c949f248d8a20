//! Pool construction, migrations and the connectivity probe

mod postgres;

pub use postgres::{check_connection, create_pool, run_migrations, PoolConfig};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;

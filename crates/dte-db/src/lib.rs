//! # dte-db
//!
//! PostgreSQL persistence for the dashboard: SQLx implementations of the
//! repository traits from `dte-core`, the row structs and mappers behind
//! them, pool construction and the embedded migrations (`migrations/`).
//!
//! ```rust,ignore
//! use dte_core::UserRepository;
//! use dte_db::{create_pool, PgUserRepository, PoolConfig};
//!
//! async fn example(url: &str) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::new(url, 20, 5)).await?;
//!     let users = PgUserRepository::new(pool);
//!     let found = users.find_by_open_id("12345678901").await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{check_connection, create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgActivityRepository, PgNotificationRepository, PgUserRepository};

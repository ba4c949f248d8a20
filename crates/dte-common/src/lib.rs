//! # dte-common
//!
//! Infrastructure shared by every other crate: environment configuration,
//! the application error type, password hashing, session tokens and
//! tracing setup. Depends on nothing else in the workspace.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    hash_password, meets_password_policy, verify_password, PasswordHasher, SessionClaims,
    SessionTokenService, MIN_PASSWORD_LEN,
};
pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, PasswordConfig,
    RateLimitConfig, ServerConfig, SessionConfig,
};
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing, TracingConfig};

//! Environment-driven application configuration

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment, PasswordConfig,
    RateLimitConfig, ServerConfig, SessionConfig,
};

//! Environment-driven configuration.
//!
//! `AppConfig::from_env` is the single entry point. A `.env` file is loaded
//! first so local development needs no exported shell variables; anything
//! not set falls back to the defaults below.

use std::env;
use std::str::FromStr;

const DEFAULT_APP_NAME: &str = "dte-server";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_MIN_CONNECTIONS: u32 = 5;
/// Seven days; the token TTL is the whole lifetime of a session
const DEFAULT_SESSION_TTL_SECS: i64 = 604_800;
/// Work factor of every hash already in the credential store
const DEFAULT_BCRYPT_COST: u32 = 12;
const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;
const DEFAULT_BURST: u32 = 50;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub password: PasswordConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" => Ok(Self::Production),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Bind address in `host:port` form
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database pool configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Session token and cookie configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Signing secret for session tokens; at least 32 characters
    pub secret: String,
    /// Session lifetime in seconds
    pub ttl_secs: i64,
    /// Send the cookie with the Secure attribute
    pub cookie_secure: bool,
    /// Optional Domain attribute for the cookie
    pub cookie_domain: Option<String>,
}

/// Password hashing configuration
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    pub bcrypt_cost: u32,
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Read an env var and parse it, falling back to `default` when the
/// variable is unset or unparsable
fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error when `DATABASE_URL` or `SESSION_SECRET` is missing,
    /// when the secret is too short, or when `BCRYPT_COST` is outside the
    /// range bcrypt accepts
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let secret =
            env::var("SESSION_SECRET").map_err(|_| ConfigError::MissingVar("SESSION_SECRET"))?;
        if secret.len() < 32 {
            return Err(ConfigError::InvalidValue(
                "SESSION_SECRET",
                "must be at least 32 characters".to_string(),
            ));
        }

        let bcrypt_cost = env_parse("BCRYPT_COST", DEFAULT_BCRYPT_COST);
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue(
                "BCRYPT_COST",
                "must be between 4 and 31".to_string(),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: env::var("APP_NAME").unwrap_or_else(|_| DEFAULT_APP_NAME.to_string()),
                env: env::var("APP_ENV")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: env::var("API_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
                port: env_parse("API_PORT", DEFAULT_PORT),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: env_parse("DATABASE_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
                min_connections: env_parse("DATABASE_MIN_CONNECTIONS", DEFAULT_DB_MIN_CONNECTIONS),
            },
            session: SessionConfig {
                secret,
                ttl_secs: env_parse("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS),
                cookie_secure: env_parse("COOKIE_SECURE", true),
                cookie_domain: env::var("COOKIE_DOMAIN").ok().filter(|s| !s.is_empty()),
            },
            password: PasswordConfig { bcrypt_cost },
            rate_limit: RateLimitConfig {
                requests_per_second: env_parse(
                    "RATE_LIMIT_REQUESTS_PER_SECOND",
                    DEFAULT_REQUESTS_PER_SECOND,
                ),
                burst: env_parse("RATE_LIMIT_BURST", DEFAULT_BURST),
            },
            cors: CorsConfig {
                allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                    .ok()
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

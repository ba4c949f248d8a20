//! Session token utilities
//!
//! Signed, stateless session tokens carried by the session cookie. There is
//! a single token kind; logout clears the cookie instead of revoking server
//! state, so the TTL is the whole lifetime of a session.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (the account's stable `open_id`)
    pub sub: String,
    /// Session identifier, fresh per login
    pub sid: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Get the account's stable external identifier
    #[must_use]
    pub fn open_id(&self) -> &str {
        &self.sub
    }

    /// Check if the token is past its expiry
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Service for issuing and verifying session tokens
#[derive(Clone)]
pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl SessionTokenService {
    /// Create a new service with the given signing secret and session TTL
    #[must_use]
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Get the configured session TTL in seconds
    #[must_use]
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a session token for an account
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, open_id: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: open_id.to_string(),
            sid: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_secs)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::internal(anyhow::anyhow!("Failed to encode session token")))
    }

    /// Decode and validate a session token
    ///
    /// # Errors
    /// Returns `TokenExpired` for an expired signature, `InvalidToken` for
    /// anything else wrong with the token
    pub fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        let validation = Validation::default();

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    _ => AppError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for SessionTokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenService")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

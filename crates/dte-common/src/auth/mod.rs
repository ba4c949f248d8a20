//! Password hashing and session token signing

mod password;
mod session_token;

pub use password::{
    hash_password, meets_password_policy, verify_password, PasswordHasher, MIN_PASSWORD_LEN,
};
pub use session_token::{SessionClaims, SessionTokenService};

//! Session cookie construction
//!
//! The session token travels in a single cookie. Handlers buffer cookie
//! changes in the request's `CookieJar` and return the jar; axum flushes
//! every buffered directive as a `Set-Cookie` header once the handler
//! completes.

use cookie::time::{Duration, OffsetDateTime};
use cookie::{Cookie, SameSite};
use dte_common::SessionConfig;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "dte_session";

/// Build the session cookie carrying a freshly issued token
///
/// HttpOnly keeps the token away from page scripts; SameSite=Lax still sends
/// it on top-level navigations so dashboard links keep working.
pub fn session_cookie(token: String, config: &SessionConfig) -> Cookie<'static> {
    let mut builder = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(config.ttl_secs));

    if let Some(domain) = &config.cookie_domain {
        builder = builder.domain(domain.clone());
    }

    builder.build()
}

/// Build the cookie that removes the session
///
/// Attributes must match the ones used when setting the cookie or browsers
/// treat it as a different cookie and keep the old one. Expiry at the Unix
/// epoch plus a negative Max-Age covers both removal mechanisms.
pub fn clear_session_cookie(config: &SessionConfig) -> Cookie<'static> {
    let mut builder = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(-1))
        .expires(OffsetDateTime::UNIX_EPOCH);

    if let Some(domain) = &config.cookie_domain {
        builder = builder.domain(domain.clone());
    }

    builder.build()
}

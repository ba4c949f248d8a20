//! Session extractors
//!
//! Resolve the request's session cookie into a loaded user. Identity is a
//! per-request value threaded through handler arguments, never ambient
//! state.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use dte_core::User;
use tracing::debug;

use crate::cookies::SESSION_COOKIE;
use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated user resolved from the session cookie
///
/// Rejects with 401 when the session cannot be resolved.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Optional session user
///
/// Every resolution failure collapses to `None`: a missing or malformed
/// cookie, a bad signature, an expired token, an unknown open_id, a store
/// fault, or a deactivated account. Handlers never learn why.
#[derive(Debug, Clone)]
pub struct OptionalCurrentUser(pub Option<User>);

/// Authenticated administrator
///
/// Rejects with 401 without a session and 403 for any non-admin role.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

async fn resolve_session(parts: &Parts, state: &AppState) -> Option<User> {
    let jar = CookieJar::from_headers(&parts.headers);
    let token = jar.get(SESSION_COOKIE)?.value().to_string();

    let claims = match state.service_context().session_tokens().verify(&token) {
        Ok(claims) => claims,
        Err(e) => {
            debug!(error = %e, "session token rejected");
            return None;
        }
    };

    let user = match state
        .service_context()
        .user_repo()
        .find_by_open_id(claims.open_id())
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!("session token names an unknown account");
            return None;
        }
        Err(e) => {
            debug!(error = %e, "session lookup failed");
            return None;
        }
    };

    // A deactivated account keeps its cookie but loses its session
    if !user.is_active {
        debug!(user_id = user.id, "session for deactivated account");
        return None;
    }

    Some(user)
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalCurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        Ok(Self(resolve_session(parts, &app_state).await))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        resolve_session(parts, &app_state)
            .await
            .map(Self)
            .ok_or(ApiError::MissingSession)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.is_admin() {
            Ok(Self(user))
        } else {
            Err(ApiError::AdminRequired)
        }
    }
}

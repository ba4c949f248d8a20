//! Authentication handlers
//!
//! Registration, login, logout, session probe, and self-service password
//! change. Login and logout are the only writers of the session cookie.

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use dte_core::{AuthResult, User};
use dte_service::dto::{
    ApiResponse, ChangePasswordRequest, LoginRequest, RegisterRequest, UserResponse,
};
use dte_service::AuthService;

use crate::cookies::{clear_session_cookie, session_cookie};
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new account
///
/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<ApiResponse<UserResponse>>>> {
    let service = AuthService::new(state.service_context());
    let user = into_user(service.register(request).await)?;
    Ok(Created(Json(ApiResponse::new(UserResponse::from(user)))))
}

/// Login with username or email
///
/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<UserResponse>>)> {
    let service = AuthService::new(state.service_context());
    let user = into_user(service.authenticate(&request.identifier, &request.password).await)?;

    let token = state
        .service_context()
        .session_tokens()
        .issue(&user.open_id)?;
    let jar = jar.add(session_cookie(token, state.session_config()));

    Ok((jar, Json(ApiResponse::new(UserResponse::from(user)))))
}

/// Logout, clearing the session cookie
///
/// POST /api/v1/auth/logout
///
/// Succeeds without a valid session; an expired cookie must still be
/// removable.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, NoContent) {
    let jar = jar.add(clear_session_cookie(state.session_config()));
    (jar, NoContent)
}

/// Get the session's user
///
/// GET /api/v1/auth/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::new(UserResponse::from(user)))
}

/// Change the caller's own password
///
/// POST /api/v1/auth/password
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    let result = service
        .change_password(
            user.id,
            request.current_password.as_deref(),
            &request.new_password,
        )
        .await;
    ensure_ok(result)?;
    Ok(NoContent)
}

/// Unwrap an authentication outcome that must carry a user
fn into_user(result: AuthResult) -> ApiResult<User> {
    match (result.user, result.error) {
        (Some(user), None) => Ok(user),
        (_, Some(error)) => Err(ApiError::Auth(error)),
        (None, None) => Err(ApiError::internal(anyhow::anyhow!(
            "authentication succeeded without a user payload"
        ))),
    }
}

/// Unwrap an authentication outcome with no user payload
fn ensure_ok(result: AuthResult) -> ApiResult<()> {
    match result.error {
        None => Ok(()),
        Some(error) => Err(ApiError::Auth(error)),
    }
}

//! User profile handlers

use axum::{extract::State, Json};
use dte_service::dto::{ApiResponse, UpdateProfileRequest, UserResponse};
use dte_service::UserService;

use crate::extractors::{CurrentUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the caller's profile
///
/// GET /api/v1/users/@me
pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let profile = service.get_current(user.id).await?;
    Ok(Json(ApiResponse::new(profile)))
}

/// Update the caller's name and email
///
/// PATCH /api/v1/users/@me
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let profile = service.update_profile(user.id, request).await?;
    Ok(Json(ApiResponse::new(profile)))
}

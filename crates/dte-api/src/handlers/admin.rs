//! Administration handlers
//!
//! Account management and the audit log. Every route here requires an
//! administrator session.

use axum::{extract::State, Json};
use dte_service::dto::{
    ActivityListQuery, ActivityResponse, AdminSetPasswordRequest, ApiResponse, UpdateActiveRequest,
    UpdateRoleRequest, UserResponse,
};
use dte_service::{ActivityService, AuthService, UserService};

use crate::extractors::{AdminUser, ApiQuery, IdPath, ValidatedJson};
use crate::response::{ApiError, ApiResult, NoContent};
use crate::state::AppState;

/// List every account
///
/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let service = UserService::new(state.service_context());
    let users = service.list_users().await?;
    Ok(Json(ApiResponse::new(users)))
}

/// Change an account's role
///
/// PATCH /api/v1/admin/users/{user_id}/role
pub async fn set_role(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let updated = service.set_role(&admin, user_id, request.role).await?;
    Ok(Json(ApiResponse::new(updated)))
}

/// Activate or deactivate an account
///
/// PATCH /api/v1/admin/users/{user_id}/active
pub async fn set_active(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateActiveRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let updated = service.set_active(&admin, user_id, request.is_active).await?;
    Ok(Json(ApiResponse::new(updated)))
}

/// Reset an account's password
///
/// PUT /api/v1/admin/users/{user_id}/password
pub async fn set_password(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(user_id): IdPath,
    ValidatedJson(request): ValidatedJson<AdminSetPasswordRequest>,
) -> ApiResult<NoContent> {
    let service = AuthService::new(state.service_context());
    let result = service.set_password_admin(user_id, &request.new_password).await;
    match result.error {
        None => Ok(NoContent),
        Some(error) => Err(ApiError::Auth(error)),
    }
}

/// List audit activities
///
/// GET /api/v1/admin/activities
pub async fn list_activities(
    State(state): State<AppState>,
    _admin: AdminUser,
    ApiQuery(query): ApiQuery<ActivityListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<ActivityResponse>>>> {
    let service = ActivityService::new(state.service_context());
    let activities = service.list(query).await?;
    Ok(Json(ApiResponse::new(activities)))
}

/// Distinct activity types, for the audit filter dropdown
///
/// GET /api/v1/admin/activities/types
pub async fn activity_types(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<ApiResponse<Vec<String>>>> {
    let service = ActivityService::new(state.service_context());
    let types = service.distinct_types().await?;
    Ok(Json(ApiResponse::new(types)))
}

//! Notification handlers
//!
//! Each user sees their own rows; administrators additionally see
//! broadcasts. Scoping is enforced in the service, not here.

use axum::{extract::State, Json};
use dte_service::dto::{
    ApiResponse, NotificationListQuery, NotificationResponse, UnreadCountResponse,
};
use dte_service::NotificationService;

use crate::extractors::{ApiQuery, CurrentUser, IdPath};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// List the caller's notifications
///
/// GET /api/v1/notifications
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiQuery(query): ApiQuery<NotificationListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<NotificationResponse>>>> {
    let service = NotificationService::new(state.service_context());
    let notifications = service.list_for_user(&user, &query).await?;
    Ok(Json(ApiResponse::new(notifications)))
}

/// Count the caller's unread notifications
///
/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Json<ApiResponse<UnreadCountResponse>>> {
    let service = NotificationService::new(state.service_context());
    let count = service.unread_count(&user).await?;
    Ok(Json(ApiResponse::new(UnreadCountResponse { count })))
}

/// Mark one notification read
///
/// POST /api/v1/notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    IdPath(notification_id): IdPath,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service.mark_read(&user, notification_id).await?;
    Ok(NoContent)
}

/// Mark every visible notification read
///
/// POST /api/v1/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service.mark_all_read(&user).await?;
    Ok(NoContent)
}

/// Delete one notification
///
/// DELETE /api/v1/notifications/{notification_id}
pub async fn delete(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    IdPath(notification_id): IdPath,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service.delete(&user, notification_id).await?;
    Ok(NoContent)
}

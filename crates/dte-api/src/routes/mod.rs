//! Route table, grouped the way the dashboard navigation is

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{admin, auth, health, notifications, users};
use crate::state::AppState;

/// Create the main API router (excluding health, which bypasses rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (mounted outside the rate limiter)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(admin_routes())
        .merge(notification_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/password", post(auth::change_password))
}

/// User profile routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_profile))
        .route("/users/@me", patch(users::update_profile))
}

/// Administration routes
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/:user_id/role", patch(admin::set_role))
        .route("/admin/users/:user_id/active", patch(admin::set_active))
        .route("/admin/users/:user_id/password", put(admin::set_password))
        .route("/admin/activities", get(admin::list_activities))
        .route("/admin/activities/types", get(admin::activity_types))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list))
        .route("/notifications/unread-count", get(notifications::unread_count))
        .route("/notifications/read-all", post(notifications::mark_all_read))
        .route("/notifications/:notification_id/read", post(notifications::mark_read))
        .route("/notifications/:notification_id", delete(notifications::delete))
}

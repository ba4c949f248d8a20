//! Liveness and readiness probes

use axum::{extract::State, http::StatusCode, Json};
use dte_db::check_connection;
use dte_service::dto::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// GET /health
///
/// Always 200 while the process is up.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// GET /health/ready
///
/// 200 once the database answers queries, 503 until then. Deployments wait
/// on this endpoint before switching traffic over.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let db_ready = check_connection(state.service_context().pool()).await.is_ok();

    let status = if db_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadinessResponse::ready(db_ready)))
}

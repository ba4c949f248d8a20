//! Application wiring and server runner.
//!
//! `run` is the whole startup path: configuration to pool to migrations to
//! service context to a bound listener.

use std::sync::Arc;

use axum::Router;
use dte_common::{AppConfig, AppError, AppResult, PasswordHasher, SessionTokenService};
use dte_db::{
    create_pool, run_migrations, PgActivityRepository, PgNotificationRepository, PgUserRepository,
    PoolConfig,
};
use dte_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::middleware::{apply_base_stack, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes are merged outside the rate limiter so monitoring never
/// competes with API traffic for the quota.
pub fn create_app(state: AppState) -> Router {
    let api = apply_rate_limit(create_router(), &state.config().rate_limit);
    let router = api.merge(health_routes());
    let router = apply_base_stack(
        router,
        &state.config().cors,
        state.config().app.env.is_production(),
    );
    router.with_state(state)
}

/// Connect to the store, apply migrations and assemble the service context
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    info!("Connecting to PostgreSQL...");
    let pool_config = PoolConfig::new(
        config.database.url.clone(),
        config.database.max_connections,
        config.database.min_connections,
    );
    let pool = create_pool(&pool_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("Store ready, migrations applied");

    let password_hasher = Arc::new(PasswordHasher::with_cost(config.password.bcrypt_cost));
    let session_tokens = Arc::new(SessionTokenService::new(
        &config.session.secret,
        config.session.ttl_secs,
    ));

    let service_context = ServiceContextBuilder::new()
        .pool(pool.clone())
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .activity_repo(Arc::new(PgActivityRepository::new(pool.clone())))
        .notification_repo(Arc::new(PgNotificationRepository::new(pool)))
        .password_hasher(password_hasher)
        .session_tokens(session_tokens)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Serve the application until a shutdown signal arrives
pub async fn run_server(app: Router, addr: &str) -> AppResult<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind {addr}: {e}")))?;

    let local = listener
        .local_addr()
        .map_err(|e| AppError::Config(e.to_string()))?;
    info!("API listening on http://{local}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Full startup path used by the binary
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.api.address();
    let state = create_app_state(config).await?;
    let app = create_app(state);
    run_server(app, &addr).await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
}

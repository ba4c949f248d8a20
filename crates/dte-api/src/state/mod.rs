//! Shared application state

use std::sync::Arc;

use dte_common::{AppConfig, SessionConfig};
use dte_service::ServiceContext;

/// State handed to every handler by Axum.
///
/// Both halves live behind one `Arc`; cloning the state clones a pointer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<StateInner>,
}

struct StateInner {
    services: ServiceContext,
    config: AppConfig,
}

impl AppState {
    pub fn new(services: ServiceContext, config: AppConfig) -> Self {
        Self {
            inner: Arc::new(StateInner { services, config }),
        }
    }

    /// Service context carrying the repositories, hasher and token signer
    pub fn service_context(&self) -> &ServiceContext {
        &self.inner.services
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Settings for issuing and clearing the session cookie
    pub fn session_config(&self) -> &SessionConfig {
        &self.inner.config.session
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The config carries the session secret, so Debug stays opaque.
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

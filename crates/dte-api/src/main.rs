//! dte-server API binary.
//!
//! ```bash
//! cargo run -p dte-api
//! ```
//!
//! All configuration comes from environment variables; a `.env` file is
//! picked up in development.

use dte_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration first: the tracing profile depends on APP_ENV
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let tracing_config = TracingConfig::for_environment(config.app.env);
    if let Err(e) = try_init_tracing(&tracing_config) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        addr = %config.api.address(),
        "Starting dte-server"
    );

    if let Err(e) = dte_api::run(config).await {
        error!(error = %e, "Server exited with error");
        std::process::exit(1);
    }
}

//! Tracing subscriber setup.
//!
//! Local runs get the pretty format with source locations; staging and
//! production swap in structured JSON. `RUST_LOG` always wins over the
//! configured default level.

use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer,
};

use crate::config::Environment;

/// Output options for the subscriber
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level filter used when `RUST_LOG` is unset
    pub level: Level,
    /// Emit structured JSON instead of the pretty format
    pub json: bool,
    /// Emit an event when each span opens and closes
    pub span_lifecycle: bool,
    /// Include the callsite file and line on every event
    pub source_location: bool,
    /// Include the emitting thread's name on every event
    pub thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            span_lifecycle: false,
            source_location: true,
            thread_names: false,
        }
    }
}

impl TracingConfig {
    /// Output profile matching the deployment environment.
    ///
    /// Development trades speed for detail: debug level, span lifecycle
    /// events and thread names. Staging and production log JSON at info
    /// level and skip source locations.
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: Level::DEBUG,
                span_lifecycle: true,
                thread_names: true,
                ..Self::default()
            },
            Environment::Staging | Environment::Production => Self {
                json: true,
                source_location: false,
                ..Self::default()
            },
        }
    }
}

/// Install the global subscriber.
///
/// # Errors
/// Fails when a subscriber is already installed; callers that race (tests)
/// can ignore the error.
pub fn try_init_tracing(config: &TracingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.level).into())
        .from_env_lossy();

    let span_events = if config.span_lifecycle {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let base = fmt::layer()
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_thread_names(config.thread_names)
        .with_span_events(span_events);

    // The JSON formatter is a different layer type, so box both shapes
    let formatter = if config.json {
        base.json().boxed()
    } else {
        base.boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(formatter)
        .try_init()
}

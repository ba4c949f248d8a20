//! The tower layers wrapped around every route: request ids, tracing,
//! timeouts, CORS and the rate limiter.

use axum::{
    http::{header, HeaderValue, Method, Request, StatusCode},
    Router,
};
use dte_common::{CorsConfig, RateLimitConfig};
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, MakeSpan, TraceLayer},
};
use tracing::{info, warn, Level, Span};

use crate::state::AppState;

/// Header carrying the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Hard ceiling for any single request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Span wrapping every request; picks up the id set by `SetRequestIdLayer`
#[derive(Clone, Copy)]
struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = match request.headers().get(REQUEST_ID_HEADER) {
            Some(value) => value.to_str().unwrap_or("invalid"),
            None => "unknown",
        };

        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id,
        )
    }
}

/// Wrap a router in the rate limiter
///
/// Applied to the API subtree only; health probes stay outside so an
/// aggressive poller cannot starve the monitoring.
pub fn apply_rate_limit(router: Router<AppState>, config: &RateLimitConfig) -> Router<AppState> {
    // One global bucket: the dashboard sits behind a proxy, so per-IP keys
    // would collapse to a single key anyway
    let limiter = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.requests_per_second.into())
            .burst_size(config.burst)
            .key_extractor(GlobalKeyExtractor)
            .finish()
            .expect("rate limit settings rejected by governor"),
    );

    router.layer(GovernorLayer { config: limiter })
}

/// Apply the shared middleware stack around the whole application
///
/// Layers run in reverse registration order, so a request flows
/// RequestId -> Trace -> Timeout -> CORS -> handler.
pub fn apply_base_stack(
    router: Router<AppState>,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    router
        .layer(cors_layer(cors_config, is_production))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::SERVICE_UNAVAILABLE,
            REQUEST_TIMEOUT,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(RequestSpan)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
}

/// CORS policy from configuration
///
/// The session cookie only crosses origins when the browser is told to send
/// credentials, and the CORS spec forbids credentials with a wildcard
/// origin. So: configured origins get credentials, the development wildcard
/// does not.
fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
        ])
        .expose_headers([header::HeaderName::from_static(REQUEST_ID_HEADER)]);

    if config.allowed_origins.is_empty() {
        return if is_production {
            warn!("CORS: no allowed origins configured; browsers will be blocked");
            base.allow_origin(AllowOrigin::list(Vec::<HeaderValue>::new()))
        } else {
            warn!(
                "CORS: allowing any origin without credentials; \
                 set CORS_ALLOWED_ORIGINS before deploying"
            );
            base.allow_origin(Any)
        };
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "CORS: skipping unparsable origin");
                None
            }
        })
        .collect();

    info!(count = origins.len(), "CORS: restricting to configured origins");
    base.allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

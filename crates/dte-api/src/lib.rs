//! # dte-api
//!
//! The HTTP face of the dashboard: Axum routes and handlers, the session
//! cookie plumbing, middleware and the server runner.

pub mod cookies;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, run_server};
pub use state::AppState;

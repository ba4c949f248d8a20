//! Tracing setup shared by the binary and the test harnesses

mod tracing_setup;

pub use tracing_setup::{try_init_tracing, TracingConfig};

//! HTTP request handlers for the dashboard service.

pub mod health;
pub mod metrics;
pub mod protected;

pub use health::{health_check, readiness_check};
pub use metrics::metrics_handler;
pub use protected::protected;

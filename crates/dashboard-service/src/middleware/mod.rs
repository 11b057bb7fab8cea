//! Middleware for the dashboard service.
//!
//! # Components
//!
//! - `gateway_auth` - Gateway token check for protected routes
//! - `http_metrics` - HTTP request metrics for all responses

pub mod gateway_auth;
pub mod http_metrics;

pub use gateway_auth::{require_gateway_token, GatewayAuthState};
pub use http_metrics::http_metrics_middleware;

//! Prometheus metrics endpoint handler.
//!
//! Unauthenticated so Prometheus can scrape it. Labels carry only bounded
//! operational values; no tokens or secrets are exposed.

use axum::{extract::State, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

/// Handler for GET /metrics
///
/// Returns Prometheus text format:
/// ```text
/// # TYPE dashboard_gateway_auth_total counter
/// dashboard_gateway_auth_total{outcome="accepted"} 42
/// ```
#[tracing::instrument(skip_all, name = "dashboard.metrics.scrape")]
pub async fn metrics_handler(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    handle.render()
}

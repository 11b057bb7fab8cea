//! Metrics definitions for the dashboard service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `dashboard_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `method`: HTTP methods
//! - `endpoint`: the handful of routed paths, everything else is `/other`
//! - `status`: success, error, timeout
//! - `outcome`: accepted plus the four gateway rejection labels

use common::gateway::GatewayVerdict;
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// Must be called before any metrics are recorded.
///
/// # Errors
///
/// Returns error if Prometheus recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("dashboard_http_request".to_string()),
            &[
                0.005, 0.010, 0.025, 0.050, 0.100, 0.150, 0.200, 0.300, 0.500, 1.000, 2.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP request buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion
///
/// Metric: `dashboard_http_requests_total`, `dashboard_http_request_duration_seconds`
/// Labels: `method`, `endpoint`, `status`
pub fn record_http_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    let normalized_endpoint = normalize_endpoint(endpoint);
    let status = categorize_status_code(status_code);

    histogram!("dashboard_http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status" => status
    )
    .record(duration.as_secs_f64());

    counter!("dashboard_http_requests_total",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Categorize HTTP status code into success/error/timeout
fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        200..=299 => "success",
        408 | 504 => "timeout",
        _ => "error",
    }
}

/// Map a request path onto a bounded label set.
fn normalize_endpoint(path: &str) -> &'static str {
    match path {
        "/api/dashboard/health" => "/api/dashboard/health",
        "/api/dashboard/ready" => "/api/dashboard/ready",
        "/api/dashboard/protected" => "/api/dashboard/protected",
        "/metrics" => "/metrics",
        _ => "/other",
    }
}

// ============================================================================
// Gateway Auth Metrics
// ============================================================================

/// Record the outcome of a gateway token check.
///
/// Metric: `dashboard_gateway_auth_total`
/// Labels: `outcome`
pub fn record_gateway_verdict(verdict: GatewayVerdict) {
    counter!("dashboard_gateway_auth_total",
        "outcome" => verdict.outcome()
    )
    .increment(1);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use common::gateway::RejectionReason;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    #[test]
    fn test_record_http_request() {
        // Records to the no-op recorder when none is installed
        record_http_request("GET", "/api/dashboard/health", 200, Duration::from_millis(5));
        record_http_request("GET", "/api/dashboard/protected", 403, Duration::from_millis(2));
        record_http_request("GET", "/api/dashboard/protected", 504, Duration::from_secs(30));
        record_http_request("POST", "/unknown", 404, Duration::from_millis(1));
    }

    #[test]
    fn test_categorize_status_code() {
        assert_eq!(categorize_status_code(200), "success");
        assert_eq!(categorize_status_code(204), "success");
        assert_eq!(categorize_status_code(408), "timeout");
        assert_eq!(categorize_status_code(504), "timeout");
        assert_eq!(categorize_status_code(403), "error");
        assert_eq!(categorize_status_code(404), "error");
        assert_eq!(categorize_status_code(503), "error");
    }

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(
            normalize_endpoint("/api/dashboard/health"),
            "/api/dashboard/health"
        );
        assert_eq!(
            normalize_endpoint("/api/dashboard/ready"),
            "/api/dashboard/ready"
        );
        assert_eq!(
            normalize_endpoint("/api/dashboard/protected"),
            "/api/dashboard/protected"
        );
        assert_eq!(normalize_endpoint("/metrics"), "/metrics");
        assert_eq!(normalize_endpoint("/api/dashboard/anything"), "/other");
        assert_eq!(normalize_endpoint("/"), "/other");
    }

    #[test]
    fn test_record_gateway_verdict_counts_by_outcome() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            record_gateway_verdict(GatewayVerdict::Accepted);
            record_gateway_verdict(GatewayVerdict::Accepted);
            record_gateway_verdict(GatewayVerdict::Rejected(RejectionReason::Expired));
        });

        let counts: Vec<(String, u64)> = snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter(|(key, _, _, _)| key.key().name() == "dashboard_gateway_auth_total")
            .filter_map(|(key, _, _, value)| {
                let outcome = key
                    .key()
                    .labels()
                    .find(|label| label.key() == "outcome")
                    .map(|label| label.value().to_string())?;
                match value {
                    DebugValue::Counter(count) => Some((outcome, count)),
                    _ => None,
                }
            })
            .collect();

        assert!(counts.contains(&("accepted".to_string(), 2)));
        assert!(counts.contains(&("expired".to_string(), 1)));
        assert_eq!(counts.len(), 2);
    }
}

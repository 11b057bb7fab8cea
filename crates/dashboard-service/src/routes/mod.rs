//! HTTP routes for the dashboard service.
//!
//! Defines the Axum router and application state.

use crate::handlers;
use crate::middleware::{http_metrics_middleware, require_gateway_token, GatewayAuthState};
use axum::{middleware, routing::get, Router};
use common::gateway::GatewayVerifier;
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub use crate::observability::metrics::init_metrics_recorder;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, when a database is configured.
    pub pool: Option<PgPool>,

    /// Gateway token verifier built from the configured secret.
    pub verifier: Arc<GatewayVerifier>,
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/api/dashboard/health` - Liveness probe - public
/// - `/api/dashboard/ready` - Readiness probe (database ping) - public
/// - `/metrics` - Prometheus metrics endpoint - public
/// - `/api/dashboard/protected` - requires a gateway token
/// - TraceLayer for request logging
/// - HTTP metrics middleware
/// - 30 second request timeout
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let auth_state = Arc::new(GatewayAuthState {
        verifier: state.verifier.clone(),
    });

    // Public routes (no gateway token required)
    let public_routes = Router::new()
        .route("/api/dashboard/health", get(handlers::health_check))
        .route("/api/dashboard/ready", get(handlers::readiness_check))
        .with_state(state.clone());

    // Metrics route with its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Protected routes (gateway token required)
    let protected_routes = Router::new()
        .route("/api/dashboard/protected", get(handlers::protected))
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            require_gateway_token,
        ))
        .with_state(state);

    // Layer order (bottom-to-top execution):
    // 1. TraceLayer - Log request details (innermost)
    // 2. TimeoutLayer - Timeout the request
    // 3. http_metrics_middleware - Record ALL responses (outermost)
    public_routes
        .merge(metrics_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(middleware::from_fn(http_metrics_middleware))
}

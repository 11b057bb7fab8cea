//! Health check handlers.
//!
//! - `/api/dashboard/health`: liveness, static, no dependencies
//! - `/api/dashboard/ready`: readiness, pings the database when configured

use crate::db;
use crate::errors::DashboardError;
use crate::models::{HealthResponse, ReadinessResponse};
use crate::routes::AppState;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;

/// Liveness probe handler.
///
/// Returns `{"status": "healthy"}` whenever the process is serving. Does not
/// touch the gateway verifier or the database.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Readiness probe handler.
///
/// Returns 200 when the service can take traffic, 503 when the configured
/// database does not answer. A service without a database is always ready.
#[tracing::instrument(skip_all, name = "dashboard.health.readiness")]
pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReadinessResponse>, DashboardError> {
    let Some(pool) = &state.pool else {
        return Ok(Json(ReadinessResponse {
            status: "ready",
            database: "not_configured",
        }));
    };

    db::ping(pool)
        .await
        .map_err(|e| DashboardError::ServiceUnavailable(format!("database ping failed: {}", e)))?;

    Ok(Json(ReadinessResponse {
        status: "ready",
        database: "healthy",
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode, routing::get, Router};
    use common::gateway::GatewayVerifier;
    use common::secret::SecretString;
    use http_body_util::BodyExt;
    use sqlx::postgres::PgPoolOptions;
    use sqlx::PgPool;
    use std::time::Duration;
    use tower::ServiceExt;

    fn ready_app(pool: Option<PgPool>) -> Router {
        let verifier = GatewayVerifier::new(SecretString::from("s3cr3t")).unwrap();
        let state = Arc::new(AppState {
            pool,
            verifier: Arc::new(verifier),
        });

        Router::new()
            .route("/ready", get(readiness_check))
            .with_state(state)
    }

    async fn get_ready(app: Router) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_health_check() {
        let Json(response) = health_check().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_readiness_without_database() {
        let (status, body) = get_ready(ready_app(None)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"status": "ready", "database": "not_configured"})
        );
    }

    #[tokio::test]
    async fn test_readiness_with_unreachable_database() {
        // Nothing listens on port 1
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy("postgresql://127.0.0.1:1/dashboard")
            .unwrap();

        let (status, body) = get_ready(ready_app(Some(pool))).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
        assert_eq!(
            body["error"]["message"],
            "Service temporarily unavailable"
        );
        // Connection details stay server-side
        assert!(!body.to_string().contains("127.0.0.1"));
    }
}

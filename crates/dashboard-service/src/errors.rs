//! Dashboard service error types.
//!
//! All errors map to HTTP status codes via the `IntoResponse` impl. Internal
//! details are logged server-side; clients get generic messages, except for
//! gateway rejections whose reason is part of the contract.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::gateway::RejectionReason;
use serde::Serialize;
use thiserror::Error;

/// Dashboard service error type.
///
/// Maps to HTTP status codes:
/// - Forbidden: 403 Forbidden
/// - ServiceUnavailable: 503 Service Unavailable
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl DashboardError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            DashboardError::Forbidden(_) => 403,
            DashboardError::ServiceUnavailable(_) => 503,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            DashboardError::Forbidden(reason) => {
                (StatusCode::FORBIDDEN, "FORBIDDEN", reason.clone())
            }
            DashboardError::ServiceUnavailable(reason) => {
                tracing::warn!(target: "dashboard.availability", reason = %reason, "Service unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Service temporarily unavailable".to_string(),
                )
            }
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<RejectionReason> for DashboardError {
    fn from(reason: RejectionReason) -> Self {
        DashboardError::Forbidden(reason.message().to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;

    async fn read_body_json(body: Body) -> serde_json::Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DashboardError::Forbidden("Missing token".to_string()).to_string(),
            "Forbidden: Missing token"
        );
        assert_eq!(
            DashboardError::ServiceUnavailable("db down".to_string()).to_string(),
            "Service unavailable: db down"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(DashboardError::Forbidden("x".to_string()).status_code(), 403);
        assert_eq!(
            DashboardError::ServiceUnavailable("x".to_string()).status_code(),
            503
        );
    }

    #[test]
    fn test_from_rejection_reason() {
        let cases = [
            (RejectionReason::MissingToken, "Missing token"),
            (RejectionReason::InvalidSignature, "Invalid token"),
            (RejectionReason::InvalidRole, "Invalid token role"),
            (RejectionReason::Expired, "Token expired"),
        ];

        for (reason, message) in cases {
            let error = DashboardError::from(reason);
            assert!(matches!(&error, DashboardError::Forbidden(m) if m == message));
        }
    }

    #[tokio::test]
    async fn test_into_response_forbidden() {
        let response = DashboardError::from(RejectionReason::Expired).into_response();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "FORBIDDEN");
        assert_eq!(body_json["error"]["message"], "Token expired");
    }

    #[tokio::test]
    async fn test_into_response_service_unavailable() {
        let error = DashboardError::ServiceUnavailable("database maintenance".to_string());
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body_json = read_body_json(response.into_body()).await;
        assert_eq!(body_json["error"]["code"], "SERVICE_UNAVAILABLE");
        assert_eq!(
            body_json["error"]["message"],
            "Service temporarily unavailable"
        );
    }
}

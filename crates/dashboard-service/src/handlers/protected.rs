//! Example route behind the gateway token check.

use crate::models::ProtectedResponse;
use axum::Json;

/// Handler for GET /api/dashboard/protected.
///
/// Only reached when `require_gateway_token` accepted the request.
#[tracing::instrument(skip_all, name = "dashboard.protected")]
pub async fn protected() -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        detail: "Gateway verified".to_string(),
    })
}

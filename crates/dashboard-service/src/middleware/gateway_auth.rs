//! Gateway token middleware for protected routes.
//!
//! Reads the `X-Gateway-Auth` header, asks the [`GatewayVerifier`] for a
//! verdict, and either forwards the request or answers 403 with the
//! rejection reason.

use crate::errors::DashboardError;
use crate::observability::metrics::record_gateway_verdict;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use common::gateway::{GatewayVerdict, GatewayVerifier, RejectionReason};
use common::jwt::GATEWAY_AUTH_HEADER;
use std::sync::Arc;
use tracing::instrument;

/// State for the gateway auth middleware.
#[derive(Clone)]
pub struct GatewayAuthState {
    /// Verifier holding the shared gateway secret.
    pub verifier: Arc<GatewayVerifier>,
}

/// Middleware that only lets gateway-signed requests through.
///
/// # Header Format
///
/// ```text
/// X-Gateway-Auth: <HS256 JWT>
/// ```
///
/// # Response
///
/// - 403 Forbidden with `{"error":{"code":"FORBIDDEN","message":<reason>}}`
///   on any rejection
/// - Continues to the next handler when the token is accepted
#[instrument(skip_all, name = "dashboard.middleware.gateway_auth")]
pub async fn require_gateway_token(
    State(state): State<Arc<GatewayAuthState>>,
    req: Request,
    next: Next,
) -> Result<Response, DashboardError> {
    let verdict = match req.headers().get(GATEWAY_AUTH_HEADER) {
        None => state.verifier.verify_now(None),
        Some(value) => match value.to_str() {
            Ok(token) => state.verifier.verify_now(Some(token)),
            // Opaque bytes can never be a JWT
            Err(_) => GatewayVerdict::Rejected(RejectionReason::InvalidSignature),
        },
    };

    record_gateway_verdict(verdict);

    match verdict {
        GatewayVerdict::Accepted => {
            tracing::debug!(target: "dashboard.middleware.gateway", "Gateway token accepted");
            Ok(next.run(req).await)
        }
        GatewayVerdict::Rejected(reason) => {
            tracing::debug!(
                target: "dashboard.middleware.gateway",
                reason = reason.as_str(),
                "Gateway token rejected"
            );
            Err(reason.into())
        }
    }
}

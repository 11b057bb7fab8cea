//! Dashboard service models.
//!
//! Response bodies for the service's HTTP endpoints.

use serde::{Deserialize, Serialize};

/// Health check response.
///
/// Returned by `/api/dashboard/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process is serving.
    pub status: String,
}

/// Readiness probe response.
///
/// Only built for the ready case; failures go through `DashboardError`.
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    /// Always "ready".
    pub status: &'static str,

    /// "healthy" or "not_configured".
    pub database: &'static str,
}

/// Body returned by the gateway-protected route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedResponse {
    /// Confirmation that the gateway check passed.
    pub detail: String,
}

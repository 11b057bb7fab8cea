//! Test server harness for E2E testing
//!
//! Provides `TestDashboardServer` for spawning real dashboard server instances in tests.

use crate::token_builders::TEST_GATEWAY_SECRET;
use common::gateway::GatewayVerifier;
use dashboard_service::config::Config;
use dashboard_service::routes::{self, init_metrics_recorder, AppState};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use tokio::task::JoinHandle;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Process-wide metrics handle.
///
/// The global recorder can only be installed once per test binary, so every
/// server spawned in the same process shares it.
pub fn test_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            init_metrics_recorder()
                .unwrap_or_else(|_| PrometheusBuilder::new().build_recorder().handle())
        })
        .clone()
}

/// Test harness for spawning the dashboard server in E2E tests.
///
/// Runs without a database; readiness reports `not_configured`.
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_health_e2e() -> Result<()> {
///     let server = TestDashboardServer::spawn().await?;
///
///     let response = reqwest::get(format!("{}/api/dashboard/health", server.url())).await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestDashboardServer {
    addr: SocketAddr,
    config: Config,
    _handle: JoinHandle<()>,
}

impl TestDashboardServer {
    /// Spawn a server that trusts [`TEST_GATEWAY_SECRET`].
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_secret(TEST_GATEWAY_SECRET).await
    }

    /// Spawn a server that trusts `secret`.
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Start the HTTP server in the background
    pub async fn spawn_with_secret(secret: &str) -> Result<Self, anyhow::Error> {
        let vars = HashMap::from([
            ("GATEWAY_SECRET_KEY".to_string(), secret.to_string()),
            ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
            ("DASHBOARD_DRAIN_SECONDS".to_string(), "0".to_string()),
        ]);

        let config = Config::from_vars(&vars)
            .map_err(|e| anyhow::anyhow!("Failed to create config: {}", e))?;

        let verifier = GatewayVerifier::new(config.gateway_secret.clone())
            .map_err(|e| anyhow::anyhow!("Failed to create verifier: {}", e))?;

        let state = Arc::new(AppState {
            pool: None,
            verifier: Arc::new(verifier),
        });

        let app = routes::build_routes(state, test_metrics_handle());

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            config,
            _handle: handle,
        })
    }

    /// Get the base URL of the test server.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Drop for TestDashboardServer {
    fn drop(&mut self) {
        self._handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_server_spawns_successfully() -> Result<(), anyhow::Error> {
        let server = TestDashboardServer::spawn().await?;

        assert!(server.url().starts_with("http://127.0.0.1:"));

        let response = reqwest::get(format!("{}/api/dashboard/health", server.url())).await?;
        assert_eq!(response.status(), 200);

        let body: serde_json::Value = response.json().await?;
        assert_eq!(body["status"], "healthy");

        Ok(())
    }

    #[tokio::test]
    async fn test_server_provides_addr() -> Result<(), anyhow::Error> {
        let server = TestDashboardServer::spawn().await?;
        let addr = server.addr();

        assert!(addr.ip().is_loopback());
        assert!(addr.port() > 0);
        assert_eq!(server.url(), format!("http://{}", addr));

        Ok(())
    }

    #[tokio::test]
    async fn test_server_uses_given_secret() -> Result<(), anyhow::Error> {
        let server = TestDashboardServer::spawn_with_secret("s3cr3t").await?;

        assert_eq!(server.config().gateway_secret_len(), 6);
        assert!(!server.config().has_database());

        Ok(())
    }
}

//! # Dashboard Test Utilities
//!
//! Shared test utilities for the dashboard service.
//!
//! This crate provides:
//! - Gateway token builder (`TestGatewayTokenBuilder`, HS256 signing)
//! - Server test harness (`TestDashboardServer` for E2E tests)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dashboard_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestDashboardServer::spawn().await?;
//!     let token = TestGatewayTokenBuilder::new().sign(TEST_GATEWAY_SECRET);
//!
//!     let response = reqwest::Client::new()
//!         .get(format!("{}/api/dashboard/protected", server.url()))
//!         .header("X-Gateway-Auth", token)
//!         .send()
//!         .await?;
//!
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod server_harness;
pub mod token_builders;

// Re-export commonly used items
pub use server_harness::*;
pub use token_builders::*;

//! Dashboard Service Library
//!
//! A small microservice behind the InvestWise API gateway. It exposes a
//! public health check and routes that only accept requests carrying a
//! gateway-signed `X-Gateway-Auth` token.
//!
//! # Architecture
//!
//! ```text
//! routes/mod.rs -> middleware/gateway_auth.rs -> handlers/*.rs
//!                         |
//!                         v
//!               common::gateway (pure verifier)
//! ```
//!
//! # Modules
//!
//! - `config` - Service configuration from environment
//! - `db` - Database pool lifecycle
//! - `errors` - Error types with HTTP status code mapping
//! - `handlers` - HTTP request handlers
//! - `middleware` - Gateway auth and HTTP metrics middleware
//! - `models` - Response bodies
//! - `observability` - Metrics
//! - `routes` - Axum router setup

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod routes;

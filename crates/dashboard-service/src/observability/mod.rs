//! Observability module for the dashboard service.
//!
//! Provides metrics definitions and recording helpers.

pub mod metrics;

//! Common utilities and types shared across InvestWise services.

#![warn(clippy::pedantic)]

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for JWT utilities (size limits, HS256 decoding, gateway claims)
pub mod jwt;

/// Module for gateway token verification verdicts
pub mod gateway;

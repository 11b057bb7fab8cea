//! Dashboard service configuration.
//!
//! Configuration is loaded once from environment variables at startup and
//! held immutably for the life of the process. Sensitive fields are redacted
//! in Debug output.

use common::secret::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:9000";

/// Default maximum database pool size.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// Default graceful-shutdown drain period in seconds.
pub const DEFAULT_DRAIN_SECONDS: u64 = 30;

/// Dashboard service configuration.
#[derive(Clone)]
pub struct Config {
    /// Shared HS256 key used by the API gateway to sign forwarded requests.
    pub gateway_secret: SecretString,

    /// PostgreSQL connection URL. The service runs without a pool when unset.
    pub database_url: Option<String>,

    /// Server bind address (default: "0.0.0.0:9000").
    pub bind_address: String,

    /// Maximum connections in the database pool.
    pub db_max_connections: u32,

    /// Seconds to keep draining connections after a shutdown signal.
    pub drain_seconds: u64,
}

/// Custom Debug implementation that redacts sensitive fields.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("gateway_secret", &"[REDACTED]")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("bind_address", &self.bind_address)
            .field("db_max_connections", &self.db_max_connections)
            .field("drain_seconds", &self.drain_seconds)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("GATEWAY_SECRET_KEY must not be empty")]
    EmptyGatewaySecret,

    #[error("Invalid database pool size configuration: {0}")]
    InvalidDbMaxConnections(String),

    #[error("Invalid drain period configuration: {0}")]
    InvalidDrainSeconds(String),
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let gateway_secret = vars
            .get("GATEWAY_SECRET_KEY")
            .ok_or_else(|| ConfigError::MissingEnvVar("GATEWAY_SECRET_KEY".to_string()))?;

        if gateway_secret.trim().is_empty() {
            return Err(ConfigError::EmptyGatewaySecret);
        }
        let gateway_secret = SecretString::from(gateway_secret.clone());

        let database_url = vars
            .get("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .cloned();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let db_max_connections = if let Some(value_str) = vars.get("DB_MAX_CONNECTIONS") {
            let value: u32 = value_str.parse().map_err(|e| {
                ConfigError::InvalidDbMaxConnections(format!(
                    "DB_MAX_CONNECTIONS must be a valid positive integer, got '{}': {}",
                    value_str, e
                ))
            })?;

            if value == 0 {
                return Err(ConfigError::InvalidDbMaxConnections(
                    "DB_MAX_CONNECTIONS must be greater than 0".to_string(),
                ));
            }

            value
        } else {
            DEFAULT_DB_MAX_CONNECTIONS
        };

        let drain_seconds = if let Some(value_str) = vars.get("DASHBOARD_DRAIN_SECONDS") {
            value_str.parse().map_err(|e| {
                ConfigError::InvalidDrainSeconds(format!(
                    "DASHBOARD_DRAIN_SECONDS must be a non-negative integer, got '{}': {}",
                    value_str, e
                ))
            })?
        } else {
            DEFAULT_DRAIN_SECONDS
        };

        Ok(Config {
            gateway_secret,
            database_url,
            bind_address,
            db_max_connections,
            drain_seconds,
        })
    }

    /// Whether a database is configured.
    pub fn has_database(&self) -> bool {
        self.database_url.is_some()
    }

    /// Length of the configured gateway secret, for startup diagnostics.
    pub fn gateway_secret_len(&self) -> usize {
        self.gateway_secret.expose_secret().len()
    }
}

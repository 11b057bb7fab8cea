//! Builder patterns for gateway test tokens
//!
//! Provides a fluent API for creating HS256 tokens the way the API gateway
//! would mint them, plus knobs for producing every flavour of bad token.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Map, Value};

/// Shared secret used by test servers and test tokens.
pub const TEST_GATEWAY_SECRET: &str = "test-gateway-secret";

/// Builder for gateway JWTs
///
/// Defaults to `{"role": "gateway", "exp": now + 1h}`.
///
/// # Example
/// ```rust,ignore
/// let token = TestGatewayTokenBuilder::new()
///     .with_role("admin")
///     .expires_in(-60)
///     .sign("s3cr3t");
/// ```
pub struct TestGatewayTokenBuilder {
    role: Option<String>,
    exp: Option<i64>,
    extra: Map<String, Value>,
    algorithm: Algorithm,
}

impl TestGatewayTokenBuilder {
    /// Create a new token builder with defaults
    pub fn new() -> Self {
        Self {
            role: Some("gateway".to_string()),
            exp: Some((Utc::now() + Duration::seconds(3600)).timestamp()),
            extra: Map::new(),
            algorithm: Algorithm::HS256,
        }
    }

    /// Set the role claim
    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }

    /// Omit the role claim
    pub fn without_role(mut self) -> Self {
        self.role = None;
        self
    }

    /// Set expiration in seconds from now (negative for already expired)
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = Some((Utc::now() + Duration::seconds(seconds)).timestamp());
        self
    }

    /// Set the exp claim to an absolute Unix timestamp
    pub fn expires_at(mut self, timestamp: i64) -> Self {
        self.exp = Some(timestamp);
        self
    }

    /// Omit the exp claim
    pub fn without_exp(mut self) -> Self {
        self.exp = None;
        self
    }

    /// Add an arbitrary extra claim
    pub fn with_claim(mut self, name: &str, value: Value) -> Self {
        self.extra.insert(name.to_string(), value);
        self
    }

    /// Sign with a different HMAC algorithm (for algorithm-confusion tests)
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Build the claims as a JSON value
    pub fn build(&self) -> Value {
        let mut claims = self.extra.clone();
        if let Some(role) = &self.role {
            claims.insert("role".to_string(), json!(role));
        }
        if let Some(exp) = self.exp {
            claims.insert("exp".to_string(), json!(exp));
        }
        Value::Object(claims)
    }

    /// Sign the claims with `secret`
    pub fn sign(&self, secret: &str) -> String {
        encode(
            &Header::new(self.algorithm),
            &self.build(),
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("Failed to sign test gateway token")
    }
}

impl Default for TestGatewayTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

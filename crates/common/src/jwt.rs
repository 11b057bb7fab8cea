//! JWT utilities shared across InvestWise services.
//!
//! This module provides the low-level pieces of gateway token handling:
//! - Size limits for DoS prevention
//! - HS256 signature verification with the shared gateway secret
//! - The claim set carried by gateway tokens
//!
//! Policy decisions (role, expiry, verdict) live in [`crate::gateway`].
//!
//! # Security
//!
//! - Tokens are size-checked BEFORE parsing (DoS prevention)
//! - Only HS256 is accepted; a token whose header names any other
//!   algorithm fails verification
//! - Error messages are generic; details are logged at debug level

use crate::secret::{ExposeSecret, SecretString};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum allowed JWT size in bytes (8KB).
///
/// Gateway tokens carry two claims and are well under 300 bytes. Anything
/// larger is rejected before base64 decoding or HMAC computation.
pub const MAX_JWT_SIZE_BYTES: usize = 8192; // 8KB

/// Role claim value identifying the upstream API gateway.
pub const GATEWAY_ROLE: &str = "gateway";

/// Request header carrying the gateway token.
pub const GATEWAY_AUTH_HEADER: &str = "x-gateway-auth";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur while decoding a gateway JWT.
///
/// Every variant ends up as the same client-facing rejection; the variants
/// exist so that debug logs say what actually went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtValidationError {
    /// Token size exceeds maximum allowed.
    #[error("The token is invalid")]
    TokenTooLarge,

    /// Token structure, encoding, or signature check failed.
    #[error("The token is invalid")]
    InvalidSignature,

    /// Signature verified but a registered claim has the wrong type.
    #[error("The token is invalid")]
    MalformedClaims,

    /// Token names an audience; gateway tokens are not audience-scoped.
    #[error("The token is invalid")]
    UnexpectedAudience,

    /// `nbf` or `iat` lies after the verification instant.
    #[error("The token is invalid")]
    NotYetValid,
}

// =============================================================================
// Claims Types
// =============================================================================

/// Claims carried by a gateway token.
///
/// Both fields are optional on the wire. A missing `role` can never match
/// [`GATEWAY_ROLE`]; a missing `exp` means the token does not expire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GatewayClaims {
    /// Issuer role. `None` when absent or not a JSON string.
    pub role: Option<String>,

    /// Expiration timestamp (Unix epoch seconds, fractional allowed).
    pub exp: Option<f64>,
}

impl GatewayClaims {
    /// Extract the gateway claims from a verified JWT payload, checking the
    /// remaining registered claims against `now`.
    ///
    /// A non-string `role` becomes `None`, since it cannot equal the gateway
    /// role. `null` counts as absent for every registered claim.
    ///
    /// # Errors
    ///
    /// - `MalformedClaims` - `exp`, `nbf` or `iat` is present but not a number
    /// - `UnexpectedAudience` - an `aud` claim is present
    /// - `NotYetValid` - `nbf` or `iat` is later than `now`
    pub fn from_payload(
        payload: &Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<Self, JwtValidationError> {
        if !matches!(payload.get("aud"), None | Some(Value::Null)) {
            tracing::debug!(target: "common.jwt", "Token rejected: unexpected aud claim");
            return Err(JwtValidationError::UnexpectedAudience);
        }

        let exp = numeric_claim(payload, "exp")?;
        let nbf = numeric_claim(payload, "nbf")?;
        let iat = numeric_claim(payload, "iat")?;

        let now_secs = unix_seconds(now);
        for (claim, value) in [("nbf", nbf), ("iat", iat)] {
            if let Some(value) = value {
                if value > now_secs {
                    tracing::debug!(
                        target: "common.jwt",
                        claim = claim,
                        value = value,
                        now = now_secs,
                        "Token rejected: not yet valid"
                    );
                    return Err(JwtValidationError::NotYetValid);
                }
            }
        }

        let role = payload
            .get("role")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        Ok(Self { role, exp })
    }

    /// Whether the role claim names the API gateway.
    #[must_use]
    pub fn is_gateway(&self) -> bool {
        self.role.as_deref() == Some(GATEWAY_ROLE)
    }
}

/// Read a numeric timestamp claim. Integers and floats are both accepted.
fn numeric_claim(
    payload: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<f64>, JwtValidationError> {
    match payload.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| {
            tracing::debug!(target: "common.jwt", claim = name, "Token rejected: claim is not numeric");
            JwtValidationError::MalformedClaims
        }),
    }
}

/// `at` as fractional Unix seconds.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn unix_seconds(at: DateTime<Utc>) -> f64 {
    at.timestamp() as f64 + f64::from(at.timestamp_subsec_nanos()) / 1_000_000_000.0
}

// =============================================================================
// Functions
// =============================================================================

/// Verify an HS256 JWT against `secret` and return its claims.
///
/// Checks structure, signature, `aud`, `nbf` and `iat`. Expiry is left to
/// the caller so that role is judged first.
///
/// # Errors
///
/// - `TokenTooLarge` - token exceeds [`MAX_JWT_SIZE_BYTES`]
/// - `InvalidSignature` - bad structure, encoding, algorithm, or signature
/// - `MalformedClaims`, `UnexpectedAudience`, `NotYetValid` - see
///   [`GatewayClaims::from_payload`]
pub fn decode_gateway_claims(
    token: &str,
    secret: &SecretString,
    now: DateTime<Utc>,
) -> Result<GatewayClaims, JwtValidationError> {
    // Check token size first (DoS prevention)
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "common.jwt",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(JwtValidationError::TokenTooLarge);
    }

    let decoding_key = DecodingKey::from_secret(secret.expose_secret().as_bytes());

    let token_data = decode::<Map<String, Value>>(token, &decoding_key, &hs256_validation())
        .map_err(|e| {
            tracing::debug!(target: "common.jwt", error = %e, "Token signature verification failed");
            JwtValidationError::InvalidSignature
        })?;

    GatewayClaims::from_payload(&token_data.claims, now)
}

/// HS256 signature-only validation.
///
/// Registered claims are checked in [`GatewayClaims::from_payload`] against
/// the caller's `now`, not the library's wall clock.
fn hs256_validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();
    validation
}

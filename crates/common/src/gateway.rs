//! Gateway token verification.
//!
//! Downstream services only accept traffic routed through the API gateway.
//! The gateway proves this by attaching an HS256 JWT with `role: "gateway"`
//! to every request it forwards. This module turns that header value into a
//! [`GatewayVerdict`].
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. token present and non-empty, else [`RejectionReason::MissingToken`]
//! 2. signature, structure, `aud`, `nbf` and `iat`, else
//!    [`RejectionReason::InvalidSignature`]
//! 3. `role == "gateway"`, else [`RejectionReason::InvalidRole`]
//! 4. `exp` absent or not before `now`, else [`RejectionReason::Expired`]
//!
//! Verification is a pure function of `(token, secret, now)`.

use crate::jwt::{decode_gateway_claims, unix_seconds};
use crate::secret::{ExposeSecret, SecretString};
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

/// Why a gateway token was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// No header, or an empty one.
    MissingToken,
    /// Bad signature, wrong algorithm, or an unparseable token.
    InvalidSignature,
    /// Signature is fine but the role claim is not the gateway's.
    InvalidRole,
    /// Signature and role are fine but `exp` is in the past.
    Expired,
}

impl RejectionReason {
    /// Client-facing reason returned in the 403 body.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            RejectionReason::MissingToken => "Missing token",
            RejectionReason::InvalidSignature => "Invalid token",
            RejectionReason::InvalidRole => "Invalid token role",
            RejectionReason::Expired => "Token expired",
        }
    }

    /// Bounded label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RejectionReason::MissingToken => "missing_token",
            RejectionReason::InvalidSignature => "invalid_signature",
            RejectionReason::InvalidRole => "invalid_role",
            RejectionReason::Expired => "expired",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of verifying a gateway token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayVerdict {
    /// The request may proceed.
    Accepted,
    /// The request must be refused.
    Rejected(RejectionReason),
}

impl GatewayVerdict {
    /// Returns true for [`GatewayVerdict::Accepted`].
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        matches!(self, GatewayVerdict::Accepted)
    }

    /// Metric label: `accepted` or the rejection reason label.
    #[must_use]
    pub const fn outcome(self) -> &'static str {
        match self {
            GatewayVerdict::Accepted => "accepted",
            GatewayVerdict::Rejected(reason) => reason.as_str(),
        }
    }
}

/// Startup-time gateway configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayConfigError {
    /// The shared secret is empty or whitespace.
    #[error("Gateway secret must not be empty")]
    EmptySecret,
}

/// Verify a gateway token against `secret` at time `now`.
///
/// Never panics; every malformed input maps to a rejection.
#[must_use]
pub fn verify_gateway_token(
    token: Option<&str>,
    secret: &SecretString,
    now: DateTime<Utc>,
) -> GatewayVerdict {
    let token = match token {
        Some(token) if !token.is_empty() => token,
        _ => return GatewayVerdict::Rejected(RejectionReason::MissingToken),
    };

    let claims = match decode_gateway_claims(token, secret, now) {
        Ok(claims) => claims,
        Err(_) => return GatewayVerdict::Rejected(RejectionReason::InvalidSignature),
    };

    if !claims.is_gateway() {
        tracing::debug!(target: "common.gateway", "Token rejected: role is not gateway");
        return GatewayVerdict::Rejected(RejectionReason::InvalidRole);
    }

    if let Some(exp) = claims.exp {
        if is_expired(exp, now) {
            tracing::debug!(
                target: "common.gateway",
                exp = exp,
                now = now.timestamp(),
                "Token rejected: expired"
            );
            return GatewayVerdict::Rejected(RejectionReason::Expired);
        }
    }

    GatewayVerdict::Accepted
}

/// `exp` is expired when the instant it names is strictly before `now`.
fn is_expired(exp: f64, now: DateTime<Utc>) -> bool {
    exp < unix_seconds(now)
}

/// Process-wide gateway verifier holding the shared secret.
///
/// Built once at startup from configuration and shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct GatewayVerifier {
    secret: SecretString,
}

impl GatewayVerifier {
    /// Create a verifier for `secret`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayConfigError::EmptySecret` when the secret is blank.
    pub fn new(secret: SecretString) -> Result<Self, GatewayConfigError> {
        if secret.expose_secret().trim().is_empty() {
            return Err(GatewayConfigError::EmptySecret);
        }
        Ok(Self { secret })
    }

    /// Verify `token` at time `now`.
    #[must_use]
    pub fn verify(&self, token: Option<&str>, now: DateTime<Utc>) -> GatewayVerdict {
        verify_gateway_token(token, &self.secret, now)
    }

    /// Verify `token` against the current wall clock.
    #[must_use]
    pub fn verify_now(&self, token: Option<&str>) -> GatewayVerdict {
        self.verify(token, Utc::now())
    }
}

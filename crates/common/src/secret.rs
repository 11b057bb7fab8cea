//! Secret types for protecting sensitive values from accidental logging.
//!
//! Re-exports the [`secrecy`] types used for the gateway signing key and
//! database credentials. `SecretString` redacts itself in `Debug` output and
//! is zeroized on drop, so a struct holding one can derive `Debug` safely.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct GatewaySettings {
//!     header: String,
//!     signing_key: SecretString,
//! }
//!
//! let settings = GatewaySettings {
//!     header: "x-gateway-auth".to_string(),
//!     signing_key: SecretString::from("s3cr3t"),
//! };
//!
//! assert!(!format!("{settings:?}").contains("s3cr3t"));
//! assert_eq!(settings.signing_key.expose_secret(), "s3cr3t");
//! ```

pub use secrecy::{ExposeSecret, SecretString};

//! # fanlog-shared
//!
//! Leaf crate of the fanlog workspace. It holds the error envelope every
//! fallible API returns and the secret handling applied to records that leave
//! the process. It depends on no other workspace crate.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod redaction;

pub use errors::{ErrorClass, ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata, Result};
pub use redaction::{REDACTED, SecretString, is_secret_key, redact_json};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

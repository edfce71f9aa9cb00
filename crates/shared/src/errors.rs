//! Error envelope shared by every fallible fanlog API.
//!
//! Logging itself never fails; envelopes come from construction (identity,
//! config, env, clients) and from network deliveries, where they are traced
//! and dropped.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fmt, io};

/// Diagnostic key/value pairs attached to an envelope.
pub type ErrorMetadata = BTreeMap<String, String>;

/// Workspace result alias.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

const CORE_NAMESPACE: &str = "core";
const CONFIG_NAMESPACE: &str = "config";

/// Where a failure comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller or operator mistake (bad config, bad input).
    Expected,
    /// A broken internal assumption.
    Invariant,
    /// I/O and remote endpoint failures.
    Unexpected,
}

impl ErrorKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Expected => "expected",
            Self::Invariant => "invariant",
            Self::Unexpected => "unexpected",
        }
    }
}

/// Whether repeating the operation may succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Transient; a retry may succeed.
    Retriable,
    /// Permanent.
    NonRetriable,
}

impl ErrorClass {
    /// Returns true for [`ErrorClass::Retriable`].
    #[must_use]
    pub const fn is_retriable(self) -> bool {
        matches!(self, Self::Retriable)
    }
}

/// `namespace:code` pair identifying a failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode {
    namespace: String,
    code: String,
}

impl ErrorCode {
    /// Code in an arbitrary namespace (adapters use their provider name).
    pub fn new(namespace: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            code: code.into(),
        }
    }

    /// Code in the `config` namespace.
    pub fn config(code: impl Into<String>) -> Self {
        Self::new(CONFIG_NAMESPACE, code)
    }

    /// `core:invalid_input`
    pub fn invalid_input() -> Self {
        Self::new(CORE_NAMESPACE, "invalid_input")
    }

    /// `core:not_found`
    pub fn not_found() -> Self {
        Self::new(CORE_NAMESPACE, "not_found")
    }

    /// `core:permission_denied`
    pub fn permission_denied() -> Self {
        Self::new(CORE_NAMESPACE, "permission_denied")
    }

    /// `core:timeout`
    pub fn timeout() -> Self {
        Self::new(CORE_NAMESPACE, "timeout")
    }

    /// `core:io`
    pub fn io() -> Self {
        Self::new(CORE_NAMESPACE, "io")
    }

    /// `core:internal`
    pub fn internal() -> Self {
        Self::new(CORE_NAMESPACE, "internal")
    }

    /// Namespace part.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Code part.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.namespace, self.code)
    }
}

/// Structured error carried across crate boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Origin category.
    pub kind: ErrorKind,
    /// Retry classification.
    pub class: ErrorClass,
    /// Stable code.
    pub code: ErrorCode,
    /// Human-readable message. Never contains secret values.
    pub message: String,
    /// Diagnostic metadata (env var names, paths, HTTP status).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: ErrorMetadata,
}

impl ErrorEnvelope {
    fn build(kind: ErrorKind, class: ErrorClass, code: ErrorCode, message: String) -> Self {
        Self {
            kind,
            class,
            code,
            message,
            metadata: ErrorMetadata::new(),
        }
    }

    /// Expected, non-retriable failure.
    pub fn expected(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(
            ErrorKind::Expected,
            ErrorClass::NonRetriable,
            code,
            message.into(),
        )
    }

    /// Construction-time configuration failure (`config:<code>`).
    pub fn configuration(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::expected(ErrorCode::config(code), message)
    }

    /// Broken internal assumption; never retriable.
    pub fn invariant(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::build(
            ErrorKind::Invariant,
            ErrorClass::NonRetriable,
            code,
            message.into(),
        )
    }

    /// I/O or remote failure with an explicit retry class.
    pub fn unexpected(code: ErrorCode, message: impl Into<String>, class: ErrorClass) -> Self {
        Self::build(ErrorKind::Unexpected, class, code, message.into())
    }

    /// Whether this is a `config:*` error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.code.namespace() == CONFIG_NAMESPACE
    }

    /// Whether a retry may succeed.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        self.class.is_retriable()
    }

    /// Attach one metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{} ({}", self.code, self.kind.as_str())?;
        if self.class.is_retriable() {
            formatter.write_str(", retriable")?;
        }
        write!(formatter, "): {}", self.message)
    }
}

impl std::error::Error for ErrorEnvelope {}

impl From<io::Error> for ErrorEnvelope {
    fn from(error: io::Error) -> Self {
        let kind = error.kind();
        let code = match kind {
            io::ErrorKind::NotFound => ErrorCode::not_found(),
            io::ErrorKind::PermissionDenied => ErrorCode::permission_denied(),
            io::ErrorKind::TimedOut => ErrorCode::timeout(),
            _ => ErrorCode::io(),
        };
        let class = if matches!(
            kind,
            io::ErrorKind::WouldBlock
                | io::ErrorKind::TimedOut
                | io::ErrorKind::Interrupted
                | io::ErrorKind::ConnectionReset
                | io::ErrorKind::BrokenPipe
        ) {
            ErrorClass::Retriable
        } else {
            ErrorClass::NonRetriable
        };
        Self::unexpected(code, error.to_string(), class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_live_in_the_config_namespace() {
        let config = ErrorEnvelope::configuration("missing_bot_token", "no token");
        assert_eq!(config.kind, ErrorKind::Expected);
        assert_eq!(config.code, ErrorCode::new("config", "missing_bot_token"));
        assert!(config.is_configuration());
        assert!(!ErrorEnvelope::expected(ErrorCode::invalid_input(), "bad").is_configuration());
    }

    #[test]
    fn io_errors_are_classified_by_kind() {
        let envelope = ErrorEnvelope::from(io::Error::new(io::ErrorKind::PermissionDenied, "ro"));
        assert_eq!(envelope.code, ErrorCode::permission_denied());
        assert!(!envelope.is_retriable());

        let envelope = ErrorEnvelope::from(io::Error::new(io::ErrorKind::TimedOut, "slow disk"));
        assert_eq!(envelope.code, ErrorCode::timeout());
        assert!(envelope.is_retriable());
    }

    #[test]
    fn display_shows_code_kind_and_message() {
        let error = ErrorEnvelope::configuration("unknown_level", "level `loud` is unknown")
            .with_metadata("value", "loud");
        assert_eq!(
            error.to_string(),
            "config:unknown_level (expected): level `loud` is unknown"
        );

        let error = ErrorEnvelope::unexpected(
            ErrorCode::new("telegram", "unavailable"),
            "bad gateway",
            ErrorClass::Retriable,
        );
        assert_eq!(
            error.to_string(),
            "telegram:unavailable (unexpected, retriable): bad gateway"
        );
    }
}

//! # fanlog-domain
//!
//! Value types of the multi-transport logger, with no I/O:
//!
//! - **Severity** - `SeverityLevel`, `ColorName` and their static tables
//! - **Color** - ANSI color rendering
//! - **Records** - `LogEntry`, `LogRecord`, `RecordContext`
//! - **Identity** - `ServiceIdentity` and the `ServiceName` registry
//! - **Transport config** - `TransportConfig` with per-sink options
//! - **Service errors** - `ApiError` and `ServiceError` for invoked operations
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No infrastructure or adapter dependencies

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use fanlog_shared::shared_crate_version;

// =============================================================================
// DOMAIN MODULES
// =============================================================================

pub mod api_error;
pub mod color;
pub mod error;
pub mod identity;
pub mod record;
pub mod services;
pub mod severity;
pub mod transport_config;

pub use api_error::{ApiError, ServiceError};
pub use color::{colorize, paint};
pub use error::ConfigError;
pub use identity::ServiceIdentity;
pub use record::{LogEntry, LogRecord, RECORD_TIMESTAMP_FORMAT, RecordContext, error_chain};
pub use services::ServiceName;
pub use severity::{ColorName, SeverityLevel};
pub use transport_config::{ConsoleOptions, FileOptions, TelegramOptions, TransportConfig};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

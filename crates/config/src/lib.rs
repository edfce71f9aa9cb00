//! # fanlog-config
//!
//! Process-wide logger configuration parsed from environment variables.
//! This crate depends on `shared` only.

/// Environment variable parsing.
pub mod env;

pub use env::{
    DEFAULT_BETTERSTACK_INGEST_URL, DEFAULT_ENVIRONMENT, DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_LOG_DIR,
    DEFAULT_TELEGRAM_API_URL, EnvParseError, LoggerEnv, PRODUCTION_ENVIRONMENT,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

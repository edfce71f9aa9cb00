//! Logger settings read from environment variables.
//!
//! Blank values are rejected instead of defaulted. Tokens are wrapped in
//! [`SecretString`] and never copied into error metadata.

use fanlog_shared::{ErrorEnvelope, REDACTED, SecretString, is_secret_key};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use url::Url;

/// Env var: deployment environment name.
pub const ENV_ENVIRONMENT: &str = "FANLOG_ENV";
/// Env var: deployment environment name (alias).
pub const ENV_ENVIRONMENT_ALIAS: &str = "NODE_ENV";
/// Env var: alert bot token (secret).
// gitleaks:allow
pub const ENV_TELEGRAM_BOT: &str = "TELEGRAM_BOT";
/// Env var: aggregator ingestion token (secret).
// gitleaks:allow
pub const ENV_BETTERSTACK_TOKEN: &str = "BETTERSTACK_TOKEN";
/// Env var: alert API base URL.
pub const ENV_TELEGRAM_API_URL: &str = "TELEGRAM_API_URL";
/// Env var: aggregator ingestion URL.
pub const ENV_BETTERSTACK_INGEST_URL: &str = "BETTERSTACK_INGEST_URL";
/// Env var: directory for file sinks.
pub const ENV_LOG_DIR: &str = "FANLOG_LOG_DIR";
/// Env var: aggregator HTTP client timeout in milliseconds.
pub const ENV_HTTP_TIMEOUT_MS: &str = "FANLOG_HTTP_TIMEOUT_MS";

/// Environment used when none is configured.
pub const DEFAULT_ENVIRONMENT: &str = "development";
/// The only environment in which alerts are sent.
pub const PRODUCTION_ENVIRONMENT: &str = "production";
/// Default alert API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
/// Default aggregator ingestion URL.
pub const DEFAULT_BETTERSTACK_INGEST_URL: &str = "https://in.logs.betterstack.com";
/// Default directory for file sinks.
pub const DEFAULT_LOG_DIR: &str = "./cache/logs";
/// Default HTTP client timeout.
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 10_000;

const ALL_VARS: [&str; 8] = [
    ENV_ENVIRONMENT,
    ENV_ENVIRONMENT_ALIAS,
    ENV_TELEGRAM_BOT,
    ENV_BETTERSTACK_TOKEN,
    ENV_TELEGRAM_API_URL,
    ENV_BETTERSTACK_INGEST_URL,
    ENV_LOG_DIR,
    ENV_HTTP_TIMEOUT_MS,
];

/// Process-wide settings shared by every logger a factory creates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerEnv {
    /// Deployment environment name.
    pub environment: Box<str>,
    /// Alert bot token.
    pub telegram_bot: Option<SecretString>,
    /// Aggregator ingestion token.
    pub betterstack_token: Option<SecretString>,
    /// Alert API base URL, without a trailing slash.
    pub telegram_api_url: Box<str>,
    /// Aggregator ingestion URL, without a trailing slash.
    pub betterstack_ingest_url: Box<str>,
    /// Directory for file sinks.
    pub log_dir: PathBuf,
    /// Aggregator HTTP client timeout in milliseconds.
    pub http_timeout_ms: u64,
}

impl Default for LoggerEnv {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.into(),
            telegram_bot: None,
            betterstack_token: None,
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.into(),
            betterstack_ingest_url: DEFAULT_BETTERSTACK_INGEST_URL.into(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            http_timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
        }
    }
}

impl LoggerEnv {
    /// Parse settings from a key/value map. Absent variables fall back to the
    /// defaults; present ones must be non-blank and well formed.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        let vars = Vars(map);
        let defaults = Self::default();

        Ok(Self {
            environment: vars
                .first_text(&[ENV_ENVIRONMENT, ENV_ENVIRONMENT_ALIAS])?
                .map_or(defaults.environment, Into::into),
            telegram_bot: vars.secret(ENV_TELEGRAM_BOT)?,
            betterstack_token: vars.secret(ENV_BETTERSTACK_TOKEN)?,
            telegram_api_url: vars
                .http_url(ENV_TELEGRAM_API_URL)?
                .unwrap_or(defaults.telegram_api_url),
            betterstack_ingest_url: vars
                .http_url(ENV_BETTERSTACK_INGEST_URL)?
                .unwrap_or(defaults.betterstack_ingest_url),
            log_dir: vars.text(ENV_LOG_DIR)?.map_or(defaults.log_dir, PathBuf::from),
            http_timeout_ms: vars
                .positive_u64(ENV_HTTP_TIMEOUT_MS)?
                .unwrap_or(defaults.http_timeout_ms),
        })
    }

    /// Parse settings from the current process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let map: BTreeMap<String, String> = ALL_VARS
            .iter()
            .filter_map(|name| Some(((*name).to_string(), std::env::var(name).ok()?)))
            .collect();
        Self::from_map(&map)
    }

    /// Whether alerts may be sent from this environment.
    #[must_use]
    pub fn is_production(&self) -> bool {
        &*self.environment == PRODUCTION_ENVIRONMENT
    }
}

/// Rejected environment variable. Secret values are never carried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvParseError {
    /// Present but blank.
    #[error("{var} must be non-empty")]
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// A token variable present but blank.
    #[error("{var} must be non-empty")]
    EmptySecret {
        /// Env var name.
        var: &'static str,
    },
    /// Not a positive integer.
    #[error("{var} must be a positive integer")]
    InvalidInt {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Not an `http`/`https` URL.
    #[error("{var} must be a valid URL")]
    InvalidUrl {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    /// Name of the offending variable.
    #[must_use]
    pub const fn var(&self) -> &'static str {
        match self {
            Self::EmptyValue { var }
            | Self::EmptySecret { var }
            | Self::InvalidInt { var, .. }
            | Self::InvalidUrl { var, .. } => *var,
        }
    }

    const fn code(&self) -> &'static str {
        match self {
            Self::EmptyValue { .. } | Self::EmptySecret { .. } => "empty_env_var",
            Self::InvalidInt { .. } => "invalid_env_int",
            Self::InvalidUrl { .. } => "invalid_env_url",
        }
    }
}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let var = error.var();
        let envelope = Self::configuration(error.code(), error.to_string())
            .with_metadata("env_var", var);
        match error {
            EnvParseError::InvalidInt { value, .. } | EnvParseError::InvalidUrl { value, .. } => {
                let shown = if is_secret_key(var) || var == ENV_TELEGRAM_BOT {
                    REDACTED.to_string()
                } else {
                    value
                };
                envelope.with_metadata("value", shown)
            },
            EnvParseError::EmptyValue { .. } | EnvParseError::EmptySecret { .. } => envelope,
        }
    }
}

/// Borrowed view over raw variables with the per-type parsing rules.
struct Vars<'a>(&'a BTreeMap<String, String>);

impl<'a> Vars<'a> {
    fn raw(&self, var: &str) -> Option<&'a str> {
        self.0.get(var).map(String::as_str)
    }

    fn text(&self, var: &'static str) -> Result<Option<&'a str>, EnvParseError> {
        match self.raw(var).map(str::trim) {
            Some("") => Err(EnvParseError::EmptyValue { var }),
            trimmed => Ok(trimmed),
        }
    }

    /// First variable of `vars` that is present wins, even when a later one is
    /// also set.
    fn first_text(&self, vars: &[&'static str]) -> Result<Option<&'a str>, EnvParseError> {
        vars.iter()
            .find(|var| self.0.contains_key(**var))
            .map_or(Ok(None), |var| self.text(*var))
    }

    fn secret(&self, var: &'static str) -> Result<Option<SecretString>, EnvParseError> {
        self.text(var)
            .map_err(|_| EnvParseError::EmptySecret { var })
            .map(|value| value.map(SecretString::from))
    }

    fn positive_u64(&self, var: &'static str) -> Result<Option<u64>, EnvParseError> {
        let Some(text) = self.text(var)? else {
            return Ok(None);
        };
        match text.parse::<u64>() {
            Ok(value) if value > 0 => Ok(Some(value)),
            _ => Err(EnvParseError::InvalidInt {
                var,
                value: text.to_string(),
            }),
        }
    }

    fn http_url(&self, var: &'static str) -> Result<Option<Box<str>>, EnvParseError> {
        let Some(text) = self.text(var)? else {
            return Ok(None);
        };
        match Url::parse(text) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                Ok(Some(url.as_str().trim_end_matches('/').into()))
            },
            _ => Err(EnvParseError::InvalidUrl {
                var,
                value: text.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanlog_shared::ErrorCode;
    use std::error::Error;

    fn map(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
        entries
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn empty_map_yields_defaults() -> Result<(), Box<dyn Error>> {
        let env = LoggerEnv::from_map(&BTreeMap::new())?;
        assert_eq!(env, LoggerEnv::default());
        assert!(!env.is_production());
        assert_eq!(&*env.telegram_api_url, DEFAULT_TELEGRAM_API_URL);
        Ok(())
    }

    #[test]
    fn primary_environment_var_wins_over_alias() -> Result<(), Box<dyn Error>> {
        let env = LoggerEnv::from_map(&map(&[
            (ENV_ENVIRONMENT, "production"),
            (ENV_ENVIRONMENT_ALIAS, "staging"),
        ]))?;
        assert!(env.is_production());

        let env = LoggerEnv::from_map(&map(&[(ENV_ENVIRONMENT_ALIAS, " staging ")]))?;
        assert_eq!(&*env.environment, "staging");
        Ok(())
    }

    #[test]
    fn urls_are_validated_and_normalized() -> Result<(), Box<dyn Error>> {
        let env = LoggerEnv::from_map(&map(&[(ENV_TELEGRAM_API_URL, "http://127.0.0.1:9000/")]))?;
        assert_eq!(&*env.telegram_api_url, "http://127.0.0.1:9000");

        let error = LoggerEnv::from_map(&map(&[(ENV_BETTERSTACK_INGEST_URL, "ftp://logs")])).err();
        assert!(matches!(error, Some(EnvParseError::InvalidUrl { .. })));
        Ok(())
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let error = LoggerEnv::from_map(&map(&[(ENV_HTTP_TIMEOUT_MS, "0")])).err();
        assert!(matches!(error, Some(EnvParseError::InvalidInt { .. })));

        let error = LoggerEnv::from_map(&map(&[(ENV_HTTP_TIMEOUT_MS, "soon")])).err();
        assert!(matches!(error, Some(EnvParseError::InvalidInt { .. })));
    }

    #[test]
    fn secret_values_are_redacted_in_error_metadata() -> Result<(), Box<dyn Error>> {
        let error = LoggerEnv::from_map(&map(&[(ENV_TELEGRAM_BOT, "   ")])).err();
        let envelope: ErrorEnvelope = error
            .ok_or_else(|| std::io::Error::other("expected secret error"))?
            .into();

        assert_eq!(envelope.code, ErrorCode::config("empty_env_var"));
        assert!(envelope.is_configuration());
        assert_eq!(
            envelope.metadata.get("env_var").map(String::as_str),
            Some(ENV_TELEGRAM_BOT)
        );
        assert!(
            !envelope.metadata.contains_key("value"),
            "empty secrets should not echo value"
        );
        Ok(())
    }

    #[test]
    fn secrets_never_show_in_debug_output() -> Result<(), Box<dyn Error>> {
        let env = LoggerEnv::from_map(&map(&[
            (ENV_TELEGRAM_BOT, "123:abc"),
            (ENV_BETTERSTACK_TOKEN, "ingest-token"),
        ]))?;
        let rendered = format!("{env:?}");
        assert!(!rendered.contains("123:abc"));
        assert!(!rendered.contains("ingest-token"));
        assert_eq!(
            env.telegram_bot.as_ref().map(SecretString::expose),
            Some("123:abc")
        );
        Ok(())
    }
}

//! Per-instance transport configuration.
//!
//! A `TransportConfig` is built (or deserialized) once per logger instance and
//! never mutated afterwards. Every field is optional; the accessors resolve the
//! documented defaults.

use crate::{ConfigError, SeverityLevel};
use serde::{Deserialize, Serialize};

/// Configuration for one logger instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TransportConfig {
    /// Calling-context name stamped on every record.
    #[serde(rename = "fn", skip_serializing_if = "Option::is_none")]
    pub fn_name: Option<Box<str>>,
    /// Console sink options.
    pub console: ConsoleOptions,
    /// File sink options.
    pub file: FileOptions,
    /// Alert sink options.
    pub telegram: TelegramOptions,
}

impl TransportConfig {
    /// Default configuration with a calling-context name.
    pub fn with_fn(fn_name: impl Into<Box<str>>) -> Self {
        Self {
            fn_name: Some(fn_name.into()),
            ..Self::default()
        }
    }

    /// Check the parts serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.fn_name.as_deref() {
            Some(name) if name.trim().is_empty() => Err(ConfigError::EmptyFnName),
            _ => Ok(()),
        }
    }
}

/// Console sink options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ConsoleOptions {
    /// Minimum level (default `info`).
    pub level: Option<SeverityLevel>,
    /// Turn the console sink off.
    pub disable: bool,
    /// Print stacks (default true).
    pub stack: Option<bool>,
    /// Print the full record for debug entries (default true).
    pub data: Option<bool>,
}

impl ConsoleOptions {
    /// Resolved threshold.
    #[must_use]
    pub fn effective_level(&self) -> SeverityLevel {
        self.level.unwrap_or(SeverityLevel::Info)
    }

    /// Resolved stack flag.
    #[must_use]
    pub fn show_stack(&self) -> bool {
        self.stack.unwrap_or(true)
    }

    /// Resolved data flag.
    #[must_use]
    pub fn show_data(&self) -> bool {
        self.data.unwrap_or(true)
    }
}

/// File sink options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct FileOptions {
    /// Minimum level (default: the lowest-verbosity level, i.e. everything).
    pub level: Option<SeverityLevel>,
    /// Turn the file sink off.
    pub disable: bool,
}

impl FileOptions {
    /// Resolved threshold.
    #[must_use]
    pub fn effective_level(&self) -> SeverityLevel {
        self.level.unwrap_or_else(SeverityLevel::lowest_verbosity)
    }
}

/// Alert sink options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TelegramOptions {
    /// Level that triggers an alert (exact match, default `error`).
    pub level: Option<SeverityLevel>,
    /// Turn the alert sink off.
    pub disable: bool,
    /// Ask the alert channel to deliver silently.
    pub disable_notification: bool,
}

impl TelegramOptions {
    /// Resolved alert level.
    #[must_use]
    pub fn effective_level(&self) -> SeverityLevel {
        self.level.unwrap_or(SeverityLevel::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_resolve_per_transport() {
        let config = TransportConfig::default();
        assert_eq!(config.console.effective_level(), SeverityLevel::Info);
        assert!(config.console.show_stack());
        assert!(config.console.show_data());
        assert_eq!(config.file.effective_level(), SeverityLevel::Custom);
        assert_eq!(config.telegram.effective_level(), SeverityLevel::Error);
        assert!(!config.telegram.disable_notification);
    }

    #[test]
    fn deserializes_from_camel_case_json() -> Result<(), serde_json::Error> {
        let config: TransportConfig = serde_json::from_value(json!({
            "fn": "runJob",
            "console": { "level": "warn", "stack": false },
            "file": { "disable": true },
            "telegram": { "disableNotification": true }
        }))?;

        assert_eq!(config.fn_name.as_deref(), Some("runJob"));
        assert_eq!(config.console.effective_level(), SeverityLevel::Warn);
        assert!(!config.console.show_stack());
        assert!(config.file.disable);
        assert!(config.telegram.disable_notification);
        Ok(())
    }

    #[test]
    fn unknown_levels_fail_deserialization() {
        let parsed = serde_json::from_value::<TransportConfig>(json!({
            "console": { "level": "loud" }
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn blank_fn_name_is_rejected() {
        assert_eq!(
            TransportConfig::with_fn("  ").validate(),
            Err(ConfigError::EmptyFnName)
        );
        assert_eq!(TransportConfig::with_fn("runJob").validate(), Ok(()));
    }
}

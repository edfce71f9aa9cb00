//! Construction-time configuration failures.

use fanlog_shared::ErrorEnvelope;

/// Misconfiguration detected while building identities, transports or colors.
///
/// Every variant is raised synchronously at construction; none of them is
/// deferred to a log call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A mandatory service identity field was empty or zero.
    #[error("service identity field `{field}` is required")]
    MissingIdentityField {
        /// Name of the missing field.
        field: &'static str,
    },
    /// The log filename would escape the log directory.
    #[error("log filename `{filename}` must be a bare file stem")]
    InvalidFilename {
        /// Rejected filename.
        filename: String,
    },
    /// The alert bot token is absent from process configuration.
    #[error("alert bot token is required")]
    MissingBotToken,
    /// The log aggregator ingestion token is absent from process configuration.
    #[error("log aggregator token is required")]
    MissingAggregatorToken,
    /// The alert topic id is missing (zero).
    #[error("alert topic id is required")]
    MissingTopicId,
    /// An ANSI color code outside the color table was requested.
    #[error("color code {code} is not supported")]
    UnknownColorCode {
        /// Rejected code.
        code: u8,
    },
    /// Colorizing requires non-empty text.
    #[error("text to colorize must be non-empty")]
    EmptyText,
    /// A level name outside the severity table.
    #[error("unknown severity level `{value}`")]
    UnknownLevel {
        /// Rejected input.
        value: String,
    },
    /// A service name outside the service registry.
    #[error("unknown service `{value}`")]
    UnknownService {
        /// Rejected input.
        value: String,
    },
    /// The calling-context name was set but blank.
    #[error("calling context name must be non-empty when set")]
    EmptyFnName,
    /// An application error was built without a status code or message.
    #[error("application error `{field}` is required")]
    InvalidApiError {
        /// Name of the missing field.
        field: &'static str,
    },
}

impl ConfigError {
    const fn code(&self) -> &'static str {
        match self {
            Self::MissingIdentityField { .. } => "missing_identity_field",
            Self::InvalidFilename { .. } => "invalid_filename",
            Self::MissingBotToken => "missing_bot_token",
            Self::MissingAggregatorToken => "missing_aggregator_token",
            Self::MissingTopicId => "missing_topic_id",
            Self::UnknownColorCode { .. } => "unknown_color_code",
            Self::EmptyText => "empty_text",
            Self::UnknownLevel { .. } => "unknown_level",
            Self::UnknownService { .. } => "unknown_service",
            Self::EmptyFnName => "empty_fn_name",
            Self::InvalidApiError { .. } => "invalid_api_error",
        }
    }
}

impl From<ConfigError> for ErrorEnvelope {
    fn from(error: ConfigError) -> Self {
        let envelope = Self::configuration(error.code(), error.to_string());
        match error {
            ConfigError::MissingIdentityField { field }
            | ConfigError::InvalidApiError { field } => {
                envelope.with_metadata("field", field)
            },
            ConfigError::InvalidFilename { filename } => {
                envelope.with_metadata("filename", filename)
            },
            ConfigError::UnknownColorCode { code } => {
                envelope.with_metadata("code", code.to_string())
            },
            ConfigError::UnknownLevel { value } | ConfigError::UnknownService { value } => {
                envelope.with_metadata("value", value)
            },
            ConfigError::MissingBotToken
            | ConfigError::MissingAggregatorToken
            | ConfigError::MissingTopicId
            | ConfigError::EmptyText
            | ConfigError::EmptyFnName => envelope,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_map_into_config_namespace() {
        let envelope: ErrorEnvelope =
            ConfigError::MissingIdentityField { field: "topic_id" }.into();
        assert!(envelope.is_configuration());
        assert_eq!(envelope.code.code(), "missing_identity_field");
        assert_eq!(
            envelope.metadata.get("field").map(String::as_str),
            Some("topic_id")
        );

        let envelope: ErrorEnvelope = ConfigError::UnknownColorCode { code: 99 }.into();
        assert_eq!(envelope.code.code(), "unknown_color_code");
        assert_eq!(envelope.metadata.get("code").map(String::as_str), Some("99"));
    }
}

use fanlog_shared::ErrorEnvelope;
use thiserror::Error;

/// Process exit status of the `fanlog` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    Internal = 1,
    InvalidInput = 2,
    Io = 3,
    /// Logger construction rejected the environment or transport options.
    Config = 4,
}

impl ExitCode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Logger(#[from] ErrorEnvelope),
}

impl CliError {
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::InvalidInput(_) => ExitCode::InvalidInput,
            Self::Io(_) => ExitCode::Io,
            Self::Logger(error) if error.is_configuration() => ExitCode::Config,
            Self::Serialization(_) | Self::Logger(_) => ExitCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanlog_shared::{ErrorClass, ErrorCode};

    #[test]
    fn logger_errors_split_config_from_delivery() {
        let config = CliError::from(ErrorEnvelope::configuration("missing_bot_token", "no token"));
        assert_eq!(config.exit_code(), ExitCode::Config);
        assert_eq!(config.exit_code().as_u8(), 4);

        let delivery = CliError::from(ErrorEnvelope::unexpected(
            ErrorCode::new("betterstack", "unavailable"),
            "503",
            ErrorClass::Retriable,
        ));
        assert_eq!(delivery.exit_code(), ExitCode::Internal);
        assert_eq!(
            delivery.to_string(),
            "betterstack:unavailable (unexpected, retriable): 503"
        );
    }
}

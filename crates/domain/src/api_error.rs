//! Errors raised by service operations run through the invoker.

use crate::ConfigError;
use serde::Serialize;
use serde_json::Value;

/// An expected application failure carrying an HTTP-like status code.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    status_code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl ApiError {
    /// Build an application error; the status code and message are mandatory.
    pub fn new(
        status_code: u16,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Result<Self, ConfigError> {
        let message = message.into();
        if status_code == 0 {
            return Err(ConfigError::InvalidApiError {
                field: "status_code",
            });
        }
        if message.trim().is_empty() {
            return Err(ConfigError::InvalidApiError { field: "message" });
        }
        Ok(Self {
            status_code,
            message,
            data,
        })
    }

    /// Status code returned to the caller.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// Error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Optional payload.
    #[must_use]
    pub const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// JSON form used as log data.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// Failure of a service operation.
///
/// `Application` errors are expected and logged through the pipeline;
/// anything else is `Unrecognized` and only printed.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Expected failure with its own status code.
    #[error(transparent)]
    Application(#[from] ApiError),
    /// Any other failure (typically a programming error).
    #[error("{0}")]
    Unrecognized(Box<dyn std::error::Error + Send + Sync>),
}

impl ServiceError {
    /// Wrap an arbitrary error as unrecognized.
    pub fn unrecognized(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Unrecognized(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_requires_status_and_message() {
        assert_eq!(
            ApiError::new(0, "Not found", None),
            Err(ConfigError::InvalidApiError {
                field: "status_code"
            })
        );
        assert_eq!(
            ApiError::new(404, "", None),
            Err(ConfigError::InvalidApiError { field: "message" })
        );
    }

    #[test]
    fn api_error_serializes_for_logging() -> Result<(), ConfigError> {
        let error = ApiError::new(404, "Not found", Some(json!({"name": "Ivan"})))?;
        assert_eq!(error.to_string(), "Not found");
        assert_eq!(
            error.to_json(),
            json!({"statusCode": 404, "message": "Not found", "data": {"name": "Ivan"}})
        );
        Ok(())
    }

    #[test]
    fn service_error_wraps_both_kinds() -> Result<(), ConfigError> {
        let application: ServiceError = ApiError::new(409, "Conflict", None)?.into();
        assert!(matches!(application, ServiceError::Application(_)));

        let unrecognized = ServiceError::unrecognized("index out of range");
        assert_eq!(unrecognized.to_string(), "index out of range");
        Ok(())
    }
}

//! Shared reqwest plumbing for the network sinks.

use fanlog_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// Client with default `headers`. `None` leaves request time unbounded apart
/// from what the network stack enforces.
pub(crate) fn build_client(
    provider: &'static str,
    timeout_ms: Option<u64>,
    headers: HeaderMap,
) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().default_headers(headers);
    match timeout_ms {
        Some(0) => {
            return Err(ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                "timeout must be greater than zero",
            ));
        },
        Some(timeout_ms) => builder = builder.timeout(Duration::from_millis(timeout_ms)),
        None => {},
    }

    builder
        .build()
        .map_err(|error| {
            ErrorEnvelope::unexpected(
                ErrorCode::new(provider, "client_init_failed"),
                format!("failed to build {provider} client: {error}"),
                ErrorClass::NonRetriable,
            )
        })
}

pub(crate) fn map_reqwest_error(provider: &'static str, error: &reqwest::Error) -> ErrorEnvelope {
    if error.is_timeout() {
        return ErrorEnvelope::unexpected(
            ErrorCode::timeout(),
            format!("{provider} request timed out"),
            ErrorClass::Retriable,
        );
    }
    if error.is_connect() {
        return ErrorEnvelope::unexpected(
            ErrorCode::io(),
            format!("{provider} connection failed: {error}"),
            ErrorClass::Retriable,
        );
    }
    ErrorEnvelope::unexpected(
        ErrorCode::new(provider, "request_failed"),
        format!("{provider} request failed: {error}"),
        ErrorClass::NonRetriable,
    )
}

pub(crate) fn map_http_status(
    provider: &'static str,
    status: StatusCode,
    description: Option<String>,
) -> ErrorEnvelope {
    let message =
        description.unwrap_or_else(|| format!("{provider} request failed with status {status}"));
    let envelope = match status.as_u16() {
        400 | 404 | 422 => ErrorEnvelope::expected(ErrorCode::invalid_input(), message),
        401 | 403 => ErrorEnvelope::expected(ErrorCode::permission_denied(), message),
        408 => ErrorEnvelope::unexpected(ErrorCode::timeout(), message, ErrorClass::Retriable),
        429 => ErrorEnvelope::unexpected(
            ErrorCode::new(provider, "rate_limited"),
            message,
            ErrorClass::Retriable,
        ),
        _ if status.is_server_error() => ErrorEnvelope::unexpected(
            ErrorCode::new(provider, "unavailable"),
            message,
            ErrorClass::Retriable,
        ),
        _ => ErrorEnvelope::unexpected(
            ErrorCode::new(provider, "http_error"),
            message,
            ErrorClass::NonRetriable,
        ),
    };
    envelope.with_metadata("status", status.as_u16().to_string())
}

//! Outbound delivery contracts for the network sinks.

use crate::BoxFuture;
use fanlog_domain::LogRecord;
use fanlog_shared::Result;
use serde::Serialize;

/// Parse mode the alert endpoint uses for message text.
pub const ALERT_PARSE_MODE: &str = "HTML";

/// Rendered alert ready for the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertMessage {
    /// Destination chat.
    pub chat_id: i64,
    /// Destination thread (the service's topic).
    pub message_thread_id: u64,
    /// HTML body.
    pub text: String,
    /// Always [`ALERT_PARSE_MODE`].
    pub parse_mode: &'static str,
    /// Silent delivery flag; kept on the message but not sent.
    #[serde(skip)]
    pub disable_notification: bool,
}

/// Sends alerts to the chat endpoint.
pub trait AlertDeliveryPort: Send + Sync {
    /// Deliver one alert.
    fn deliver(&self, message: AlertMessage) -> BoxFuture<'_, Result<()>>;
}

/// Ships records to the remote log aggregator.
pub trait AggregatorDeliveryPort: Send + Sync {
    /// Deliver one record.
    fn deliver(&self, record: LogRecord) -> BoxFuture<'_, Result<()>>;
}

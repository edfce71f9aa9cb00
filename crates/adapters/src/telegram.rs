//! Chat alert transport backed by the Telegram Bot API.
//!
//! Alerts are sent only from production, only for the configured level (exact
//! match) or records flagged with `force_alert`. Rendering uses HTML parse mode
//! so interpolated text is escaped.

use crate::dispatch::FireAndForget;
use crate::http::{build_client, map_http_status, map_reqwest_error};
use fanlog_config::PRODUCTION_ENVIRONMENT;
use fanlog_domain::ConfigError;
use fanlog_ports::{
    ALERT_PARSE_MODE, AlertDeliveryPort, AlertMessage, BoxFuture, LogRecord, SeverityLevel,
    TransportPort,
};
use fanlog_shared::{ErrorCode, ErrorEnvelope, Result, SecretString, redact_json};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Group chat every service posts its alerts to.
pub const ALERT_CHAT_ID: i64 = -1_002_083_635_464;

const PROVIDER: &str = "telegram";
const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Construction parameters of an [`AlertTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSettings {
    /// Level that triggers an alert.
    pub min_level: SeverityLevel,
    /// Deployment environment of the process.
    pub environment: Box<str>,
    /// Thread the service posts into.
    pub topic_id: u64,
    /// Silent delivery flag carried on each message.
    pub disable_notification: bool,
}

/// Transport forwarding selected records to the alert chat.
pub struct AlertTransport {
    settings: AlertSettings,
    delivery: Arc<dyn AlertDeliveryPort>,
    dispatcher: FireAndForget,
}

impl AlertTransport {
    /// Build the transport; a zero topic id is rejected.
    pub fn new(
        settings: AlertSettings,
        delivery: Arc<dyn AlertDeliveryPort>,
        dispatcher: FireAndForget,
    ) -> std::result::Result<Self, ConfigError> {
        if settings.topic_id == 0 {
            return Err(ConfigError::MissingTopicId);
        }
        Ok(Self {
            settings,
            delivery,
            dispatcher,
        })
    }

    /// Whether `record` qualifies for an alert.
    #[must_use]
    pub fn accepts(&self, record: &LogRecord) -> bool {
        (record.level == self.settings.min_level || record.force_alert)
            && &*self.settings.environment == PRODUCTION_ENVIRONMENT
    }

    /// Message that would be delivered for `record`.
    #[must_use]
    pub fn message_for(&self, record: &LogRecord) -> AlertMessage {
        AlertMessage {
            chat_id: ALERT_CHAT_ID,
            message_thread_id: self.settings.topic_id,
            text: render_alert(record),
            parse_mode: ALERT_PARSE_MODE,
            disable_notification: self.settings.disable_notification,
        }
    }
}

impl TransportPort for AlertTransport {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn level(&self) -> Option<SeverityLevel> {
        None
    }

    fn log(&self, record: &LogRecord) {
        if !self.accepts(record) {
            return;
        }
        let message = self.message_for(record);
        let delivery = Arc::clone(&self.delivery);
        self.dispatcher
            .spawn(PROVIDER, Box::pin(async move { delivery.deliver(message).await }));
    }
}

/// Render the HTML alert body for a record.
#[must_use]
pub fn render_alert(record: &LogRecord) -> String {
    let mut text = format!(
        "{} <code>{}</code> <code>{}</code>\n\n{}",
        record.level.emoji(),
        record.level,
        escape_html(&record.service),
        escape_html(&record.message)
    );
    if let Some(stack) = record.stack.as_deref() {
        text.push_str("\n\n<pre>");
        text.push_str(&escape_html(stack));
        text.push_str("</pre>");
    }

    let mut body = record.to_json();
    redact_json(&mut body);
    let pretty = serde_json::to_string_pretty(&body).unwrap_or_default();
    text.push_str("\n\nRequest body\n<pre><code class=\"language-javascript\">");
    text.push_str(&escape_html(&pretty));
    text.push_str("</code></pre>");
    text
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for character in input.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Telegram client configuration.
#[derive(Debug, Clone)]
pub struct TelegramClientConfig {
    /// Bot token.
    pub bot_token: SecretString,
    /// API base URL (`https://api.telegram.org` in production).
    pub base_url: Box<str>,
    /// Request timeout in milliseconds. Alerts are normally sent without one.
    pub timeout_ms: Option<u64>,
}

/// Sends rendered alerts through `sendMessage`.
pub struct TelegramClient {
    client: reqwest::Client,
    endpoint: SecretString,
}

impl fmt::Debug for TelegramClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TelegramClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a client; a blank token is a configuration error.
    pub fn new(config: &TelegramClientConfig) -> Result<Self> {
        if config.bot_token.is_blank() {
            return Err(ConfigError::MissingBotToken.into());
        }
        let base_url = config.base_url.trim().trim_end_matches('/');
        let endpoint = format!(
            "{base_url}/bot{}/sendMessage",
            config.bot_token.expose().trim()
        );

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8));
        let client = build_client(PROVIDER, config.timeout_ms, headers)?;

        Ok(Self {
            client,
            endpoint: SecretString::new(endpoint),
        })
    }

    /// POST one message.
    pub async fn send_message(&self, message: &AlertMessage) -> Result<()> {
        let body = serde_json::to_vec(message).map_err(|error| {
            ErrorEnvelope::invariant(
                ErrorCode::internal(),
                format!("alert message is not serializable: {error}"),
            )
        })?;
        let response = self
            .client
            .post(self.endpoint.expose())
            .body(body)
            .send()
            .await
            .map_err(|error| map_reqwest_error(PROVIDER, &error.without_url()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let payload = response
            .bytes()
            .await
            .map_err(|error| map_reqwest_error(PROVIDER, &error.without_url()))?;
        let description = serde_json::from_slice::<TelegramErrorResponse>(&payload)
            .ok()
            .and_then(|parsed| parsed.description);
        Err(map_http_status(PROVIDER, status, description))
    }
}

impl AlertDeliveryPort for TelegramClient {
    fn deliver(&self, message: AlertMessage) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.send_message(&message).await })
    }
}

#[derive(Debug, Deserialize)]
struct TelegramErrorResponse {
    description: Option<String>,
}

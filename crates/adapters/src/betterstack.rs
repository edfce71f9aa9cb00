//! Remote log aggregation through the BetterStack (Logtail) HTTP ingestion API.

use crate::dispatch::FireAndForget;
use crate::http::{build_client, map_http_status, map_reqwest_error};
use chrono::Local;
use fanlog_domain::{ConfigError, RECORD_TIMESTAMP_FORMAT};
use fanlog_ports::{AggregatorDeliveryPort, BoxFuture, LogRecord, SeverityLevel, TransportPort};
use fanlog_shared::{ErrorCode, ErrorEnvelope, Result, SecretString, redact_json};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;
use std::sync::Arc;

const PROVIDER: &str = "betterstack";

/// Transport shipping every record to the aggregator.
pub struct AggregatorTransport {
    delivery: Arc<dyn AggregatorDeliveryPort>,
    dispatcher: FireAndForget,
}

impl AggregatorTransport {
    /// Create the transport around a delivery port.
    #[must_use]
    pub fn new(delivery: Arc<dyn AggregatorDeliveryPort>, dispatcher: FireAndForget) -> Self {
        Self {
            delivery,
            dispatcher,
        }
    }
}

impl TransportPort for AggregatorTransport {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn level(&self) -> Option<SeverityLevel> {
        Some(SeverityLevel::lowest_verbosity())
    }

    fn log(&self, record: &LogRecord) {
        let record = record.clone();
        let delivery = Arc::clone(&self.delivery);
        self.dispatcher
            .spawn(PROVIDER, Box::pin(async move { delivery.deliver(record).await }));
    }
}

/// Ingestion payload: the redacted record plus a zoned `dt` timestamp.
#[must_use]
pub fn ingestion_payload(record: &LogRecord) -> Value {
    let mut payload = record.to_json();
    redact_json(&mut payload);
    let dt = record
        .timestamp
        .and_local_timezone(Local)
        .earliest()
        .map_or_else(
            || record.timestamp.format(RECORD_TIMESTAMP_FORMAT).to_string(),
            |zoned| zoned.to_rfc3339(),
        );
    if let Value::Object(map) = &mut payload {
        map.insert("dt".to_string(), Value::String(dt));
    }
    payload
}

/// BetterStack client configuration.
#[derive(Debug, Clone)]
pub struct BetterStackClientConfig {
    /// Source ingestion token.
    pub token: SecretString,
    /// Ingestion URL.
    pub ingest_url: Box<str>,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

/// Posts records to the ingestion endpoint.
#[derive(Debug)]
pub struct BetterStackClient {
    client: reqwest::Client,
    endpoint: Box<str>,
}

impl BetterStackClient {
    /// Create a client; a blank token is a configuration error.
    pub fn new(config: &BetterStackClientConfig) -> Result<Self> {
        if config.token.is_blank() {
            return Err(ConfigError::MissingAggregatorToken.into());
        }

        let mut headers = HeaderMap::new();
        let mut auth_header =
            HeaderValue::from_str(&format!("Bearer {}", config.token.expose().trim())).map_err(
                |_| {
                    ErrorEnvelope::expected(
                        ErrorCode::invalid_input(),
                        "aggregator token contains invalid header characters",
                    )
                },
            )?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);
        let client = build_client(PROVIDER, Some(config.timeout_ms), headers)?;

        Ok(Self {
            client,
            endpoint: config.ingest_url.trim().trim_end_matches('/').into(),
        })
    }

    /// POST one record.
    pub async fn ingest(&self, record: &LogRecord) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint.as_ref())
            .json(&ingestion_payload(record))
            .send()
            .await
            .map_err(|error| map_reqwest_error(PROVIDER, &error))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(map_http_status(PROVIDER, status, None))
    }
}

impl AggregatorDeliveryPort for BetterStackClient {
    fn deliver(&self, record: LogRecord) -> BoxFuture<'_, Result<()>> {
        Box::pin(async move { self.ingest(&record).await })
    }
}

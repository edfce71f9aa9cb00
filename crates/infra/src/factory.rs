//! Composition root: one factory per service identity, one logger per call.

use crate::logger::Logger;
use crate::InfraResult;
use fanlog_adapters::{
    AggregatorTransport, AlertSettings, AlertTransport, AppendFileSink, BetterStackClient,
    BetterStackClientConfig, ConsoleFormatOptions, ConsoleTransport, FileTransport, FireAndForget,
    LogSink, StdoutLogSink, TelegramClient, TelegramClientConfig,
};
use fanlog_config::LoggerEnv;
use fanlog_domain::{ConfigError, RecordContext, ServiceIdentity, ServiceName, TransportConfig};
use fanlog_ports::{AggregatorDeliveryPort, AlertDeliveryPort, TransportPort};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Builds [`Logger`] instances bound to one service.
///
/// Network clients are created once, from the tokens in [`LoggerEnv`], and
/// shared by every instance. Missing tokens only fail instance creation when
/// the corresponding sink is enabled and no delivery override is set.
#[derive(Clone)]
pub struct LoggerFactory {
    identity: ServiceIdentity,
    env: LoggerEnv,
    console_sink: Arc<dyn LogSink>,
    alert_delivery: Option<Arc<dyn AlertDeliveryPort>>,
    aggregator_delivery: Option<Arc<dyn AggregatorDeliveryPort>>,
    dispatcher: FireAndForget,
}

impl fmt::Debug for LoggerFactory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoggerFactory")
            .field("identity", &self.identity)
            .field("env", &self.env)
            .field("alert_delivery", &self.alert_delivery.is_some())
            .field("aggregator_delivery", &self.aggregator_delivery.is_some())
            .finish_non_exhaustive()
    }
}

impl LoggerFactory {
    /// Create a factory, building HTTP clients for every configured token.
    pub fn new(identity: ServiceIdentity, env: LoggerEnv) -> InfraResult<Self> {
        let alert_delivery = alert_client(&env)?;
        let aggregator_delivery = aggregator_client(&env)?;

        Ok(Self {
            identity,
            env,
            console_sink: Arc::new(StdoutLogSink),
            alert_delivery,
            aggregator_delivery,
            dispatcher: FireAndForget::new(),
        })
    }

    /// Create a factory for a registered service.
    pub fn from_service(name: ServiceName, env: LoggerEnv) -> InfraResult<Self> {
        Self::new(ServiceIdentity::for_service(name)?, env)
    }

    /// Replace the console sink (stdout by default).
    #[must_use]
    pub fn with_console_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.console_sink = sink;
        self
    }

    /// Replace the alert delivery strategy; the bot token is then not needed.
    #[must_use]
    pub fn with_alert_delivery(mut self, delivery: Arc<dyn AlertDeliveryPort>) -> Self {
        self.alert_delivery = Some(delivery);
        self
    }

    /// Replace the aggregator delivery strategy; the ingestion token is then not needed.
    #[must_use]
    pub fn with_aggregator_delivery(mut self, delivery: Arc<dyn AggregatorDeliveryPort>) -> Self {
        self.aggregator_delivery = Some(delivery);
        self
    }

    /// Identity stamped on every record.
    #[must_use]
    pub const fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    /// Process settings the factory was built with.
    #[must_use]
    pub const fn env(&self) -> &LoggerEnv {
        &self.env
    }

    /// File the file sink appends to.
    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.env
            .log_dir
            .join(format!("{}.log", self.identity.filename()))
    }

    /// Build a logger wired to every enabled sink.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(service = self.identity.service(), fn_name = config.fn_name.as_deref())
    )]
    pub fn create_instance(&self, config: &TransportConfig) -> InfraResult<Logger> {
        config.validate()?;
        // Every configuration check runs before the file sink touches disk.
        let alerts = if config.telegram.disable {
            None
        } else {
            let delivery = self
                .alert_delivery
                .clone()
                .ok_or(ConfigError::MissingBotToken)?;
            let settings = AlertSettings {
                min_level: config.telegram.effective_level(),
                environment: self.env.environment.clone(),
                topic_id: self.identity.topic_id(),
                disable_notification: config.telegram.disable_notification,
            };
            Some(AlertTransport::new(
                settings,
                delivery,
                self.dispatcher.clone(),
            )?)
        };
        let aggregator = self
            .aggregator_delivery
            .clone()
            .ok_or(ConfigError::MissingAggregatorToken)?;

        let mut transports: Vec<Box<dyn TransportPort>> = Vec::with_capacity(4);

        if !config.console.disable {
            transports.push(Box::new(ConsoleTransport::new(
                Arc::clone(&self.console_sink),
                config.console.effective_level(),
                ConsoleFormatOptions {
                    show_stack: config.console.show_stack(),
                    show_data: config.console.show_data(),
                },
            )));
        }

        if !config.file.disable {
            let sink = AppendFileSink::open(self.log_path())?;
            transports.push(Box::new(FileTransport::new(
                Arc::new(sink),
                config.file.effective_level(),
            )));
        }

        if let Some(alerts) = alerts {
            transports.push(Box::new(alerts));
        }
        transports.push(Box::new(AggregatorTransport::new(
            aggregator,
            self.dispatcher.clone(),
        )));

        let context = RecordContext::new(
            &self.identity,
            config.fn_name.as_deref(),
            self.env.environment.clone(),
        );
        let logger = Logger::new(context, transports, self.dispatcher.clone());
        tracing::debug!(transports = ?logger.transport_names(), "logger instance created");
        Ok(logger)
    }
}

/// Alert requests carry no client timeout.
fn alert_client_config(env: &LoggerEnv) -> Option<TelegramClientConfig> {
    env.telegram_bot.clone().map(|bot_token| TelegramClientConfig {
        bot_token,
        base_url: env.telegram_api_url.clone(),
        timeout_ms: None,
    })
}

fn alert_client(env: &LoggerEnv) -> InfraResult<Option<Arc<dyn AlertDeliveryPort>>> {
    let Some(config) = alert_client_config(env) else {
        return Ok(None);
    };
    let client: Arc<dyn AlertDeliveryPort> = Arc::new(TelegramClient::new(&config)?);
    Ok(Some(client))
}

fn aggregator_client(env: &LoggerEnv) -> InfraResult<Option<Arc<dyn AggregatorDeliveryPort>>> {
    let Some(token) = env.betterstack_token.clone() else {
        return Ok(None);
    };
    let client: Arc<dyn AggregatorDeliveryPort> =
        Arc::new(BetterStackClient::new(&BetterStackClientConfig {
            token,
            ingest_url: env.betterstack_ingest_url.clone(),
            timeout_ms: env.http_timeout_ms,
        })?);
    Ok(Some(client))
}

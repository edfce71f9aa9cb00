//! Wraps one unit of request handling with start/finish logging and timing.

use crate::InfraResult;
use crate::factory::LoggerFactory;
use fanlog_adapters::{LogSink, StderrLogSink};
use fanlog_config::LoggerEnv;
use fanlog_domain::{
    ApiError, LogEntry, ServiceError, ServiceIdentity, SeverityLevel, TransportConfig,
};
use fanlog_ports::LoggerPort;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Status reported when an operation fails with an unrecognized error.
pub const UNRECOGNIZED_STATUS: u16 = 400;
/// Status reported on success.
pub const SUCCESS_STATUS: u16 = 200;

const STARTED_MESSAGE: &str = "Service has been started";
const COMPLETED_MESSAGE: &str = "Service completed successfully";

/// How an invoked operation ended.
#[derive(Debug, PartialEq)]
pub enum ServiceOutcome<T> {
    /// The operation returned a value.
    Data(T),
    /// The operation failed with an application error.
    Failed(ApiError),
    /// The operation failed with anything else; holds the raw message.
    Unrecognized(String),
}

/// Status code plus outcome of one invocation.
#[derive(Debug, PartialEq)]
pub struct ServiceResponse<T> {
    /// HTTP-like status.
    pub status: u16,
    /// Result of the operation.
    pub outcome: ServiceOutcome<T>,
}

/// Runs service operations with a fresh logger per call.
pub struct ServiceInvoker {
    factory: LoggerFactory,
    config: TransportConfig,
    fallback: Arc<dyn LogSink>,
}

impl fmt::Debug for ServiceInvoker {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ServiceInvoker")
            .field("factory", &self.factory)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ServiceInvoker {
    /// Invoker for `identity`, network clients taken from `env`.
    pub fn new(identity: ServiceIdentity, env: LoggerEnv) -> InfraResult<Self> {
        Ok(Self::from_factory(LoggerFactory::new(identity, env)?))
    }

    /// Invoker around an already configured factory.
    #[must_use]
    pub fn from_factory(factory: LoggerFactory) -> Self {
        Self {
            factory,
            config: TransportConfig::default(),
            fallback: Arc::new(StderrLogSink),
        }
    }

    /// Transport configuration used for every invocation; `fn` is overridden per call.
    #[must_use]
    pub fn with_transport_config(mut self, config: TransportConfig) -> Self {
        self.config = config;
        self
    }

    /// Where unrecognized failures are printed (stderr by default).
    #[must_use]
    pub fn with_fallback_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.fallback = sink;
        self
    }

    /// Factory the per-call loggers come from.
    #[must_use]
    pub const fn factory(&self) -> &LoggerFactory {
        &self.factory
    }

    /// Run `operation` under a logger named after `fn_name`.
    ///
    /// Only logger construction can fail; operation failures are folded into
    /// the returned [`ServiceResponse`].
    pub async fn invoke<T, F, Fut>(
        &self,
        fn_name: &str,
        operation: F,
    ) -> InfraResult<ServiceResponse<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        let config = TransportConfig {
            fn_name: Some(fn_name.into()),
            ..self.config.clone()
        };
        let logger = self.factory.create_instance(&config)?;

        logger.info(STARTED_MESSAGE, None);
        let profiler = logger.start_timer();

        let response = match operation().await {
            Ok(data) => {
                profiler.done(LogEntry::new(SeverityLevel::Done, COMPLETED_MESSAGE));
                ServiceResponse {
                    status: SUCCESS_STATUS,
                    outcome: ServiceOutcome::Data(data),
                }
            },
            Err(ServiceError::Application(api)) => {
                profiler.done(
                    LogEntry::new(
                        SeverityLevel::Error,
                        format!("Service completed with error: {}", api.message()),
                    )
                    .with_data(api.to_json()),
                );
                ServiceResponse {
                    status: api.status_code(),
                    outcome: ServiceOutcome::Failed(api),
                }
            },
            Err(ServiceError::Unrecognized(raw)) => {
                let message = raw.to_string();
                self.fallback.write_line(&format!("{message}\n"));
                ServiceResponse {
                    status: UNRECOGNIZED_STATUS,
                    outcome: ServiceOutcome::Unrecognized(message),
                }
            },
        };
        Ok(response)
    }
}

//! # fanlog-infra
//!
//! Runtime composition: the logger factory, the composite logger and the
//! service invoker. This crate depends on `adapters`, `config`, `domain`,
//! `ports` and `shared`.

/// Logger factory wiring sinks per instance.
pub mod factory;
/// Composite logger and profiler.
pub mod logger;
/// Start/finish logging around service operations.
pub mod service_invoker;

use fanlog_shared::ErrorEnvelope;

/// Infra-level error type (shared error envelope).
pub type InfraError = ErrorEnvelope;

/// Infra-level result type.
pub type InfraResult<T> = Result<T, InfraError>;

pub use factory::LoggerFactory;
pub use logger::{Logger, Profiler};
pub use service_invoker::{
    SUCCESS_STATUS, ServiceInvoker, ServiceOutcome, ServiceResponse, UNRECOGNIZED_STATUS,
};

pub use fanlog_config::LoggerEnv;
pub use fanlog_domain::{
    ApiError, LogEntry, ServiceError, ServiceIdentity, ServiceName, SeverityLevel,
    TransportConfig,
};
pub use fanlog_ports::LoggerPort;

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

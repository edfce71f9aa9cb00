//! # fanlog-ports
//!
//! Seams between a logger and its sinks: the leveled [`LoggerPort`] callers
//! hold, the [`TransportPort`] every sink implements, and the async delivery
//! ports behind the alert and aggregator transports.

use std::future::Future;
use std::pin::Pin;

pub mod delivery;
pub mod logger;
pub mod transport;

pub use delivery::*;
pub use logger::*;
pub use transport::*;

pub use fanlog_domain::{LogEntry, LogRecord, SeverityLevel};

/// Future returned by the delivery ports. Deliveries are the only async
/// boundary; logging calls stay synchronous.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

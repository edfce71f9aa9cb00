//! Sink contract shared by console, file, aggregator and alert transports.

use fanlog_domain::{LogRecord, SeverityLevel};

/// One output sink of the composite logger.
pub trait TransportPort: Send + Sync {
    /// Stable sink name (`console`, `file`, ...).
    fn name(&self) -> &'static str;

    /// Threshold gate; `None` hands every record to [`TransportPort::log`].
    fn level(&self) -> Option<SeverityLevel>;

    /// Consume one record. Must not panic or block on the network.
    fn log(&self, record: &LogRecord);

    /// Whether a record at `level` passes the threshold gate.
    fn admits(&self, level: SeverityLevel) -> bool {
        self.level().is_none_or(|threshold| level.admitted_by(threshold))
    }
}

//! Caller-facing logging contract.

use fanlog_domain::{LogEntry, SeverityLevel};
use serde_json::Value;

/// Boundary contract for the leveled logger.
///
/// Implementations never fail and never block on network I/O; every sink
/// swallows its own errors.
pub trait LoggerPort: Send + Sync {
    /// Emit one entry to every sink that admits its level.
    fn log_entry(&self, entry: LogEntry);

    /// Emit a message at `level` with an optional payload.
    fn log(&self, level: SeverityLevel, message: &str, data: Option<Value>) {
        self.log_entry(LogEntry::new(level, message).with_optional_data(data));
    }

    /// Convenience: error entry.
    fn error(&self, message: &str, data: Option<Value>) {
        self.log(SeverityLevel::Error, message, data);
    }

    /// Convenience: warn entry.
    fn warn(&self, message: &str, data: Option<Value>) {
        self.log(SeverityLevel::Warn, message, data);
    }

    /// Convenience: done entry.
    fn done(&self, message: &str, data: Option<Value>) {
        self.log(SeverityLevel::Done, message, data);
    }

    /// Convenience: info entry.
    fn info(&self, message: &str, data: Option<Value>) {
        self.log(SeverityLevel::Info, message, data);
    }

    /// Convenience: debug entry.
    fn debug(&self, message: &str, data: Option<Value>) {
        self.log(SeverityLevel::Debug, message, data);
    }

    /// Convenience: custom entry.
    fn custom(&self, message: &str, data: Option<Value>) {
        self.log(SeverityLevel::Custom, message, data);
    }
}

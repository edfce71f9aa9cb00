//! Console transport: one colorized line per admitted record.

use crate::format::{ConsoleFormatOptions, format_console_line};
use crate::log_sink::LogSink;
use fanlog_ports::{LogRecord, SeverityLevel, TransportPort};
use std::sync::Arc;

/// Writes formatted lines to a sink (stdout in production).
pub struct ConsoleTransport {
    sink: Arc<dyn LogSink>,
    level: SeverityLevel,
    options: ConsoleFormatOptions,
}

impl ConsoleTransport {
    /// Create a console transport gated at `level`.
    #[must_use]
    pub fn new(
        sink: Arc<dyn LogSink>,
        level: SeverityLevel,
        options: ConsoleFormatOptions,
    ) -> Self {
        Self {
            sink,
            level,
            options,
        }
    }
}

impl TransportPort for ConsoleTransport {
    fn name(&self) -> &'static str {
        "console"
    }

    fn level(&self) -> Option<SeverityLevel> {
        Some(self.level)
    }

    fn log(&self, record: &LogRecord) {
        match format_console_line(record, self.options) {
            Ok(mut line) => {
                line.push('\n');
                self.sink.write_line(&line);
            },
            Err(error) => tracing::debug!(%error, "console line formatting failed"),
        }
    }
}

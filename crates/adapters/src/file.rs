//! File transport: one redacted JSON record per line.

use crate::log_sink::LogSink;
use fanlog_ports::{LogRecord, SeverityLevel, TransportPort};
use fanlog_shared::redact_json;
use std::sync::Arc;

/// Appends JSON lines to a sink (an [`crate::log_sink::AppendFileSink`] in production).
pub struct FileTransport {
    sink: Arc<dyn LogSink>,
    level: SeverityLevel,
}

impl FileTransport {
    /// Create a file transport gated at `level`.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>, level: SeverityLevel) -> Self {
        Self { sink, level }
    }
}

impl TransportPort for FileTransport {
    fn name(&self) -> &'static str {
        "file"
    }

    fn level(&self) -> Option<SeverityLevel> {
        Some(self.level)
    }

    fn log(&self, record: &LogRecord) {
        let mut value = record.to_json();
        redact_json(&mut value);
        match serde_json::to_string(&value) {
            Ok(mut line) => {
                line.push('\n');
                self.sink.write_line(&line);
            },
            Err(error) => tracing::debug!(%error, "file record serialization failed"),
        }
    }
}

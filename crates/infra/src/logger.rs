//! Composite logger fanning one call out to every enabled transport.

use chrono::Local;
use fanlog_adapters::FireAndForget;
use fanlog_domain::{LogEntry, LogRecord, RecordContext};
use fanlog_ports::{LoggerPort, TransportPort};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

/// Logger instance bound to one service identity and calling context.
///
/// Cloning is cheap; clones share their transports.
#[derive(Clone)]
pub struct Logger {
    context: Arc<RecordContext>,
    transports: Arc<[Box<dyn TransportPort>]>,
    dispatcher: FireAndForget,
}

impl fmt::Debug for Logger {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Logger")
            .field("context", &self.context)
            .field("transports", &self.transport_names())
            .finish_non_exhaustive()
    }
}

impl Logger {
    pub(crate) fn new(
        context: RecordContext,
        transports: Vec<Box<dyn TransportPort>>,
        dispatcher: FireAndForget,
    ) -> Self {
        Self {
            context: Arc::new(context),
            transports: transports.into(),
            dispatcher,
        }
    }

    /// Fields stamped on every record.
    #[must_use]
    pub fn context(&self) -> &RecordContext {
        &self.context
    }

    /// Names of the active transports, in dispatch order.
    #[must_use]
    pub fn transport_names(&self) -> Vec<&'static str> {
        self.transports
            .iter()
            .map(|transport| transport.name())
            .collect()
    }

    /// Start measuring an operation.
    #[must_use]
    pub fn start_timer(&self) -> Profiler {
        Profiler {
            logger: self.clone(),
            started: Instant::now(),
        }
    }

    /// Wait for in-flight network deliveries (alerts, aggregator).
    pub async fn drain(&self) {
        self.dispatcher.drain().await;
    }
}

impl LoggerPort for Logger {
    fn log_entry(&self, entry: LogEntry) {
        let record = LogRecord::stamp(&self.context, entry, Local::now().naive_local());
        for transport in self.transports.iter() {
            if transport.admits(record.level) {
                transport.log(&record);
            }
        }
    }
}

/// Handle returned by [`Logger::start_timer`].
#[derive(Debug)]
pub struct Profiler {
    logger: Logger,
    started: Instant,
}

impl Profiler {
    /// Milliseconds since the timer started.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// Emit `entry` once, with the elapsed time attached.
    pub fn done(self, entry: LogEntry) {
        let elapsed = self.elapsed_ms();
        self.logger.log_entry(entry.with_duration_ms(elapsed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanlog_adapters::{ConsoleFormatOptions, ConsoleTransport, FileTransport, MemoryLogSink};
    use fanlog_domain::SeverityLevel;
    use serde_json::{Value, json};

    fn context() -> RecordContext {
        RecordContext {
            tag: "idat".into(),
            service: "Innerdata".into(),
            fn_name: Some("load".into()),
            env: "development".into(),
            topic_id: 38,
        }
    }

    fn logger(console: &Arc<MemoryLogSink>, file: &Arc<MemoryLogSink>) -> Logger {
        Logger::new(
            context(),
            vec![
                Box::new(ConsoleTransport::new(
                    console.clone(),
                    SeverityLevel::Warn,
                    ConsoleFormatOptions::default(),
                )),
                Box::new(FileTransport::new(
                    file.clone(),
                    SeverityLevel::Custom,
                )),
            ],
            FireAndForget::new(),
        )
    }

    #[test]
    fn each_transport_gates_independently() {
        let console = Arc::new(MemoryLogSink::default());
        let file = Arc::new(MemoryLogSink::default());
        let logger = logger(&console, &file);

        logger.error("broken", None);
        logger.info("fine", None);
        logger.custom("verbose", Some(json!({"n": 1})));

        assert_eq!(console.take().len(), 1);
        assert_eq!(file.take().len(), 3);
        assert_eq!(logger.transport_names(), vec!["console", "file"]);
    }

    #[test]
    fn profiler_attaches_duration() -> Result<(), serde_json::Error> {
        let console = Arc::new(MemoryLogSink::default());
        let file = Arc::new(MemoryLogSink::default());
        let logger = logger(&console, &file);

        let profiler = logger.start_timer();
        profiler.done(LogEntry::new(SeverityLevel::Done, "finished"));

        let lines = file.take();
        assert_eq!(lines.len(), 1);
        let record: Value = serde_json::from_str(lines[0].trim_end())?;
        assert_eq!(record["level"], json!("done"));
        assert!(record["durationMs"].is_u64());
        assert_eq!(record["fn"], json!("load"));
        Ok(())
    }
}

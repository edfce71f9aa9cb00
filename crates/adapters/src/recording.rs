//! In-memory delivery ports that record instead of sending.

use fanlog_ports::{AggregatorDeliveryPort, AlertDeliveryPort, AlertMessage, BoxFuture, LogRecord};
use fanlog_shared::Result;
use std::sync::Mutex;

/// Alert port that keeps every delivered message.
#[derive(Debug, Default)]
pub struct RecordingAlerts {
    messages: Mutex<Vec<AlertMessage>>,
}

impl RecordingAlerts {
    /// Messages delivered so far.
    #[must_use]
    pub fn messages(&self) -> Vec<AlertMessage> {
        self.messages
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl AlertDeliveryPort for RecordingAlerts {
    fn deliver(&self, message: AlertMessage) -> BoxFuture<'_, Result<()>> {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(message);
        }
        Box::pin(async { Ok(()) })
    }
}

/// Aggregator port that keeps every delivered record.
#[derive(Debug, Default)]
pub struct RecordingAggregator {
    records: Mutex<Vec<LogRecord>>,
}

impl RecordingAggregator {
    /// Records delivered so far.
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl AggregatorDeliveryPort for RecordingAggregator {
    fn deliver(&self, record: LogRecord) -> BoxFuture<'_, Result<()>> {
        if let Ok(mut guard) = self.records.lock() {
            guard.push(record);
        }
        Box::pin(async { Ok(()) })
    }
}

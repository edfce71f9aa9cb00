//! Log records and the caller-provided entries they are stamped from.

use crate::{ServiceIdentity, SeverityLevel};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Timestamp layout used in serialized records.
pub const RECORD_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What a caller hands to a logger: level, message and optional extras.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Severity.
    pub level: SeverityLevel,
    /// Message body (may be empty).
    pub message: Box<str>,
    /// Arbitrary structured payload.
    pub data: Option<Value>,
    /// Stack or error chain text.
    pub stack: Option<Box<str>>,
    /// Forward to the alert channel regardless of its level.
    pub force_alert: bool,
    /// Elapsed time attached by a profiler.
    pub duration_ms: Option<u64>,
}

impl LogEntry {
    /// Start an entry with a level and message.
    pub fn new(level: SeverityLevel, message: impl Into<Box<str>>) -> Self {
        Self {
            level,
            message: message.into(),
            data: None,
            stack: None,
            force_alert: false,
            duration_ms: None,
        }
    }

    /// Attach a structured payload.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach an optional structured payload.
    #[must_use]
    pub fn with_optional_data(mut self, data: Option<Value>) -> Self {
        self.data = data;
        self
    }

    /// Attach stack text.
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<Box<str>>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Attach an error, rendering its `source()` chain as the stack.
    #[must_use]
    pub fn with_error(self, error: &(dyn std::error::Error + 'static)) -> Self {
        self.with_stack(error_chain(error))
    }

    /// Send this entry to the alert channel even if its level does not match.
    #[must_use]
    pub const fn force_alert(mut self) -> Self {
        self.force_alert = true;
        self
    }

    /// Attach an elapsed duration in milliseconds.
    #[must_use]
    pub const fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }
}

/// Per-logger fields stamped onto every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordContext {
    /// Short service code.
    pub tag: Box<str>,
    /// Full service name.
    pub service: Box<str>,
    /// Calling-context name.
    pub fn_name: Option<Box<str>>,
    /// Deployment environment name.
    pub env: Box<str>,
    /// Alert topic id.
    pub topic_id: u64,
}

impl RecordContext {
    /// Build the context for one logger instance.
    pub fn new(
        identity: &ServiceIdentity,
        fn_name: Option<&str>,
        env: impl Into<Box<str>>,
    ) -> Self {
        Self {
            tag: identity.tag().into(),
            service: identity.service().into(),
            fn_name: fn_name.map(Into::into),
            env: env.into(),
            topic_id: identity.topic_id(),
        }
    }
}

/// A single emitted event, consumed by each transport and then discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    /// Severity.
    pub level: SeverityLevel,
    /// Message body.
    pub message: Box<str>,
    /// Full service name.
    pub service: Box<str>,
    /// Short service code.
    pub tag: Box<str>,
    /// Calling-context name.
    #[serde(rename = "fn", skip_serializing_if = "Option::is_none")]
    pub fn_name: Option<Box<str>>,
    /// Deployment environment name.
    pub env: Box<str>,
    /// Alert topic id of the owning service.
    pub topic_id: u64,
    /// Local wall-clock time of the call.
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    /// Stack or error chain text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<Box<str>>,
    /// Structured payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Elapsed time attached by a profiler.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Alert override flag.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_alert: bool,
}

impl LogRecord {
    /// Stamp an entry with the logger context and a timestamp.
    pub fn stamp(context: &RecordContext, entry: LogEntry, timestamp: NaiveDateTime) -> Self {
        Self {
            level: entry.level,
            message: entry.message,
            service: context.service.clone(),
            tag: context.tag.clone(),
            fn_name: context.fn_name.clone(),
            env: context.env.clone(),
            topic_id: context.topic_id,
            timestamp,
            stack: entry.stack,
            data: entry.data,
            duration_ms: entry.duration_ms,
            force_alert: entry.force_alert,
        }
    }

    /// Serialize to a JSON value; records only hold JSON-safe fields.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Two-space indented JSON of the whole record.
    #[must_use]
    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Render an error and its `source()` chain, one cause per line.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str("\n    caused by: ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

fn serialize_timestamp<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&timestamp.format(RECORD_TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::fmt;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|date| date.and_hms_opt(14, 5, 7))
            .unwrap_or_default()
    }

    fn context() -> RecordContext {
        RecordContext {
            tag: "wber".into(),
            service: "WberReport".into(),
            fn_name: Some("runJob".into()),
            env: "development".into(),
            topic_id: 4,
        }
    }

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("report upload failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("connection reset")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    impl std::error::Error for Inner {}

    #[test]
    fn record_serializes_with_identity_metadata() {
        let entry =
            LogEntry::new(SeverityLevel::Error, "Job failed").with_data(json!({"code": 42}));
        let record = LogRecord::stamp(&context(), entry, timestamp());

        assert_eq!(
            record.to_json(),
            json!({
                "level": "error",
                "message": "Job failed",
                "service": "WberReport",
                "tag": "wber",
                "fn": "runJob",
                "env": "development",
                "topicId": 4,
                "timestamp": "2024-03-09 14:05:07",
                "data": { "code": 42 }
            })
        );
    }

    #[test]
    fn force_alert_and_duration_are_serialized_when_set() {
        let entry = LogEntry::new(SeverityLevel::Done, "finished")
            .force_alert()
            .with_duration_ms(12);
        let value = LogRecord::stamp(&context(), entry, timestamp()).to_json();
        assert_eq!(value["forceAlert"], json!(true));
        assert_eq!(value["durationMs"], json!(12));
    }

    #[test]
    fn error_chain_renders_sources() {
        let entry = LogEntry::new(SeverityLevel::Error, "upload").with_error(&Outer(Inner));
        assert_eq!(
            entry.stack.as_deref(),
            Some("report upload failed\n    caused by: connection reset")
        );
    }
}

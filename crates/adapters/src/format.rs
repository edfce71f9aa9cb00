//! Console line formatting.

use fanlog_domain::{ColorName, ConfigError, LogRecord, SeverityLevel, paint};

/// Layout of the time prefix on console lines.
pub const CONSOLE_TIME_FORMAT: &str = "%H:%M:%S";

/// Which optional parts a console line includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleFormatOptions {
    /// Append the grey stack when the record carries one.
    pub show_stack: bool,
    /// Append the pretty-printed record for debug entries.
    pub show_data: bool,
}

impl Default for ConsoleFormatOptions {
    fn default() -> Self {
        Self {
            show_stack: true,
            show_data: true,
        }
    }
}

/// Render one record as a human-readable console line.
///
/// The prefix `"{time} [{service}] {level}:"` is painted in the level color;
/// the calling context follows in grey. An absent context still leaves the
/// separating space.
pub fn format_console_line(
    record: &LogRecord,
    options: ConsoleFormatOptions,
) -> Result<String, ConfigError> {
    let prefix = format!(
        "{} [{}] {}:",
        record.timestamp.format(CONSOLE_TIME_FORMAT),
        record.service,
        record.level
    );
    let context = match record.fn_name.as_deref() {
        Some(name) if !name.is_empty() => paint(ColorName::Grey, name)?,
        _ => String::new(),
    };

    let mut line = format!("{} {context}", paint(record.level.color(), &prefix)?);
    if !record.message.is_empty() {
        line.push(' ');
        line.push_str(&record.message);
    }
    if record.level == SeverityLevel::Debug && options.show_data {
        line.push('\n');
        line.push_str(&record.to_pretty_json());
    }
    if let Some(stack) = record.stack.as_deref()
        && options.show_stack
        && !stack.is_empty()
    {
        line.push('\n');
        line.push_str(&paint(ColorName::Grey, stack)?);
    }

    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fanlog_domain::{LogEntry, RecordContext};
    use serde_json::json;

    fn record(entry: LogEntry, fn_name: Option<&str>) -> LogRecord {
        let context = RecordContext {
            tag: "wber".into(),
            service: "WberReport".into(),
            fn_name: fn_name.map(Into::into),
            env: "development".into(),
            topic_id: 4,
        };
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|date| date.and_hms_opt(14, 5, 7))
            .unwrap_or_default();
        LogRecord::stamp(&context, entry, timestamp)
    }

    #[test]
    fn info_line_has_colored_prefix_grey_context_and_message() -> Result<(), ConfigError> {
        let line = format_console_line(
            &record(LogEntry::new(SeverityLevel::Info, "Job started"), Some("runJob")),
            ConsoleFormatOptions::default(),
        )?;
        assert_eq!(
            line,
            "\x1b[34m14:05:07 [WberReport] info:\x1b[0m \x1b[90mrunJob\x1b[0m Job started"
        );
        Ok(())
    }

    #[test]
    fn missing_context_keeps_separator_and_empty_message_is_skipped() -> Result<(), ConfigError> {
        let line = format_console_line(
            &record(LogEntry::new(SeverityLevel::Warn, ""), None),
            ConsoleFormatOptions::default(),
        )?;
        assert_eq!(line, "\x1b[33m14:05:07 [WberReport] warn:\x1b[0m ");
        Ok(())
    }

    #[test]
    fn debug_lines_include_the_record_unless_disabled() -> Result<(), ConfigError> {
        let entry = LogEntry::new(SeverityLevel::Debug, "payload").with_data(json!({"rows": 3}));
        let with_data =
            format_console_line(&record(entry.clone(), None), ConsoleFormatOptions::default())?;
        assert!(with_data.contains("\n{\n  \"level\": \"debug\""));
        assert!(with_data.contains("\"rows\": 3"));

        let without = format_console_line(
            &record(entry, None),
            ConsoleFormatOptions {
                show_data: false,
                ..ConsoleFormatOptions::default()
            },
        )?;
        assert!(!without.contains('\n'));
        Ok(())
    }

    #[test]
    fn stack_is_appended_in_grey_unless_disabled() -> Result<(), ConfigError> {
        let entry = LogEntry::new(SeverityLevel::Error, "boom").with_stack("at runJob");
        let line =
            format_console_line(&record(entry.clone(), None), ConsoleFormatOptions::default())?;
        assert!(line.ends_with("boom\n\x1b[90mat runJob\x1b[0m"));

        let hidden = format_console_line(
            &record(entry, None),
            ConsoleFormatOptions {
                show_stack: false,
                ..ConsoleFormatOptions::default()
            },
        )?;
        assert!(hidden.ends_with("boom"));
        Ok(())
    }
}

//! # fanlog-adapters
//!
//! Adapter implementations for ports: line sinks, console and file
//! transports, the chat alert transport and the log aggregator transport.
//! This crate depends on `ports`, `config`, `domain` and `shared`.

pub mod betterstack;
pub mod console;
pub mod dispatch;
pub mod file;
pub mod format;
mod http;
pub mod log_sink;
/// Recording delivery ports for tests and dry runs.
pub mod recording;
pub mod telegram;

pub use betterstack::{
    AggregatorTransport, BetterStackClient, BetterStackClientConfig, ingestion_payload,
};
pub use console::ConsoleTransport;
pub use dispatch::FireAndForget;
pub use file::FileTransport;
pub use format::{ConsoleFormatOptions, format_console_line};
pub use log_sink::{AppendFileSink, LogSink, MemoryLogSink, StderrLogSink, StdoutLogSink};
pub use recording::{RecordingAggregator, RecordingAlerts};
pub use telegram::{
    ALERT_CHAT_ID, AlertSettings, AlertTransport, TelegramClient, TelegramClientConfig,
    render_alert,
};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

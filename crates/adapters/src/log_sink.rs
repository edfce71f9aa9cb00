//! Line sinks used by the console and file transports.

use fanlog_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A sink that receives pre-formatted log lines.
pub trait LogSink: Send + Sync {
    /// Write a line to the sink.
    fn write_line(&self, line: &str);
}

/// Log sink that writes to stdout.
#[derive(Debug, Default)]
pub struct StdoutLogSink;

impl LogSink for StdoutLogSink {
    fn write_line(&self, line: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(error) = stdout.write_all(line.as_bytes()) {
            eprintln!("log sink write failed: {error}");
        }
    }
}

/// Log sink that writes to stderr.
#[derive(Debug, Default)]
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn write_line(&self, line: &str) {
        let mut stderr = std::io::stderr();
        if let Err(error) = stderr.write_all(line.as_bytes()) {
            eprintln!("log sink write failed: {error}");
        }
    }
}

/// Log sink appending to a file, created together with its directory.
#[derive(Debug)]
pub struct AppendFileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl AppendFileSink {
    /// Open `path` for appending, creating missing parent directories.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|error| open_error(parent, &error))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|error| open_error(&path, &error))?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for AppendFileSink {
    fn write_line(&self, line: &str) {
        let Ok(mut file) = self.file.lock() else {
            tracing::debug!(path = %self.path.display(), "file sink lock poisoned");
            return;
        };
        if let Err(error) = file.write_all(line.as_bytes()) {
            tracing::debug!(path = %self.path.display(), %error, "file sink write failed");
        }
    }
}

fn open_error(path: &Path, error: &std::io::Error) -> ErrorEnvelope {
    ErrorEnvelope::unexpected(
        ErrorCode::io(),
        format!("failed to open log file: {error}"),
        ErrorClass::NonRetriable,
    )
    .with_metadata("path", path.display().to_string())
}

/// Log sink that keeps lines in memory.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogSink {
    /// Snapshot of the captured lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Drain the captured lines.
    pub fn take(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|mut guard| std::mem::take(&mut *guard))
            .unwrap_or_default()
    }
}

impl LogSink for MemoryLogSink {
    fn write_line(&self, line: &str) {
        if let Ok(mut guard) = self.lines.lock() {
            guard.push(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_nanos())
            .unwrap_or_default();
        std::env::temp_dir().join(format!("{prefix}-{nanos}"))
    }

    #[test]
    fn memory_sink_captures_lines() {
        let sink = MemoryLogSink::default();
        sink.write_line("hello\n");
        sink.write_line("world\n");

        let lines = sink.take();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "hello\n");
        assert_eq!(lines[1], "world\n");
        assert!(sink.lines().is_empty());
    }

    #[test]
    fn file_sink_creates_directory_and_appends() -> Result<()> {
        let dir = temp_dir("fanlog-sink");
        let path = dir.join("nested").join("Service.log");

        let sink = AppendFileSink::open(&path)?;
        sink.write_line("first\n");
        drop(sink);
        let sink = AppendFileSink::open(&path)?;
        sink.write_line("second\n");
        assert_eq!(sink.path(), path.as_path());

        let contents = fs::read_to_string(&path)?;
        assert_eq!(contents, "first\nsecond\n");
        let _ = fs::remove_dir_all(dir);
        Ok(())
    }

    #[test]
    fn file_sink_open_failure_is_an_io_error() {
        let dir = temp_dir("fanlog-sink-blocked");
        let blocker = dir.join("blocker");
        let _ = fs::create_dir_all(&dir);
        let _ = fs::write(&blocker, "not a directory");

        let error = AppendFileSink::open(blocker.join("Service.log")).err();
        assert_eq!(error.map(|error| error.code), Some(ErrorCode::io()));
        let _ = fs::remove_dir_all(dir);
    }
}

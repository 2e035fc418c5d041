//! Logging sink contract used by decorators

use std::fmt::Debug;
use std::time::Duration;

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// A single structured log entry
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Qualified `<Interface>.<method>` name the entry refers to
    pub method: Option<String>,
    pub elapsed: Option<Duration>,
    pub error: Option<String>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            method: None,
            elapsed: None,
            error: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = Some(elapsed);
        self
    }

    pub fn with_error(mut self, error: impl std::fmt::Display) -> Self {
        self.error = Some(error.to_string());
        self
    }
}

/// Leveled log output injected into decorators
pub trait LogSink: Send + Sync + Debug {
    fn log(&self, entry: LogEntry);
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Sink keeping every entry in memory
    #[derive(Debug, Default)]
    pub struct RecordingLogSink {
        entries: Mutex<Vec<LogEntry>>,
    }

    impl RecordingLogSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn entries(&self) -> Vec<LogEntry> {
            self.entries.lock().unwrap().clone()
        }

        pub fn entries_at(&self, level: LogLevel) -> Vec<LogEntry> {
            self.entries()
                .into_iter()
                .filter(|entry| entry.level == level)
                .collect()
        }
    }

    impl LogSink for RecordingLogSink {
        fn log(&self, entry: LogEntry) {
            self.entries.lock().unwrap().push(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::RecordingLogSink;
    use super::*;

    #[test]
    fn test_entry_builder() {
        let entry = LogEntry::error("failed")
            .with_method("NumberService.n_prime")
            .with_elapsed(Duration::from_millis(3))
            .with_error("boom");

        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.method.as_deref(), Some("NumberService.n_prime"));
        assert_eq!(entry.elapsed, Some(Duration::from_millis(3)));
        assert_eq!(entry.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_recording_sink_filters_by_level() {
        let sink = RecordingLogSink::new();
        sink.log(LogEntry::info("one"));
        sink.log(LogEntry::error("two"));
        sink.log(LogEntry::info("three"));

        assert_eq!(sink.entries().len(), 3);
        assert_eq!(sink.entries_at(LogLevel::Info).len(), 2);
        assert_eq!(sink.entries_at(LogLevel::Error)[0].message, "two");
    }
}

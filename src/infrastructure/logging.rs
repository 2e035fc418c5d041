//! Logging setup and the tracing-backed log sink

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::{LogFormat, LoggingConfig};
use crate::domain::logging::{LogEntry, LogLevel, LogSink};
use crate::infrastructure::container::Implements;

/// Installs the global subscriber; later calls keep the first subscriber
pub fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init(),
    };

    if installed.is_ok() {
        info!("Logging initialized with level: {}", config.level);
    }
}

/// Forwards decorator log entries to `tracing` with structured fields
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn log(&self, entry: LogEntry) {
        let method = entry.method.as_deref().unwrap_or_default();
        let elapsed = entry.elapsed;

        match entry.level {
            LogLevel::Info => info!(method, ?elapsed, "{}", entry.message),
            LogLevel::Warn => warn!(method, ?elapsed, "{}", entry.message),
            LogLevel::Error => error!(
                method,
                ?elapsed,
                error = entry.error.as_deref().unwrap_or_default(),
                "{}",
                entry.message
            ),
        }
    }
}

impl<T: LogSink + 'static> Implements<dyn LogSink> for T {
    fn upcast(self: Arc<Self>) -> Arc<dyn LogSink> {
        self
    }
}

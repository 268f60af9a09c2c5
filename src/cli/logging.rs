//! Tracing subscriber setup: log file with stderr fallback

use std::fs::OpenOptions;
use std::path::Path;

use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Timestamp format of log lines
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a log level name. Accepts the tracing names plus `warning`
/// and `critical`.
pub fn parse_level(level: &str) -> Result<LevelFilter, String> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" | "critical" => Ok(LevelFilter::ERROR),
        "off" => Ok(LevelFilter::OFF),
        _ => Err(format!(
            "Invalid log level: \"{}\". Valid levels are: trace, debug, info, warning, error, critical",
            level
        )),
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. Log lines are appended to
/// `log_file`; if it cannot be opened they go to stderr. The returned guard
/// flushes the file writer when dropped and must live until exit.
pub fn init(level: LevelFilter, log_file: &Path) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    let (writer, guard, open_error) =
        match OpenOptions::new().create(true).append(true).open(log_file) {
            Ok(file) => {
                let (writer, guard) = tracing_appender::non_blocking(file);
                (BoxMakeWriter::new(writer), Some(guard), None)
            }
            Err(e) => (BoxMakeWriter::new(std::io::stderr), None, Some(e)),
        };

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
                .with_target(false)
                .with_ansi(guard.is_none())
                .with_writer(writer),
        )
        .with(filter)
        .try_init();

    if let Some(e) = open_error {
        warn!(path = %log_file.display(), error = %e, "cannot open log file, logging to stderr");
    }
    guard
}

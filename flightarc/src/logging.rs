//! Logging setup.
//!
//! Library code only emits `tracing` events; binaries call [`init_logging`]
//! once at startup. `RUST_LOG` overrides the configured level.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub use tracing_appender::non_blocking::WorkerGuard;

/// Errors from logging initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {reason}")]
    Filter { filter: String, reason: String },

    #[error("Cannot create log directory: {0}")]
    Io(#[from] io::Error),

    #[error("Log file path has no file name: {0}")]
    InvalidPath(String),

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Build the filter: `RUST_LOG` when set, otherwise `level`.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_from_default_env().or_else(|_| {
        EnvFilter::try_new(level).map_err(|e| LoggingError::Filter {
            filter: level.to_string(),
            reason: e.to_string(),
        })
    })
}

/// Install the global subscriber: stderr always, plus `file` when given.
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the lifetime of the program.
pub fn init_logging(level: &str, file: Option<&Path>) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = build_filter(level)?;

    let stderr_layer = fmt::layer().with_writer(io::stderr).with_target(false);

    let (file_layer, guard) = match file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| LoggingError::InvalidPath(path.display().to_string()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            fs::create_dir_all(dir)?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(guard)
}

//! CLI error type.

use flightarc::config::ConfigError;
use flightarc::logging::LoggingError;
use flightarc::playback::ClockError;
use flightarc::LoadError;
use thiserror::Error;

/// Everything a command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Config(String),

    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Playback clock error: {0}")]
    Clock(#[from] ClockError),

    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    #[error("Unknown airport '{0}' (not in the airport table)")]
    UnknownAirport(String),

    #[error("No usable flights in {0} (all records were dropped)")]
    NoFlights(String),

    #[error("Failed to set signal handler: {0}")]
    Signal(String),
}

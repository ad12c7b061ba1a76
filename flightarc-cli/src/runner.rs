//! Shared command setup: configuration and logging.

use std::path::{Path, PathBuf};

use flightarc::config::{config_file_path, ConfigFile};
use flightarc::logging::{init_logging, WorkerGuard};
use tracing::debug;

use crate::error::CliError;

/// Loaded configuration plus the logging guard, alive for the whole run.
pub struct CliRunner {
    config: ConfigFile,
    config_path: PathBuf,
    _log_guard: Option<WorkerGuard>,
}

impl CliRunner {
    /// Load the configuration and install the global subscriber.
    ///
    /// A missing configuration file yields defaults; a malformed one is an
    /// error. `log_level` overrides `logging.level`.
    pub fn new(config_path: Option<PathBuf>, log_level: Option<&str>) -> Result<Self, CliError> {
        let config_path = config_path.unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let level = log_level.unwrap_or(&config.logging.level);
        let guard = init_logging(level, config.logging.file.as_deref())?;

        Ok(Self {
            config,
            config_path,
            _log_guard: guard,
        })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn log_startup(&self) {
        debug!(
            version = env!("CARGO_PKG_VERSION"),
            config = %self.config_path.display(),
            waypoints = self.config.paths.waypoints,
            policy = %self.config.paths.arrival_policy,
            speed = self.config.playback.speed,
            "FlightArc starting"
        );
    }
}

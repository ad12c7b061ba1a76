//! Configuration file handling.
//!
//! Settings live in an INI file at `~/.flightarc/config.ini`. A missing file
//! means defaults; CLI arguments override file values when given.
//!
//! ```ini
//! [paths]
//! waypoints = 100
//! arrival_policy = visible
//!
//! [playback]
//! speed = 10000
//! lookback_hours = 24
//!
//! [logging]
//! level = info
//! file =
//! ```

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::flight::ArrivalPolicy;
use crate::playback::{DEFAULT_LOOKBACK_HOURS, DEFAULT_SPEED_MULTIPLIER};
use crate::waypoints::DEFAULT_WAYPOINT_COUNT;

/// Directory name under the home directory.
const CONFIG_DIR_NAME: &str = ".flightarc";

/// Configuration file name.
const CONFIG_FILE_NAME: &str = "config.ini";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Upper bound on route resolution; beyond this, per-frame cost dominates.
pub const MAX_WAYPOINT_COUNT: usize = 10_000;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Errors from reading, writing or editing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),
}

/// `[paths]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct PathsSettings {
    /// Route segments per flight (way-points = segments + 1).
    pub waypoints: usize,
    /// What happens to landed flights.
    pub arrival_policy: ArrivalPolicy,
}

impl Default for PathsSettings {
    fn default() -> Self {
        Self {
            waypoints: DEFAULT_WAYPOINT_COUNT,
            arrival_policy: ArrivalPolicy::default(),
        }
    }
}

/// `[playback]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSettings {
    /// Simulated seconds per real second.
    pub speed: f64,
    /// Look-back window used when not deriving bounds from flights.
    pub lookback_hours: u32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED_MULTIPLIER,
            lookback_hours: DEFAULT_LOOKBACK_HOURS,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Default filter level; `RUST_LOG` takes precedence.
    pub level: String,
    /// Optional log file; stderr only when unset.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub paths: PathsSettings,
    pub playback: PlaybackSettings,
    pub logging: LoggingSettings,
}

/// Path of the user configuration file.
pub fn config_file_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

impl ConfigFile {
    /// Load the user configuration, or defaults when the file is absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Load from `path`, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_ini_str(&contents)
    }

    /// Parse INI text. Unknown sections and keys are ignored.
    pub fn from_ini_str(contents: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = Self::default();

        for key in ConfigKey::all() {
            if let Some(value) = ini.get_from(Some(key.section()), key.key_name()) {
                key.set(&mut config, value)?;
            }
        }

        Ok(config)
    }

    /// Render as INI text.
    pub fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            ini.with_section(Some(key.section()))
                .set(key.key_name(), key.get(self));
        }
        ini
    }

    /// Save to the user configuration path.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&config_file_path())
    }

    /// Save to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        self.to_ini().write_to_file(path)?;
        debug!(path = %path.display(), "Saved config file");
        Ok(())
    }
}

/// A settable configuration key, addressed as `section.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    PathsWaypoints,
    PathsArrivalPolicy,
    PlaybackSpeed,
    PlaybackLookbackHours,
    LoggingLevel,
    LoggingFile,
}

impl ConfigKey {
    /// Every key, in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::PathsWaypoints,
            ConfigKey::PathsArrivalPolicy,
            ConfigKey::PlaybackSpeed,
            ConfigKey::PlaybackLookbackHours,
            ConfigKey::LoggingLevel,
            ConfigKey::LoggingFile,
        ]
    }

    /// INI section name.
    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::PathsWaypoints | ConfigKey::PathsArrivalPolicy => "paths",
            ConfigKey::PlaybackSpeed | ConfigKey::PlaybackLookbackHours => "playback",
            ConfigKey::LoggingLevel | ConfigKey::LoggingFile => "logging",
        }
    }

    /// Key name within the section.
    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::PathsWaypoints => "waypoints",
            ConfigKey::PathsArrivalPolicy => "arrival_policy",
            ConfigKey::PlaybackSpeed => "speed",
            ConfigKey::PlaybackLookbackHours => "lookback_hours",
            ConfigKey::LoggingLevel => "level",
            ConfigKey::LoggingFile => "file",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as a string (empty when unset).
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::PathsWaypoints => config.paths.waypoints.to_string(),
            ConfigKey::PathsArrivalPolicy => config.paths.arrival_policy.to_string(),
            ConfigKey::PlaybackSpeed => config.playback.speed.to_string(),
            ConfigKey::PlaybackLookbackHours => config.playback.lookback_hours.to_string(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
            ConfigKey::LoggingFile => config
                .logging
                .file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }

    /// Validate and apply a value.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        let invalid = |reason: &str| ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match self {
            ConfigKey::PathsWaypoints => {
                let count: usize = value
                    .parse()
                    .map_err(|_| invalid("expected a positive integer"))?;
                if count == 0 || count > MAX_WAYPOINT_COUNT {
                    return Err(invalid(&format!(
                        "must be between 1 and {}",
                        MAX_WAYPOINT_COUNT
                    )));
                }
                config.paths.waypoints = count;
            }
            ConfigKey::PathsArrivalPolicy => {
                config.paths.arrival_policy =
                    value.parse().map_err(|e: String| invalid(&e))?;
            }
            ConfigKey::PlaybackSpeed => {
                let speed: f64 = value.parse().map_err(|_| invalid("expected a number"))?;
                if !speed.is_finite() || speed < 0.0 {
                    return Err(invalid("must be a finite, non-negative number"));
                }
                config.playback.speed = speed;
            }
            ConfigKey::PlaybackLookbackHours => {
                let hours: u32 = value
                    .parse()
                    .map_err(|_| invalid("expected a whole number of hours"))?;
                if hours == 0 {
                    return Err(invalid("must be at least 1"));
                }
                config.playback.lookback_hours = hours;
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_ascii_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(invalid("expected one of trace, debug, info, warn, error"));
                }
                config.logging.level = level;
            }
            ConfigKey::LoggingFile => {
                config.logging.file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
        }
        Ok(())
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section(), self.key_name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

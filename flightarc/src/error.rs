//! Error types for loading reference data and flight feeds from disk.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::geo::CoordError;

/// Errors that can occur while loading airport tables or flight feeds.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid JSON for the expected shape.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An airport entry has out-of-range coordinates.
    #[error("Airport {icao} has invalid coordinates: {source}")]
    InvalidAirport {
        icao: String,
        #[source]
        source: CoordError,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        LoadError::Parse {
            path: path.into(),
            source,
        }
    }
}

//! Airport reference table.
//!
//! Maps ICAO codes to airport coordinates. The table is built once by the
//! application and passed explicitly to ingestion; it is never mutated while
//! flights are being normalized.
//!
//! The on-disk format is a JSON object keyed by ICAO code:
//!
//! ```json
//! {
//!   "KJFK": { "latitude": 40.6413, "longitude": -73.7781 },
//!   "KLAX": { "latitude": 33.9416, "longitude": -118.4085 }
//! }
//! ```
//!
//! Additional per-airport fields are ignored.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::LoadError;
use crate::geo::GeoPoint;

/// An airport known to the reference table.
#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    /// Four-letter ICAO identifier.
    pub icao: String,
    /// Airport reference point.
    pub coordinates: GeoPoint,
}

/// Read-only lookup from ICAO code to coordinates.
///
/// Codes are stored upper-cased and lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    airports: HashMap<String, GeoPoint>,
}

#[derive(Deserialize)]
struct RawAirport {
    latitude: f64,
    longitude: f64,
}

impl AirportTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an airport.
    pub fn insert(&mut self, icao: impl AsRef<str>, coordinates: GeoPoint) {
        self.airports
            .insert(icao.as_ref().trim().to_ascii_uppercase(), coordinates);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_airport(mut self, icao: impl AsRef<str>, coordinates: GeoPoint) -> Self {
        self.insert(icao, coordinates);
        self
    }

    /// Look up the coordinates of an airport.
    pub fn get(&self, icao: &str) -> Option<GeoPoint> {
        let key = icao.trim();
        self.airports
            .get(key)
            .or_else(|| self.airports.get(&key.to_ascii_uppercase()))
            .copied()
    }

    /// Look up a full [`Airport`] entry.
    pub fn airport(&self, icao: &str) -> Option<Airport> {
        self.get(icao).map(|coordinates| Airport {
            icao: icao.trim().to_ascii_uppercase(),
            coordinates,
        })
    }

    /// Whether the table knows this code.
    pub fn contains(&self, icao: &str) -> bool {
        self.get(icao).is_some()
    }

    /// Number of airports.
    pub fn len(&self) -> usize {
        self.airports.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }

    /// Parse a table from its JSON representation.
    ///
    /// `origin` names the source in error messages.
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self, LoadError> {
        let raw: HashMap<String, RawAirport> =
            serde_json::from_str(json).map_err(|e| LoadError::parse(origin, e))?;

        let mut table = AirportTable::new();
        for (icao, entry) in raw {
            let coordinates = GeoPoint::new(entry.longitude, entry.latitude)
                .map_err(|source| LoadError::InvalidAirport {
                    icao: icao.clone(),
                    source,
                })?;
            table.insert(&icao, coordinates);
        }
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let json = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let table = Self::from_json_str(&json, path)?;
        info!(
            path = %path.display(),
            airports = table.len(),
            "Loaded airport reference table"
        );
        Ok(table)
    }
}

impl FromIterator<(String, GeoPoint)> for AirportTable {
    fn from_iter<I: IntoIterator<Item = (String, GeoPoint)>>(iter: I) -> Self {
        let mut table = AirportTable::new();
        for (icao, coordinates) in iter {
            table.insert(icao, coordinates);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"{
        "KJFK": { "latitude": 40.6413, "longitude": -73.7781, "name": "John F. Kennedy" },
        "KLAX": { "latitude": 33.9416, "longitude": -118.4085 }
    }"#;

    #[test]
    fn test_parse_sample() {
        let table = AirportTable::from_json_str(SAMPLE, Path::new("sample.json")).unwrap();
        assert_eq!(table.len(), 2);

        let jfk = table.get("KJFK").unwrap();
        assert_eq!(jfk.longitude(), -73.7781);
        assert_eq!(jfk.latitude(), 40.6413);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = AirportTable::from_json_str(SAMPLE, Path::new("sample.json")).unwrap();
        assert!(table.contains("klax"));
        assert_eq!(table.airport(" klax ").unwrap().icao, "KLAX");
        assert!(!table.contains("EGLL"));
    }

    #[test]
    fn test_invalid_coordinates_are_rejected() {
        let json = r#"{ "BAD1": { "latitude": 95.0, "longitude": 0.0 } }"#;
        let err = AirportTable::from_json_str(json, Path::new("bad.json")).unwrap_err();
        assert!(matches!(err, LoadError::InvalidAirport { ref icao, .. } if icao == "BAD1"));
    }

    #[test]
    fn test_malformed_json() {
        let err = AirportTable::from_json_str("[1, 2", Path::new("broken.json")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = AirportTable::load(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AirportTable::load(Path::new("/nonexistent/airports.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_builder_and_from_iter() {
        let point = GeoPoint::new(-0.4543, 51.47).unwrap();
        let table = AirportTable::new().with_airport("egll", point);
        assert_eq!(table.get("EGLL"), Some(point));

        let collected: AirportTable = vec![("EGLL".to_string(), point)].into_iter().collect();
        assert_eq!(collected.len(), 1);
    }
}

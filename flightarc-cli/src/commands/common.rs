//! Common types and utilities shared across CLI commands.

use std::path::Path;

use chrono::DateTime;
use clap::ValueEnum;
use flightarc::config::MAX_WAYPOINT_COUNT;
use flightarc::flight::ArrivalPolicy;
use flightarc::AirportTable;
use flightarc::GeoPoint;

use crate::error::CliError;

/// Arrival policy selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PolicyArg {
    /// Landed flights stay on screen at their destination
    Visible,
    /// Landed flights disappear
    Vanish,
}

impl From<PolicyArg> for ArrivalPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Visible => ArrivalPolicy::Visible,
            PolicyArg::Vanish => ArrivalPolicy::Vanish,
        }
    }
}

/// Way-point count from the CLI, falling back to the configured value.
pub fn resolve_waypoints(cli_value: Option<usize>, configured: usize) -> Result<usize, CliError> {
    let count = cli_value.unwrap_or(configured);
    if count == 0 || count > MAX_WAYPOINT_COUNT {
        return Err(CliError::Config(format!(
            "Way-point count must be between 1 and {}, got {}",
            MAX_WAYPOINT_COUNT, count
        )));
    }
    Ok(count)
}

/// Look up an airport, reporting the code the user typed when it is missing.
pub fn lookup_airport(airports: &AirportTable, icao: &str) -> Result<GeoPoint, CliError> {
    airports
        .get(icao)
        .ok_or_else(|| CliError::UnknownAirport(icao.to_string()))
}

/// Load the airport table named on the command line.
pub fn load_airports(path: &Path) -> Result<AirportTable, CliError> {
    Ok(AirportTable::load(path)?)
}

/// Render unix seconds as `YYYY-MM-DD HH:MM:SSZ`.
pub fn format_unix(time: i64) -> String {
    DateTime::from_timestamp(time, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%SZ").to_string())
        .unwrap_or_else(|| format!("@{}", time))
}

/// Render a heading as degrees plus compass point.
pub fn format_heading(bearing: f64) -> String {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let index = ((bearing / 45.0).round() as usize) % POINTS.len();
    format!("{:5.1}° {}", bearing, POINTS[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_conversion() {
        assert_eq!(ArrivalPolicy::from(PolicyArg::Visible), ArrivalPolicy::Visible);
        assert_eq!(ArrivalPolicy::from(PolicyArg::Vanish), ArrivalPolicy::Vanish);
    }

    #[test]
    fn test_resolve_waypoints() {
        assert_eq!(resolve_waypoints(None, 100).unwrap(), 100);
        assert_eq!(resolve_waypoints(Some(20), 100).unwrap(), 20);
        assert!(resolve_waypoints(Some(0), 100).is_err());
        assert!(resolve_waypoints(Some(MAX_WAYPOINT_COUNT + 1), 100).is_err());
    }

    #[test]
    fn test_format_unix() {
        assert_eq!(format_unix(1_731_893_400), "2024-11-18 01:30:00Z");
    }

    #[test]
    fn test_format_heading() {
        assert_eq!(format_heading(0.0), "  0.0° N");
        assert_eq!(format_heading(273.84), "273.8° W");
        assert_eq!(format_heading(359.0), "359.0° N");
    }

    #[test]
    fn test_lookup_airport_reports_code() {
        let table = AirportTable::new();
        let err = lookup_airport(&table, "ZZZZ").unwrap_err();
        assert!(matches!(err, CliError::UnknownAirport(code) if code == "ZZZZ"));
    }
}

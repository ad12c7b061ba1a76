//! Flights prepared for playback.

use crate::geo::GeoPoint;
use crate::waypoints::generate_waypoints;

use super::record::FlightRecord;

/// A flight with resolved coordinates, precomputed way-points and unix times.
///
/// Built once per ingestion pass and immutable afterwards. Construction
/// guarantees `arrival_time > departure_time`, so [`duration`](Self::duration)
/// is always positive.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFlight {
    record: FlightRecord,
    departure_coord: GeoPoint,
    arrival_coord: GeoPoint,
    waypoints: Vec<GeoPoint>,
    departure_time: i64,
    arrival_time: i64,
}

impl NormalizedFlight {
    /// Build a normalized flight, sampling `waypoint_count + 1` way-points.
    ///
    /// Returns `None` when `arrival_time <= departure_time`.
    pub fn new(
        record: FlightRecord,
        departure_coord: GeoPoint,
        arrival_coord: GeoPoint,
        departure_time: i64,
        arrival_time: i64,
        waypoint_count: usize,
    ) -> Option<Self> {
        if arrival_time <= departure_time {
            return None;
        }

        Some(Self {
            record,
            departure_coord,
            arrival_coord,
            waypoints: generate_waypoints(departure_coord, arrival_coord, waypoint_count),
            departure_time,
            arrival_time,
        })
    }

    /// The raw record this flight was built from.
    pub fn record(&self) -> &FlightRecord {
        &self.record
    }

    pub fn departure_coord(&self) -> GeoPoint {
        self.departure_coord
    }

    pub fn arrival_coord(&self) -> GeoPoint {
        self.arrival_coord
    }

    /// Way-points from departure to arrival inclusive.
    pub fn waypoints(&self) -> &[GeoPoint] {
        &self.waypoints
    }

    /// Number of path segments `N` (way-point count minus one).
    pub fn segment_count(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// Estimated departure, unix seconds.
    pub fn departure_time(&self) -> i64 {
        self.departure_time
    }

    /// Estimated arrival, unix seconds.
    pub fn arrival_time(&self) -> i64 {
        self.arrival_time
    }

    /// Flight duration in seconds, always positive.
    pub fn duration(&self) -> i64 {
        self.arrival_time - self.departure_time
    }

    /// Unclamped elapsed-time ratio at `query_time`.
    pub fn raw_fraction(&self, query_time: i64) -> f64 {
        (query_time as f64 - self.departure_time as f64) / self.duration() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lon: f64, lat: f64) -> GeoPoint {
        GeoPoint::new(lon, lat).unwrap()
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let a = point(0.0, 0.0);
        let b = point(10.0, 0.0);
        assert!(NormalizedFlight::new(FlightRecord::default(), a, b, 100, 100, 10).is_none());
        assert!(NormalizedFlight::new(FlightRecord::default(), a, b, 100, 50, 10).is_none());
    }

    #[test]
    fn test_derived_fields() {
        let a = point(0.0, 0.0);
        let b = point(10.0, 0.0);
        let flight = NormalizedFlight::new(FlightRecord::default(), a, b, 1_000, 1_100, 10).unwrap();

        assert_eq!(flight.duration(), 100);
        assert_eq!(flight.waypoints().len(), 11);
        assert_eq!(flight.segment_count(), 10);
        assert_eq!(flight.waypoints()[0], a);
        assert_eq!(flight.waypoints()[10], b);
        assert_eq!(flight.raw_fraction(1_050), 0.5);
        assert_eq!(flight.raw_fraction(900), -1.0);
    }
}

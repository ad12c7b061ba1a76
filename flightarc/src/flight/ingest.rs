//! Ingestion: raw flight records to playable flights.
//!
//! Upstream data is known to contain defects (unknown airports, arrival
//! before departure). Such records are dropped and counted, never surfaced
//! as errors. Output order follows input order.

use tracing::{debug, info};

use crate::airport::AirportTable;
use crate::waypoints::DEFAULT_WAYPOINT_COUNT;

use super::normalized::NormalizedFlight;
use super::record::FlightRecord;

/// Why records were dropped during an ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Records turned into playable flights.
    pub accepted: usize,
    /// Departure or arrival ICAO code missing or not in the airport table.
    pub missing_airport: usize,
    /// Estimated departure or arrival time missing or unparsable.
    pub bad_timestamp: usize,
    /// Arrival at or before departure.
    pub non_positive_duration: usize,
}

impl NormalizeStats {
    /// Total records dropped.
    pub fn dropped(&self) -> usize {
        self.missing_airport + self.bad_timestamp + self.non_positive_duration
    }

    /// Total records seen.
    pub fn total(&self) -> usize {
        self.accepted + self.dropped()
    }
}

/// Normalize raw records with the default way-point resolution.
pub fn normalize<'a, I>(raw_flights: I, airports: &AirportTable) -> Vec<NormalizedFlight>
where
    I: IntoIterator<Item = &'a FlightRecord>,
{
    normalize_with_resolution(raw_flights, airports, DEFAULT_WAYPOINT_COUNT).0
}

/// Normalize raw records, also returning drop statistics.
pub fn normalize_with_stats<'a, I>(
    raw_flights: I,
    airports: &AirportTable,
) -> (Vec<NormalizedFlight>, NormalizeStats)
where
    I: IntoIterator<Item = &'a FlightRecord>,
{
    normalize_with_resolution(raw_flights, airports, DEFAULT_WAYPOINT_COUNT)
}

/// Normalize raw records, sampling `waypoint_count + 1` way-points per route.
pub fn normalize_with_resolution<'a, I>(
    raw_flights: I,
    airports: &AirportTable,
    waypoint_count: usize,
) -> (Vec<NormalizedFlight>, NormalizeStats)
where
    I: IntoIterator<Item = &'a FlightRecord>,
{
    let mut stats = NormalizeStats::default();
    let mut flights = Vec::new();

    for record in raw_flights {
        match normalize_one(record, airports, waypoint_count) {
            Ok(flight) => {
                stats.accepted += 1;
                flights.push(flight);
            }
            Err(reason) => {
                debug!(
                    flight = record.designator().unwrap_or("unknown"),
                    route = %record.route_label(),
                    reason = reason.as_str(),
                    "Dropping flight record"
                );
                match reason {
                    DropReason::MissingAirport => stats.missing_airport += 1,
                    DropReason::BadTimestamp => stats.bad_timestamp += 1,
                    DropReason::NonPositiveDuration => stats.non_positive_duration += 1,
                }
            }
        }
    }

    info!(
        accepted = stats.accepted,
        missing_airport = stats.missing_airport,
        bad_timestamp = stats.bad_timestamp,
        non_positive_duration = stats.non_positive_duration,
        "Normalized flight records"
    );

    (flights, stats)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropReason {
    MissingAirport,
    BadTimestamp,
    NonPositiveDuration,
}

impl DropReason {
    fn as_str(&self) -> &'static str {
        match self {
            DropReason::MissingAirport => "airport not in reference table",
            DropReason::BadTimestamp => "missing or unparsable estimated time",
            DropReason::NonPositiveDuration => "arrival not after departure",
        }
    }
}

fn normalize_one(
    record: &FlightRecord,
    airports: &AirportTable,
    waypoint_count: usize,
) -> Result<NormalizedFlight, DropReason> {
    let lookup = |icao: Option<&str>| icao.and_then(|code| airports.get(code));

    let departure_coord =
        lookup(record.departure.icao.as_deref()).ok_or(DropReason::MissingAirport)?;
    let arrival_coord = lookup(record.arrival.icao.as_deref()).ok_or(DropReason::MissingAirport)?;

    let departure_time = record
        .departure
        .estimated_unix()
        .ok_or(DropReason::BadTimestamp)?;
    let arrival_time = record
        .arrival
        .estimated_unix()
        .ok_or(DropReason::BadTimestamp)?;

    NormalizedFlight::new(
        record.clone(),
        departure_coord,
        arrival_coord,
        departure_time,
        arrival_time,
        waypoint_count,
    )
    .ok_or(DropReason::NonPositiveDuration)
}

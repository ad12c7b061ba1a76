//! Raw flight records as delivered by flight data sources.
//!
//! The shape follows the AviationStack `flights` endpoint. Only the fields the
//! engine reads are typed; everything else is kept verbatim in `extra` maps so
//! records round-trip through ingestion untouched.

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One end of a flight (departure or arrival).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightEndpoint {
    /// Airport display name.
    #[serde(default)]
    pub airport: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub iata: Option<String>,
    /// ICAO airport code, the join key into the airport table.
    #[serde(default)]
    pub icao: Option<String>,
    #[serde(default)]
    pub terminal: Option<String>,
    #[serde(default)]
    pub gate: Option<String>,
    /// Delay in minutes.
    #[serde(default)]
    pub delay: Option<i64>,
    /// Scheduled time (RFC 3339).
    #[serde(default)]
    pub scheduled: Option<String>,
    /// Estimated time (RFC 3339). Drives the animation.
    #[serde(default)]
    pub estimated: Option<String>,
    /// Actual time (RFC 3339).
    #[serde(default)]
    pub actual: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlightEndpoint {
    /// The estimated time as unix seconds, if present and parsable.
    pub fn estimated_unix(&self) -> Option<i64> {
        self.estimated.as_deref().and_then(parse_timestamp)
    }
}

/// Airline identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Airline {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub icao: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Flight identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightIdent {
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub iata: Option<String>,
    #[serde(default)]
    pub icao: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A raw flight record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    #[serde(default)]
    pub flight_date: Option<String>,
    #[serde(default)]
    pub flight_status: Option<String>,
    #[serde(default)]
    pub departure: FlightEndpoint,
    #[serde(default)]
    pub arrival: FlightEndpoint,
    #[serde(default)]
    pub airline: Option<Airline>,
    #[serde(default)]
    pub flight: Option<FlightIdent>,
    /// Aircraft details are passed through without interpretation.
    #[serde(default)]
    pub aircraft: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlightRecord {
    /// Best available flight designator (IATA, then ICAO, then number).
    pub fn designator(&self) -> Option<&str> {
        let flight = self.flight.as_ref()?;
        flight
            .iata
            .as_deref()
            .or(flight.icao.as_deref())
            .or(flight.number.as_deref())
    }

    /// Human-readable route, e.g. `"John F. Kennedy International Airport → Los Angeles International Airport"`.
    ///
    /// Falls back to ICAO codes when airport names are missing.
    pub fn route_label(&self) -> String {
        let name = |endpoint: &FlightEndpoint| {
            endpoint
                .airport
                .clone()
                .or_else(|| endpoint.icao.clone())
                .unwrap_or_else(|| "?".to_string())
        };
        format!("{} → {}", name(&self.departure), name(&self.arrival))
    }
}

/// Parse an RFC 3339 timestamp into unix seconds.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "flight_date": "2024-11-18",
        "flight_status": "active",
        "departure": {
            "airport": "John F. Kennedy International Airport",
            "timezone": "America/New_York",
            "iata": "JFK",
            "icao": "KJFK",
            "terminal": "4",
            "gate": "B22",
            "delay": null,
            "scheduled": "2024-11-18T01:30:00+00:00",
            "estimated": "2024-11-18T01:30:00+00:00",
            "actual": "2024-11-18T01:35:00+00:00",
            "estimated_runway": null,
            "actual_runway": null
        },
        "arrival": {
            "airport": "Los Angeles International Airport",
            "icao": "KLAX",
            "baggage": "3",
            "estimated": "2024-11-18T05:30:00+00:00"
        },
        "airline": { "name": "Delta Air Lines", "iata": "DL", "icao": "DAL" },
        "flight": { "number": "423", "iata": "DL423", "icao": "DAL423", "codeshared": null },
        "aircraft": null,
        "live": null
    }"#;

    #[test]
    fn test_deserialize_aviationstack_record() {
        let record: FlightRecord = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(record.departure.icao.as_deref(), Some("KJFK"));
        assert_eq!(record.arrival.icao.as_deref(), Some("KLAX"));
        assert_eq!(record.designator(), Some("DL423"));
        assert_eq!(record.departure.estimated_unix(), Some(1_731_893_400));
        assert_eq!(record.arrival.estimated_unix(), Some(1_731_907_800));
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let record: FlightRecord = serde_json::from_str(SAMPLE).unwrap();
        assert!(record.extra.contains_key("live"));
        assert_eq!(
            record.arrival.extra.get("baggage"),
            Some(&Value::String("3".to_string()))
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["arrival"]["baggage"], "3");
        assert_eq!(json["departure"]["estimated_runway"], Value::Null);
        assert_eq!(json["flight"]["codeshared"], Value::Null);
    }

    #[test]
    fn test_route_label() {
        let record: FlightRecord = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(
            record.route_label(),
            "John F. Kennedy International Airport → Los Angeles International Airport"
        );

        let bare = FlightRecord::default();
        assert_eq!(bare.route_label(), "? → ?");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert_eq!(parse_timestamp("2024-11-18T04:00:00Z"), Some(1_731_902_400));
        assert_eq!(parse_timestamp("2024-11-18T05:00:00+01:00"), Some(1_731_902_400));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_missing_sections_default() {
        let record: FlightRecord = serde_json::from_str("{}").unwrap();
        assert!(record.departure.icao.is_none());
        assert!(record.designator().is_none());
    }
}

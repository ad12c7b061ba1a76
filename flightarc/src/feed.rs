//! Flight feed documents.
//!
//! Flight data sources (a REST endpoint or a persisted daily snapshot) deliver
//! records wrapped in a `{ "data": [ ... ] }` envelope. Fetching is the
//! caller's business; this module only decodes a document that has already
//! been retrieved.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::LoadError;
use crate::flight::FlightRecord;
use crate::playback::TimeWindow;

/// A batch of raw flight records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightFeed {
    /// Paging metadata, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Value>,
    /// The flight records.
    #[serde(default)]
    pub data: Vec<FlightRecord>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeedDocument {
    Envelope(FlightFeed),
    Bare(Vec<FlightRecord>),
}

impl FlightFeed {
    /// Wrap records in a feed.
    pub fn new(data: Vec<FlightRecord>) -> Self {
        Self {
            data,
            ..Default::default()
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the feed has no records.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Span of the estimated departure and arrival times in the feed.
    ///
    /// Records without both timestamps, or with arrival not after
    /// departure, are skipped the same way normalization skips them.
    pub fn estimated_window(&self) -> Option<TimeWindow> {
        self.data
            .iter()
            .filter_map(|record| {
                let dep = record.departure.estimated_unix()?;
                let arr = record.arrival.estimated_unix()?;
                TimeWindow::new(dep, arr).ok().filter(|w| w.duration() > 0)
            })
            .reduce(|acc, w| acc.union(&w))
    }

    /// Decode a feed document. A bare JSON array of records is also accepted.
    ///
    /// `origin` names the source in error messages.
    pub fn from_json_str(json: &str, origin: &Path) -> Result<Self, LoadError> {
        let document: FeedDocument =
            serde_json::from_str(json).map_err(|e| LoadError::parse(origin, e))?;
        Ok(match document {
            FeedDocument::Envelope(feed) => feed,
            FeedDocument::Bare(data) => FlightFeed::new(data),
        })
    }

    /// Load a feed document from disk.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let json = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        let feed = Self::from_json_str(&json, path)?;
        info!(
            path = %path.display(),
            records = feed.len(),
            "Loaded flight feed"
        );
        Ok(feed)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const ENVELOPE: &str = r#"{
        "pagination": { "limit": 100, "offset": 0, "count": 1, "total": 1 },
        "data": [
            {
                "flight_date": "2024-11-18",
                "departure": { "icao": "KJFK", "estimated": "2024-11-18T01:30:00+00:00" },
                "arrival": { "icao": "KLAX", "estimated": "2024-11-18T05:30:00+00:00" }
            }
        ]
    }"#;

    #[test]
    fn test_parse_envelope() {
        let feed = FlightFeed::from_json_str(ENVELOPE, Path::new("feed.json")).unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.data[0].departure.icao.as_deref(), Some("KJFK"));
        assert_eq!(feed.pagination.as_ref().unwrap()["limit"], 100);
    }

    #[test]
    fn test_parse_bare_array() {
        let json = r#"[ { "departure": { "icao": "KJFK" }, "arrival": { "icao": "KLAX" } } ]"#;
        let feed = FlightFeed::from_json_str(json, Path::new("feed.json")).unwrap();
        assert_eq!(feed.len(), 1);
        assert!(feed.pagination.is_none());
    }

    #[test]
    fn test_empty_envelope() {
        let feed = FlightFeed::from_json_str(r#"{ "data": [] }"#, Path::new("feed.json")).unwrap();
        assert!(feed.is_empty());
    }

    #[test]
    fn test_rejects_non_feed_json() {
        let err = FlightFeed::from_json_str("42", Path::new("feed.json")).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_estimated_window() {
        let json = r#"[
            { "departure": { "estimated": "2024-11-18T02:00:00Z" },
              "arrival": { "estimated": "2024-11-18T10:00:00Z" } },
            { "departure": { "estimated": "2024-11-18T01:30:00Z" },
              "arrival": { "estimated": "2024-11-18T05:30:00Z" } },
            { "departure": { "estimated": "2024-11-18T04:00:00Z" },
              "arrival": { "estimated": "2024-11-18T03:00:00Z" } },
            { "departure": { "estimated": "not a time" },
              "arrival": { "estimated": "2024-11-19T23:00:00Z" } }
        ]"#;
        let feed = FlightFeed::from_json_str(json, Path::new("feed.json")).unwrap();
        let window = feed.estimated_window().unwrap();
        assert_eq!(window.start(), 1_731_893_400);
        assert_eq!(window.end(), 1_731_924_000);

        assert!(FlightFeed::default().estimated_window().is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ENVELOPE.as_bytes()).unwrap();
        let feed = FlightFeed::load(file.path()).unwrap();
        assert_eq!(feed.len(), 1);
    }
}

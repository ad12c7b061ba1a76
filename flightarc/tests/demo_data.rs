//! The sample data shipped in `demos/` stays loadable.

use std::path::PathBuf;

use flightarc::flight::normalize_with_stats;
use flightarc::{render_frame, AirportTable, ArrivalPolicy, FlightFeed, PlaybackClock};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("demos")
        .join(name)
}

#[test]
fn test_demo_feed_normalizes() {
    let airports = AirportTable::load(&demo("airports.json")).unwrap();
    let feed = FlightFeed::load(&demo("flights.json")).unwrap();
    assert_eq!(feed.len(), 6);

    let (flights, stats) = normalize_with_stats(&feed.data, &airports);
    assert_eq!(stats.accepted, 4);
    assert_eq!(stats.missing_airport, 1, "YSSY is not in the demo table");
    assert_eq!(stats.non_positive_duration, 1);

    // LFPG 01:00Z .. RJTT 14:25Z
    let clock = PlaybackClock::for_flights(&flights).unwrap();
    assert_eq!(clock.start(), 1_731_891_600);
    assert_eq!(clock.end(), 1_731_939_900);
    assert_eq!(feed.estimated_window().map(|w| w.start()), Some(clock.start()));

    let frame = render_frame(&flights, clock.end(), ArrivalPolicy::Vanish);
    assert!(frame.is_empty());
}

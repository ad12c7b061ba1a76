//! Flight records, ingestion and the progress model.
//!
//! # Data Flow
//!
//! ```text
//! FlightRecord ──► normalize() ──► NormalizedFlight ──► compute_progress(t) ──► ProgressSample
//!  (raw feed)      (filter +        (way-points,          (per frame)
//!                   precompute)      unix times)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use flightarc::flight::{normalize, ArrivalPolicy};
//!
//! let flights = normalize(&feed.data, &airports);
//! for flight in &flights {
//!     if let Some(sample) = flight.progress_at(clock.current(), ArrivalPolicy::Visible) {
//!         println!("{} at {}", flight.record().route_label(), sample.position);
//!     }
//! }
//! ```

mod ingest;
mod normalized;
mod progress;
mod record;

pub use ingest::{normalize, normalize_with_resolution, normalize_with_stats, NormalizeStats};
pub use normalized::NormalizedFlight;
pub use progress::{compute_progress, ArrivalPolicy, ProgressSample};
pub use record::{parse_timestamp, Airline, FlightEndpoint, FlightIdent, FlightRecord};

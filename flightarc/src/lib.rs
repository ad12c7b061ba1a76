//! FlightArc - great-circle flight path playback
//!
//! This library turns scheduled flights into animated great-circle tracks:
//! it samples way-points between airport pairs, maps a simulated clock onto
//! each flight's progress, and answers the per-frame question "where is
//! every active flight, which way is it heading, and how much of its route
//! has been flown".
//!
//! # Architecture
//!
//! ```text
//! FlightFeed ──► flight::normalize ──► [NormalizedFlight] ──┐
//!                  (AirportTable)                           ├──► frame::render_frame ──► renderer
//!                         PlaybackClock::tick(now) ─────────┘
//! ```
//!
//! Everything here is synchronous and free of I/O apart from the explicit
//! file loaders. Fetching flight data and drawing are left to the caller.

pub mod airport;
pub mod config;
pub mod error;
pub mod feed;
pub mod flight;
pub mod frame;
pub mod geo;
pub mod logging;
pub mod playback;
pub mod waypoints;

pub use airport::{Airport, AirportTable};
pub use error::LoadError;
pub use feed::FlightFeed;
pub use flight::{ArrivalPolicy, FlightRecord, NormalizedFlight, ProgressSample};
pub use frame::{render_frame, FlightFrame};
pub use geo::GeoPoint;
pub use playback::{PlaybackClock, PlaybackState, TimeWindow};

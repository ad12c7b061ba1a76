//! Per-frame query answered for the rendering layer.
//!
//! For one simulated time, reports every active flight's position, heading
//! and the prefix of its route that should be drawn.

use crate::flight::{compute_progress, ArrivalPolicy, NormalizedFlight, ProgressSample};
use crate::geo::GeoPoint;

/// What a renderer needs to draw one flight in one frame.
#[derive(Debug, Clone, Copy)]
pub struct FlightFrame<'a> {
    /// The flight being drawn.
    pub flight: &'a NormalizedFlight,
    /// Progress, position and heading at the frame time.
    pub sample: ProgressSample,
}

impl<'a> FlightFrame<'a> {
    /// Way-points flown so far (the trail to draw).
    pub fn trail(&self) -> &'a [GeoPoint] {
        &self.flight.waypoints()[..self.sample.visible_waypoint_count]
    }

    /// Between departure and arrival.
    pub fn is_airborne(&self) -> bool {
        self.sample.progress > 0.0 && self.sample.progress < 1.0
    }

    /// At or past arrival.
    pub fn has_landed(&self) -> bool {
        self.sample.progress >= 1.0
    }
}

/// Evaluate every flight at `time`, preserving input order.
///
/// Under [`ArrivalPolicy::Vanish`], landed flights are left out.
pub fn render_frame(
    flights: &[NormalizedFlight],
    time: i64,
    policy: ArrivalPolicy,
) -> Vec<FlightFrame<'_>> {
    flights
        .iter()
        .filter_map(|flight| {
            compute_progress(flight, time, policy).map(|sample| FlightFrame { flight, sample })
        })
        .collect()
}

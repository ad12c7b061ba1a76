//! Flight progress at a point in simulated time.
//!
//! Maps a query time onto a clamped progress fraction, the prefix of the
//! route that has been flown, the aircraft position and its heading.

use std::fmt;
use std::str::FromStr;

use crate::geo::{calculate_bearing, GeoPoint};

use super::normalized::NormalizedFlight;

/// What happens to a flight once it has landed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ArrivalPolicy {
    /// Progress saturates at 1 and the flight stays drawn after landing.
    #[default]
    Visible,
    /// The flight leaves the active set once its raw progress reaches 1.
    Vanish,
}

impl ArrivalPolicy {
    /// Configuration string for this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrivalPolicy::Visible => "visible",
            ArrivalPolicy::Vanish => "vanish",
        }
    }
}

impl fmt::Display for ArrivalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrivalPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visible" => Ok(ArrivalPolicy::Visible),
            "vanish" => Ok(ArrivalPolicy::Vanish),
            other => Err(format!(
                "unknown arrival policy '{}' (expected 'visible' or 'vanish')",
                other
            )),
        }
    }
}

/// Per-flight state at one query time. Recomputed on every query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSample {
    /// Clamped elapsed-time ratio in `[0, 1]`.
    pub progress: f64,
    /// Number of way-points drawn, `floor(progress * N)`, in `[0, N]`.
    pub visible_waypoint_count: usize,
    /// Current aircraft position.
    pub position: GeoPoint,
    /// Heading in degrees `[0, 360)`; `None` with fewer than two visible
    /// way-points, in which case the renderer picks a default facing.
    pub orientation: Option<f64>,
}

/// Compute the progress of `flight` at `query_time` (unix seconds).
///
/// Returns `None` only under [`ArrivalPolicy::Vanish`] once the flight has
/// reached its arrival time.
pub fn compute_progress(
    flight: &NormalizedFlight,
    query_time: i64,
    policy: ArrivalPolicy,
) -> Option<ProgressSample> {
    // NormalizedFlight guarantees this; a zero duration would poison every
    // downstream value with NaN.
    assert!(flight.duration() > 0, "flight duration must be positive");

    let raw = flight.raw_fraction(query_time);
    if policy == ArrivalPolicy::Vanish && raw >= 1.0 {
        return None;
    }

    let progress = raw.clamp(0.0, 1.0);
    let segments = flight.segment_count();
    let visible = ((progress * segments as f64).floor() as usize).min(segments);
    let waypoints = flight.waypoints();

    let position = if visible >= 1 {
        waypoints[visible - 1]
    } else {
        flight.departure_coord()
    };

    let orientation = if visible >= 2 {
        Some(calculate_bearing(
            waypoints[visible - 2],
            waypoints[visible - 1],
        ))
    } else {
        None
    };

    Some(ProgressSample {
        progress,
        visible_waypoint_count: visible,
        position,
        orientation,
    })
}

impl NormalizedFlight {
    /// Shorthand for [`compute_progress`].
    pub fn progress_at(&self, query_time: i64, policy: ArrivalPolicy) -> Option<ProgressSample> {
        compute_progress(self, query_time, policy)
    }
}

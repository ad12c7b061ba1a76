//! Way-point generation along great-circle routes.
//!
//! A route is sampled at evenly spaced fractions of its central angle, from
//! the departure point to the arrival point inclusive. The resolution is a
//! trade-off between path smoothness and per-frame rendering cost.

use crate::geo::{interpolate_great_circle, GeoPoint};

/// Default number of segments per route (yields 101 way-points).
pub const DEFAULT_WAYPOINT_COUNT: usize = 100;

/// Generate `count + 1` way-points along the great circle from `from` to `to`.
///
/// The first way-point is exactly `from`, the last exactly `to`. The output is
/// a pure function of its inputs. A `count` of zero yields the single point
/// `from`.
pub fn generate_waypoints(from: GeoPoint, to: GeoPoint, count: usize) -> Vec<GeoPoint> {
    if count == 0 {
        return vec![from];
    }

    (0..=count)
        .map(|i| {
            let fraction = i as f64 / count as f64;
            interpolate_great_circle(from, to, fraction)
        })
        .collect()
}

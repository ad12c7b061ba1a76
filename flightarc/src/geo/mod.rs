//! Geodesic math on a spherical Earth.
//!
//! Provides great-circle interpolation between two positions, the initial
//! bearing (forward azimuth) between them, and a few supporting helpers.
//! Inputs and outputs are in degrees; all trigonometry happens in radians.

mod types;

pub use types::{CoordError, GeoPoint, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

use std::f64::consts::PI;

/// Mean Earth radius in kilometres (IUGG).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Central angles closer than this to π are treated as antipodal.
///
/// The slerp weights divide by `sin(Δσ)`, which vanishes there.
const ANTIPODAL_EPSILON: f64 = 1e-9;

/// Central angle between two points in radians (haversine formula).
pub fn central_angle(from: GeoPoint, to: GeoPoint) -> f64 {
    let (lat1, lat2) = (from.lat_rad(), to.lat_rad());
    let delta_lat = lat2 - lat1;
    let delta_lon = to.lon_rad() - from.lon_rad();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let a = a.clamp(0.0, 1.0);

    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance between two points in kilometres.
pub fn haversine_distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    EARTH_RADIUS_KM * central_angle(from, to)
}

/// Interpolate a position along the great circle from `from` to `to`.
///
/// `fraction` is the share of the central angle covered, in `[0, 1]`; the
/// traversal has constant angular velocity. The endpoints are returned
/// exactly for `fraction <= 0` and `fraction >= 1`.
///
/// Identical endpoints (zero central angle) return `from` for every
/// fraction. Antipodal endpoints have no unique great circle; the path then
/// follows the meridian through `from`, heading north.
pub fn interpolate_great_circle(from: GeoPoint, to: GeoPoint, fraction: f64) -> GeoPoint {
    debug_assert!(!fraction.is_nan(), "interpolation fraction is NaN");

    if fraction <= 0.0 {
        return from;
    }
    if fraction >= 1.0 {
        return to;
    }
    let delta_sigma = central_angle(from, to);
    if delta_sigma == 0.0 {
        return from;
    }
    if PI - delta_sigma < ANTIPODAL_EPSILON {
        return destination_point(from, 0.0, fraction * delta_sigma);
    }

    let (lon1, lat1) = (from.lon_rad(), from.lat_rad());
    let (lon2, lat2) = (to.lon_rad(), to.lat_rad());

    let sin_sigma = delta_sigma.sin();
    let a = ((1.0 - fraction) * delta_sigma).sin() / sin_sigma;
    let b = (fraction * delta_sigma).sin() / sin_sigma;

    let x = a * lat1.cos() * lon1.cos() + b * lat2.cos() * lon2.cos();
    let y = a * lat1.cos() * lon1.sin() + b * lat2.cos() * lon2.sin();
    let z = a * lat1.sin() + b * lat2.sin();

    let lat = z.atan2((x * x + y * y).sqrt());
    let lon = y.atan2(x);

    GeoPoint::from_radians(lon, lat)
}

/// Initial bearing from `from` toward `to` in degrees, within `[0, 360)`.
///
/// 0° is north, 90° east. Identical points yield 0°.
pub fn calculate_bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    let (lat1, lat2) = (from.lat_rad(), to.lat_rad());
    let delta_lon = to.lon_rad() - from.lon_rad();

    let x = delta_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();

    let bearing = x.atan2(y).to_degrees();
    let normalized = (bearing + 360.0) % 360.0;

    // (-tiny + 360.0) can round up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Point reached by travelling `angular_distance` radians from `from` along
/// the great circle with initial bearing `bearing_deg`.
pub fn destination_point(from: GeoPoint, bearing_deg: f64, angular_distance: f64) -> GeoPoint {
    let (lon1, lat1) = (from.lon_rad(), from.lat_rad());
    let theta = bearing_deg.to_radians();
    let delta = angular_distance;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let lon2 = lon1
        + (theta.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    // Wrap into [-π, π)
    let lon2 = (lon2 + PI).rem_euclid(2.0 * PI) - PI;

    GeoPoint::from_radians(lon2, lat2)
}

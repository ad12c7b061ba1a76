//! Geographic value types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;

/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;

/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;

/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors produced when constructing geographic values.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordError {
    #[error("Invalid latitude: {0} (must be within -90..=90)")]
    InvalidLatitude(f64),

    #[error("Invalid longitude: {0} (must be within -180..=180)")]
    InvalidLongitude(f64),

    #[error("Coordinate is not a finite number")]
    NonFinite,
}

/// A position on the Earth's surface in degrees.
///
/// Immutable once built. [`GeoPoint::new`] enforces the longitude range
/// `[-180, 180]` and latitude range `[-90, 90]`, so every value handed out by
/// this crate is inside those bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint", into = "RawGeoPoint")]
pub struct GeoPoint {
    longitude: f64,
    latitude: f64,
}

impl GeoPoint {
    /// Create a validated point from longitude and latitude in degrees.
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, CoordError> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return Err(CoordError::NonFinite);
        }
        if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(CoordError::InvalidLatitude(latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(CoordError::InvalidLongitude(longitude));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Build a point from radians produced by spherical math.
    ///
    /// `atan2`/`asin` outputs are already in range; the clamp only absorbs
    /// floating point overshoot at the poles and the antimeridian.
    pub(crate) fn from_radians(lon_rad: f64, lat_rad: f64) -> Self {
        Self {
            longitude: lon_rad.to_degrees().clamp(MIN_LON, MAX_LON),
            latitude: lat_rad.to_degrees().clamp(MIN_LAT, MAX_LAT),
        }
    }

    /// Longitude in degrees.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Latitude in degrees.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// `[longitude, latitude]`, the order map renderers expect.
    #[inline]
    pub fn to_lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }

    #[inline]
    pub(crate) fn lon_rad(&self) -> f64 {
        self.longitude.to_radians()
    }

    #[inline]
    pub(crate) fn lat_rad(&self) -> f64 {
        self.latitude.to_radians()
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.longitude, self.latitude)
    }
}

/// Serialized form, matching the `{ latitude, longitude }` objects of
/// airport reference tables.
#[derive(Serialize, Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = CoordError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        GeoPoint::new(raw.longitude, raw.latitude)
    }
}

impl From<GeoPoint> for RawGeoPoint {
    fn from(point: GeoPoint) -> Self {
        RawGeoPoint {
            latitude: point.latitude,
            longitude: point.longitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_point() {
        let point = GeoPoint::new(-73.7781, 40.6413).unwrap();
        assert_eq!(point.longitude(), -73.7781);
        assert_eq!(point.latitude(), 40.6413);
        assert_eq!(point.to_lon_lat(), [-73.7781, 40.6413]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(GeoPoint::new(180.0, 90.0).is_ok());
        assert!(GeoPoint::new(-180.0, -90.0).is_ok());
    }

    #[test]
    fn test_invalid_latitude() {
        assert_eq!(
            GeoPoint::new(0.0, 91.0).unwrap_err(),
            CoordError::InvalidLatitude(91.0)
        );
    }

    #[test]
    fn test_invalid_longitude() {
        assert_eq!(
            GeoPoint::new(-180.5, 0.0).unwrap_err(),
            CoordError::InvalidLongitude(-180.5)
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert_eq!(GeoPoint::new(f64::NAN, 0.0).unwrap_err(), CoordError::NonFinite);
        assert_eq!(
            GeoPoint::new(0.0, f64::INFINITY).unwrap_err(),
            CoordError::NonFinite
        );
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: GeoPoint = serde_json::from_str(r#"{"latitude": 33.9416, "longitude": -118.4085}"#)
            .expect("valid point should deserialize");
        assert_eq!(ok.latitude(), 33.9416);

        let bad = serde_json::from_str::<GeoPoint>(r#"{"latitude": 133.0, "longitude": 0.0}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_display() {
        let point = GeoPoint::new(1.5, -2.25).unwrap();
        assert_eq!(point.to_string(), "(1.5000, -2.2500)");
    }
}

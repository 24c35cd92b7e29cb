//! Geographic coordinates in WGS84 degrees.
//!
//! [`GeoPoint`] keeps latitude and longitude as named fields because the rest
//! of the engine reasons about them separately (the ray-casting test walks
//! longitude spans, for example). Conversions to [`geo::Coord`] follow the
//! `x = longitude`, `y = latitude` convention used throughout the `geo`
//! ecosystem.

use geo::Coord;
use thiserror::Error;

/// Errors returned by [`GeoPoint::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoPointError {
    /// Latitude was non-finite or outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude was non-finite or outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// An immutable latitude/longitude pair.
///
/// # Examples
///
/// ```
/// use voltsite_core::GeoPoint;
///
/// # fn main() -> Result<(), voltsite_core::GeoPointError> {
/// let point = GeoPoint::new(28.6139, 77.2090)?;
/// assert_eq!(point.lat(), 28.6139);
/// assert!(GeoPoint::new(91.0, 0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGeoPoint"))]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGeoPoint {
    lat: f64,
    lng: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lng)
    }
}

impl GeoPoint {
    /// Validate and construct a point.
    ///
    /// # Errors
    ///
    /// Returns [`GeoPointError`] when either component is non-finite or out
    /// of range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, GeoPointError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoPointError::LatitudeOutOfRange(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(GeoPointError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Construct a point from literals already known to be in range.
    pub(crate) const fn from_trusted(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }

    /// Straight-line distance to `other` in raw degree units.
    ///
    /// No great-circle correction is applied; callers compare the result
    /// against small degree thresholds.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "planar distance in degree space"
    )]
    pub fn degree_distance(&self, other: &Self) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lng = self.lng - other.lng;
        d_lat.hypot(d_lng)
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.lng,
            y: point.lat,
        }
    }
}

impl TryFrom<Coord<f64>> for GeoPoint {
    type Error = GeoPointError;

    fn try_from(coord: Coord<f64>) -> Result<Self, Self::Error> {
        Self::new(coord.y, coord.x)
    }
}

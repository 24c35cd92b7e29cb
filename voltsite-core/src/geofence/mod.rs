//! Restricted-zone geofence for charging-site placement.
//!
//! A location is rejected when it lies inside any [`RestrictedArea`] or
//! within the buffer distance of any of its edges. Distances are measured in
//! raw degrees, which is adequate for the ~100 m buffers used near the
//! equatorial band but is not a great-circle measure.

mod area;
mod geometry;
mod ncr;

use thiserror::Error;

pub use area::{RestrictedArea, RestrictedAreaError};
pub use geometry::{distance_to_segment, point_in_polygon};

use crate::GeoPoint;

/// Default clearance around restricted boundaries (roughly 100 m).
pub const DEFAULT_BUFFER_DEGREES: f64 = 0.001;

/// Decide whether `point` may host a charging station.
///
/// Returns `false` as soon as the point is within `buffer_degrees` of an edge
/// of any area, or inside any area.
#[must_use]
pub fn is_valid_location(
    point: GeoPoint,
    restricted_areas: &[RestrictedArea],
    buffer_degrees: f64,
) -> bool {
    !restricted_areas
        .iter()
        .any(|area| violates(point, area, buffer_degrees))
}

fn violates(point: GeoPoint, area: &RestrictedArea, buffer_degrees: f64) -> bool {
    let coord = point.into();
    area.edges()
        .any(|edge| geometry::segment_distance(coord, edge) < buffer_degrees)
        || point_in_polygon(point, area.polygon())
}

/// Errors returned by [`Geofence::new`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeofenceError {
    /// The buffer was negative or non-finite.
    #[error("buffer of {0} degrees must be finite and non-negative")]
    InvalidBuffer(f64),
}

/// Restricted areas bundled with their clearance buffer.
///
/// # Examples
///
/// ```
/// use voltsite_core::{GeoPoint, Geofence};
///
/// # fn main() -> Result<(), voltsite_core::GeoPointError> {
/// let fence = Geofence::ncr();
/// // Connaught Place is well clear of the river.
/// assert!(fence.is_valid_location(GeoPoint::new(28.6315, 77.2167)?));
/// // Mid-channel on the Yamuna is not.
/// assert!(!fence.is_valid_location(GeoPoint::new(28.6200, 77.2310)?));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGeofence"))]
pub struct Geofence {
    areas: Vec<RestrictedArea>,
    buffer_degrees: f64,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGeofence {
    areas: Vec<RestrictedArea>,
    #[serde(default = "default_buffer")]
    buffer_degrees: f64,
}

#[cfg(feature = "serde")]
const fn default_buffer() -> f64 {
    DEFAULT_BUFFER_DEGREES
}

#[cfg(feature = "serde")]
impl TryFrom<RawGeofence> for Geofence {
    type Error = GeofenceError;

    fn try_from(raw: RawGeofence) -> Result<Self, Self::Error> {
        Self::new(raw.areas, raw.buffer_degrees)
    }
}

impl Default for Geofence {
    fn default() -> Self {
        Self::unrestricted()
    }
}

impl Geofence {
    /// Construct a geofence over `areas` with the given buffer.
    ///
    /// # Errors
    ///
    /// Returns [`GeofenceError::InvalidBuffer`] for negative or non-finite
    /// buffers.
    pub fn new(areas: Vec<RestrictedArea>, buffer_degrees: f64) -> Result<Self, GeofenceError> {
        if !buffer_degrees.is_finite() || buffer_degrees < 0.0 {
            return Err(GeofenceError::InvalidBuffer(buffer_degrees));
        }
        Ok(Self {
            areas,
            buffer_degrees,
        })
    }

    /// A geofence with no restricted areas; every location is valid.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            areas: Vec::new(),
            buffer_degrees: DEFAULT_BUFFER_DEGREES,
        }
    }

    /// The built-in Delhi NCR areas with the default buffer.
    #[must_use]
    pub fn ncr() -> Self {
        Self {
            areas: ncr::areas(),
            buffer_degrees: DEFAULT_BUFFER_DEGREES,
        }
    }

    /// Restricted areas in evaluation order.
    #[must_use]
    pub fn areas(&self) -> &[RestrictedArea] {
        &self.areas
    }

    /// Clearance buffer in degrees.
    #[must_use]
    pub const fn buffer_degrees(&self) -> f64 {
        self.buffer_degrees
    }

    /// See [`is_valid_location`].
    #[must_use]
    pub fn is_valid_location(&self, point: GeoPoint) -> bool {
        is_valid_location(point, &self.areas, self.buffer_degrees)
    }
}

//! Named no-build polygons such as rivers, floodplains and sanctuaries.

use geo::Line;
use thiserror::Error;

use crate::GeoPoint;

/// Minimum number of points in a ring.
const MIN_RING_POINTS: usize = 3;

/// Errors returned by [`RestrictedArea::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestrictedAreaError {
    /// The polygon had fewer than three points.
    #[error("restricted area {name:?} has {count} points; at least 3 are required")]
    TooFewPoints {
        /// Name of the offending area.
        name: String,
        /// Number of points supplied.
        count: usize,
    },
    /// The first and last points differ.
    #[error("restricted area {name:?} is not a closed ring")]
    OpenRing {
        /// Name of the offending area.
        name: String,
    },
}

/// A closed polygon in which charging stations may not be placed.
///
/// # Examples
///
/// ```
/// use voltsite_core::{GeoPoint, RestrictedArea};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let ring = vec![
///     GeoPoint::new(0.0, 0.0)?,
///     GeoPoint::new(0.0, 1.0)?,
///     GeoPoint::new(1.0, 1.0)?,
///     GeoPoint::new(0.0, 0.0)?,
/// ];
/// let area = RestrictedArea::new("Pond", ring)?;
/// assert_eq!(area.edges().count(), 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawRestrictedArea"))]
pub struct RestrictedArea {
    name: String,
    polygon: Vec<GeoPoint>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawRestrictedArea {
    name: String,
    polygon: Vec<GeoPoint>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawRestrictedArea> for RestrictedArea {
    type Error = RestrictedAreaError;

    fn try_from(raw: RawRestrictedArea) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.polygon)
    }
}

impl RestrictedArea {
    /// Validate and construct a restricted area.
    ///
    /// # Errors
    ///
    /// Returns [`RestrictedAreaError`] when the ring has fewer than three
    /// points or is not closed.
    pub fn new(
        name: impl Into<String>,
        polygon: Vec<GeoPoint>,
    ) -> Result<Self, RestrictedAreaError> {
        let name = name.into();
        if polygon.len() < MIN_RING_POINTS {
            return Err(RestrictedAreaError::TooFewPoints {
                name,
                count: polygon.len(),
            });
        }
        if polygon.first() != polygon.last() {
            return Err(RestrictedAreaError::OpenRing { name });
        }
        Ok(Self { name, polygon })
    }

    pub(crate) fn from_trusted(name: &str, polygon: Vec<GeoPoint>) -> Self {
        Self {
            name: name.to_owned(),
            polygon,
        }
    }

    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ring vertices in order, closing vertex included.
    #[must_use]
    pub fn polygon(&self) -> &[GeoPoint] {
        &self.polygon
    }

    /// Consecutive edges, wrapping the last vertex back to the first.
    pub fn edges(&self) -> impl Iterator<Item = Line<f64>> + '_ {
        let next = self.polygon.iter().cycle().skip(1);
        self.polygon
            .iter()
            .zip(next)
            .map(|(&start, &end)| Line::new(start, end))
    }
}

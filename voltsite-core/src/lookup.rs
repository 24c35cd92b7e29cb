//! Look up candidate stations near a coordinate.
//!
//! The [`PoiLookup`] trait abstracts the external map-data source. Callers
//! inside the engine treat any [`PoiLookupError`] as "no candidates found"
//! so a flaky source degrades a plan rather than aborting it.

use thiserror::Error;

use crate::{GeoPoint, Site};

/// Errors from [`PoiLookup::find_sites`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoiLookupError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Endpoint that was queried.
        url: String,
        /// Timeout that elapsed.
        timeout_secs: u64,
    },
    /// The request failed before a response arrived.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Endpoint that was queried.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service answered with a non-success status.
    #[error("{url} returned HTTP {status}: {message}")]
    Http {
        /// Endpoint that was queried.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse POI response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
}

/// Fetch raw candidate sites around a coordinate.
///
/// Implementations return sites in the source's order; callers rely on that
/// order to pick the first acceptable result deterministically. Geofence
/// filtering is the caller's job.
///
/// # Examples
///
/// ```rust
/// use voltsite_core::{GeoPoint, PoiLookup, PoiLookupError, Site, SiteCategory};
///
/// struct SingleStation;
///
/// impl PoiLookup for SingleStation {
///     fn find_sites(
///         &self,
///         center: GeoPoint,
///         _radius_meters: u32,
///     ) -> Result<Vec<Site>, PoiLookupError> {
///         Ok(vec![Site::new(center, SiteCategory::Market, "Fuel Hub")])
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let sites = SingleStation.find_sites(GeoPoint::new(28.6, 77.2)?, 5_000)?;
/// assert_eq!(sites.len(), 1);
/// # Ok(())
/// # }
/// ```
pub trait PoiLookup: Send + Sync {
    /// Return sites within `radius_meters` of `center`.
    fn find_sites(&self, center: GeoPoint, radius_meters: u32)
    -> Result<Vec<Site>, PoiLookupError>;
}

impl<T: PoiLookup + ?Sized> PoiLookup for &T {
    fn find_sites(
        &self,
        center: GeoPoint,
        radius_meters: u32,
    ) -> Result<Vec<Site>, PoiLookupError> {
        (**self).find_sites(center, radius_meters)
    }
}

impl<T: PoiLookup + ?Sized> PoiLookup for Box<T> {
    fn find_sites(
        &self,
        center: GeoPoint,
        radius_meters: u32,
    ) -> Result<Vec<Site>, PoiLookupError> {
        (**self).find_sites(center, radius_meters)
    }
}

/// Query `lookup`, logging and discarding any failure.
pub(crate) fn sites_or_empty<L>(lookup: &L, center: GeoPoint, radius_meters: u32) -> Vec<Site>
where
    L: PoiLookup + ?Sized,
{
    lookup
        .find_sites(center, radius_meters)
        .unwrap_or_else(|err| {
            log::warn!(
                "POI lookup near ({}, {}) failed; treating as no candidates: {err}",
                center.lat(),
                center.lng()
            );
            Vec::new()
        })
}

//! Test utilities for POI lookups.
//!
//! [`StubPoiLookup`] is a deterministic stand-in for
//! [`OverpassPoiLookup`](super::OverpassPoiLookup) that returns pre-configured
//! responses without making HTTP requests, and records the centres it was
//! queried with.

use std::sync::Mutex;

use voltsite_core::{GeoPoint, PoiLookup, PoiLookupError, Site};

/// Stub [`PoiLookup`] for testing.
///
/// # Example
///
/// ```
/// use voltsite_core::{GeoPoint, PoiLookup, Site, SiteCategory};
/// use voltsite_data::lookup::test_support::StubPoiLookup;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let hub = GeoPoint::new(28.6, 77.2)?;
/// let lookup = StubPoiLookup::with_sites(vec![Site::new(hub, SiteCategory::Market, "Hub")]);
///
/// let sites = lookup.find_sites(GeoPoint::new(0.0, 0.0)?, 5_000)?;
/// assert_eq!(sites.len(), 1);
/// assert_eq!(lookup.calls(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct StubPoiLookup {
    response: StubResponse,
    queries: Mutex<Vec<(GeoPoint, u32)>>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Sites(Vec<Site>),
    Error(PoiLookupError),
}

impl StubPoiLookup {
    /// Create a lookup that returns `sites` for every query.
    #[must_use]
    pub const fn with_sites(sites: Vec<Site>) -> Self {
        Self {
            response: StubResponse::Sites(sites),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Create a lookup that fails every query with `error`.
    #[must_use]
    pub const fn with_error(error: PoiLookupError) -> Self {
        Self {
            response: StubResponse::Error(error),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far, as `(center, radius_meters)` pairs.
    #[must_use]
    pub fn queries(&self) -> Vec<(GeoPoint, u32)> {
        self.queries
            .lock()
            .map(|queries| queries.clone())
            .unwrap_or_default()
    }

    /// Number of queries received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.queries().len()
    }
}

impl PoiLookup for StubPoiLookup {
    fn find_sites(
        &self,
        center: GeoPoint,
        radius_meters: u32,
    ) -> Result<Vec<Site>, PoiLookupError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((center, radius_meters));
        }
        match &self.response {
            StubResponse::Sites(sites) => Ok(sites.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

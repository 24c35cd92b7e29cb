//! Point-of-interest lookups backed by external map data.
//!
//! [`OverpassPoiLookup`] implements [`voltsite_core::PoiLookup`] against an
//! Overpass API endpoint, searching for fuel stations around a coordinate.
//!
//! # Example
//!
//! ```no_run
//! use voltsite_core::{GeoPoint, PoiLookup};
//! use voltsite_data::lookup::OverpassPoiLookup;
//!
//! let lookup = OverpassPoiLookup::new("https://overpass-api.de/api/interpreter")?;
//! let sites = lookup.find_sites(GeoPoint::new(28.6139, 77.2090)?, 3_000)?;
//! println!("found {} stations", sites.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod overpass;
mod provider;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_ENDPOINT, DEFAULT_USER_AGENT, OverpassConfig, OverpassPoiLookup, ProviderBuildError,
};

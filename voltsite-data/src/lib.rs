//! Data access for the Voltsite engine.
//!
//! Responsibilities:
//! - Adapt external point-of-interest sources to [`voltsite_core::PoiLookup`].
//! - Load restricted areas and vehicle catalogues from JSON files.
//!
//! Boundaries:
//! - Do not encode domain rules (live in `voltsite-core`).
//! - Keep blocking I/O off async executors.
//!
//! Invariants:
//! - Loaded values are validated by the core constructors.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod fs;
pub mod load;
pub mod lookup;

pub use load::{LoadError, load_geofence, load_vehicle_catalogue};
pub use lookup::{OverpassConfig, OverpassPoiLookup, ProviderBuildError};

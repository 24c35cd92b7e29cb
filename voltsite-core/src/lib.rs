//! Core domain types for the Voltsite engine.
//!
//! The crate covers three pure components and the seams to their external
//! collaborators:
//!
//! - the restricted-zone [`geofence`], which rejects points inside or near
//!   protected areas;
//! - the suitability [`SiteScorer`], which ranks candidate sites;
//! - the greedy [`ChargePlanner`], which splits a route into charging legs.
//!
//! Constructors validate their input and return `Result`, so the algorithms
//! can assume well-formed coordinates and strictly positive vehicle figures.

#![forbid(unsafe_code)]

pub mod advisor;
#[cfg(feature = "serde")]
pub mod contract;
pub mod geofence;
mod lookup;
pub mod planner;
mod point;
mod scorer;
mod site;
#[doc(hidden)]
pub mod test_support;
mod time;
mod vehicle;

pub use advisor::{
    AdviseError, AdvisorConfig, ChargerSnapshot, ChargerTelemetry, LocationOptimizer,
    PlacementCandidate, StationAdvisor, StationFeatures, StationRecommendation, WaitPrediction,
    WaitTimePredictor,
};
pub use geofence::{Geofence, GeofenceError, RestrictedArea, RestrictedAreaError};
pub use lookup::{PoiLookup, PoiLookupError};
pub use planner::{
    ChargePlanner, ChargingStop, LegOutcome, PlanError, PlannerConfig, RouteInput, RoutePlan,
};
pub use point::{GeoPoint, GeoPointError};
pub use scorer::{MIN_SPACING_DEGREES, SiteScorer, SuitabilityScorer, rank_sites};
pub use site::{ScoredSite, Site, SiteAttributes, SiteCategory, Tags, UNNAMED_STATION};
pub use time::{TimeContext, TimeOfDay};
pub use vehicle::{
    UnknownVehicleModel, Vehicle, VehicleCatalogue, VehicleError, VehicleModel,
    charge_time_minutes,
};

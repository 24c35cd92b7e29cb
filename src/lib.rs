//! Facade crate for the Voltsite charging-site engine.
//!
//! This crate re-exports the core domain types and exposes the Overpass POI
//! lookup and JSON loaders behind the `overpass` feature.

#![forbid(unsafe_code)]

pub use voltsite_core::{
    AdviseError, AdvisorConfig, ChargePlanner, ChargerSnapshot, ChargerTelemetry, ChargingStop,
    GeoPoint, GeoPointError, Geofence, GeofenceError, LegOutcome, LocationOptimizer,
    PlacementCandidate, PlanError, PlannerConfig, PoiLookup, PoiLookupError, RestrictedArea,
    RestrictedAreaError, RouteInput, RoutePlan, ScoredSite, Site, SiteAttributes, SiteCategory,
    SiteScorer, StationAdvisor, StationFeatures, StationRecommendation, SuitabilityScorer, Tags,
    TimeContext, TimeOfDay, UnknownVehicleModel, Vehicle, VehicleCatalogue, VehicleError,
    VehicleModel, WaitPrediction, WaitTimePredictor, charge_time_minutes, rank_sites,
};

#[cfg(feature = "serde")]
pub use voltsite_core::contract;

#[cfg(feature = "overpass")]
pub use voltsite_data::{
    LoadError, OverpassConfig, OverpassPoiLookup, ProviderBuildError, load_geofence,
    load_vehicle_catalogue,
};

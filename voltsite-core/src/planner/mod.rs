//! Greedy charging-stop planning along a route.
//!
//! The planner walks the route in a single forward pass. While the distance
//! left exceeds the current reach it estimates where the charge runs out by
//! proportional interpolation over the polyline, asks the [`PoiLookup`] for
//! stations there and records either a stop or an unreachable leg.
//!
//! The first leg's reach comes from the starting charge. Later legs assume
//! an 80 % recharge even though stops report a 90 % departure charge; the
//! reported figures are policy, not state.

mod plan;

use thiserror::Error;

pub use plan::{ChargingStop, LegOutcome, RouteInput, RoutePlan};

use crate::lookup::sites_or_empty;
use crate::{GeoPoint, Geofence, PoiLookup, Site, Vehicle, charge_time_minutes};

/// Errors returned by [`ChargePlanner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// The route polyline had no coordinates.
    #[error("route must contain at least one coordinate")]
    EmptyRoute,
    /// The route distance was negative or non-finite.
    #[error("route distance must be a non-negative number, got {0} km")]
    InvalidDistance(f64),
    /// The starting charge exceeded 100 %.
    #[error("charge must be between 0 and 100 percent, got {0}")]
    ChargeOutOfRange(u8),
    /// A planner setting would prevent the loop from making progress.
    #[error("invalid planner configuration: {0}")]
    InvalidConfig(&'static str),
    /// The route needs more legs than the configured limit.
    #[error("route needs more than {limit} charging legs")]
    TooManyLegs {
        /// Configured leg limit.
        limit: usize,
    },
}

/// Tunable planner policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Radius searched around each stopping point.
    pub search_radius_meters: u32,
    /// State of charge reported on arrival at a stop.
    pub arrival_charge_pct: u8,
    /// State of charge reported on departure from a stop.
    pub departure_charge_pct: u8,
    /// Charge assumed when computing reach after a stop.
    pub recharge_reach_pct: u8,
    /// Upper bound on legs, and so on lookups, per plan.
    pub max_legs: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            search_radius_meters: 5_000,
            arrival_charge_pct: 10,
            departure_charge_pct: 90,
            recharge_reach_pct: 80,
            max_legs: 64,
        }
    }
}

impl PlannerConfig {
    /// Set the search radius.
    #[must_use]
    pub const fn with_search_radius(mut self, meters: u32) -> Self {
        self.search_radius_meters = meters;
        self
    }

    /// Set the leg limit.
    #[must_use]
    pub const fn with_max_legs(mut self, max_legs: usize) -> Self {
        self.max_legs = max_legs;
        self
    }

    fn validate(&self) -> Result<(), PlanError> {
        if self.recharge_reach_pct == 0 || self.recharge_reach_pct > 100 {
            return Err(PlanError::InvalidConfig(
                "recharge reach must be between 1 and 100 percent",
            ));
        }
        if self.arrival_charge_pct > 100 || self.departure_charge_pct > 100 {
            return Err(PlanError::InvalidConfig(
                "stop charge levels must not exceed 100 percent",
            ));
        }
        Ok(())
    }
}

/// Plans charging stops using a POI lookup and a geofence.
///
/// # Examples
///
/// ```
/// use voltsite_core::test_support::MemoryPoiLookup;
/// use voltsite_core::{ChargePlanner, GeoPoint, Geofence, RouteInput, Vehicle};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let planner = ChargePlanner::new(MemoryPoiLookup::default(), Geofence::unrestricted());
/// let vehicle = Vehicle::new(400.0, 80.0, 100.0)?;
/// let route = RouteInput {
///     total_distance_km: 120.0,
///     coordinates: vec![GeoPoint::new(28.6, 77.2)?, GeoPoint::new(28.9, 77.6)?],
///     start_charge_pct: 80,
/// };
/// let plan = planner.plan(&route, &vehicle)?;
/// assert!(plan.legs().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ChargePlanner<L> {
    lookup: L,
    geofence: Geofence,
    config: PlannerConfig,
}

impl<L: PoiLookup> ChargePlanner<L> {
    /// Create a planner with the default policy.
    pub fn new(lookup: L, geofence: Geofence) -> Self {
        Self::with_config(lookup, geofence, PlannerConfig::default())
    }

    /// Create a planner with an explicit policy.
    pub const fn with_config(lookup: L, geofence: Geofence, config: PlannerConfig) -> Self {
        Self {
            lookup,
            geofence,
            config,
        }
    }

    /// The active policy.
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan the charging legs for `route`.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError`] for an empty polyline, a negative or non-finite
    /// distance, a starting charge above 100 %, an invalid configuration, or
    /// when the route needs more than [`PlannerConfig::max_legs`] legs.
    #[expect(clippy::float_arithmetic, reason = "remaining distance is consumed leg by leg")]
    pub fn plan(&self, route: &RouteInput, vehicle: &Vehicle) -> Result<RoutePlan, PlanError> {
        validate_route(route)?;
        self.config.validate()?;

        let charge_time = charge_time_minutes(
            vehicle,
            self.config.arrival_charge_pct,
            self.config.departure_charge_pct,
        );
        let mut reach = vehicle.reach_km(route.start_charge_pct);
        let mut remaining = route.total_distance_km;
        let mut legs = Vec::new();

        while remaining > reach {
            if legs.len() >= self.config.max_legs {
                return Err(PlanError::TooManyLegs {
                    limit: self.config.max_legs,
                });
            }
            let leg = legs.len();
            let position = position_along(&route.coordinates, reach / remaining)
                .ok_or(PlanError::EmptyRoute)?;
            log::debug!(
                "leg {leg}: {remaining:.1} km remaining, {reach:.1} km reach; searching near ({}, {})",
                position.lat(),
                position.lng()
            );

            let outcome = match self.first_valid_station(position) {
                Some(site) => LegOutcome::Stop(ChargingStop {
                    station_name: site.name,
                    position: site.position,
                    charge_time_minutes: charge_time,
                    arrival_charge_pct: self.config.arrival_charge_pct,
                    departure_charge_pct: self.config.departure_charge_pct,
                    station_category: site.category.to_string(),
                }),
                None => {
                    log::warn!(
                        "no valid charging station within {} m of ({}, {}); leg {leg} is unreachable",
                        self.config.search_radius_meters,
                        position.lat(),
                        position.lng()
                    );
                    LegOutcome::Unreachable { leg, position }
                }
            };
            legs.push(outcome);

            remaining -= reach;
            reach = vehicle.reach_km(self.config.recharge_reach_pct);
        }

        Ok(RoutePlan::new(legs))
    }

    fn first_valid_station(&self, position: GeoPoint) -> Option<Site> {
        sites_or_empty(&self.lookup, position, self.config.search_radius_meters)
            .into_iter()
            .find(|site| self.geofence.is_valid_location(site.position))
    }
}

fn validate_route(route: &RouteInput) -> Result<(), PlanError> {
    if route.coordinates.is_empty() {
        return Err(PlanError::EmptyRoute);
    }
    if !route.total_distance_km.is_finite() || route.total_distance_km < 0.0 {
        return Err(PlanError::InvalidDistance(route.total_distance_km));
    }
    if route.start_charge_pct > 100 {
        return Err(PlanError::ChargeOutOfRange(route.start_charge_pct));
    }
    Ok(())
}

/// Map a route fraction onto the sampled polyline.
///
/// The fraction is clamped to `[0, 1]` and scaled by the number of samples;
/// the resulting index is clamped to the last coordinate.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "index is the floor of a clamped, non-negative fraction of the length"
)]
fn position_along(coordinates: &[GeoPoint], fraction: f64) -> Option<GeoPoint> {
    let scaled = (fraction.clamp(0.0, 1.0) * coordinates.len() as f64).floor();
    let index = scaled as usize;
    coordinates
        .get(index)
        .or_else(|| coordinates.last())
        .copied()
}

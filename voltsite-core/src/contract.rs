//! JSON request and response bodies for route planning.
//!
//! Field names are camelCase. Coordinates in the request are `[lat, lng]`
//! pairs; stops in the response flatten the position into `lat` and `lng`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    ChargePlanner, GeoPoint, GeoPointError, PlanError, PoiLookup, RouteInput, RoutePlan,
    UnknownVehicleModel, VehicleCatalogue,
};

/// Route section of a [`RoutePlanRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    /// Total driving distance in kilometres.
    pub distance: f64,
    /// `[lat, lng]` samples along the route.
    pub coordinates: Vec<[f64; 2]>,
}

/// Body of a route-plan request.
///
/// # Examples
///
/// ```
/// use voltsite_core::contract::RoutePlanRequest;
///
/// let request: RoutePlanRequest = serde_json::from_str(
///     r#"{"route":{"distance":120,"coordinates":[[28.6,77.2]]},
///         "evModel":"nissan_leaf","currentCharge":80}"#,
/// )
/// .expect("valid request");
/// assert_eq!(request.ev_model, "nissan_leaf");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanRequest {
    /// Route to plan.
    pub route: RouteGeometry,
    /// Catalogue key of the vehicle.
    pub ev_model: String,
    /// State of charge at departure, in percent.
    pub current_charge: u8,
}

/// Errors turning a [`RoutePlanRequest`] into a plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutePlanRequestError {
    /// The request named a vehicle missing from the catalogue.
    #[error(transparent)]
    UnknownVehicleModel(#[from] UnknownVehicleModel),
    /// A route coordinate was out of range.
    #[error("route coordinate {index} is invalid: {source}")]
    InvalidCoordinate {
        /// Position in the coordinate list.
        index: usize,
        /// Validation failure.
        #[source]
        source: GeoPointError,
    },
    /// The planner rejected the route.
    #[error(transparent)]
    Plan(#[from] PlanError),
}

impl RoutePlanRequest {
    /// Validate the route section into a [`RouteInput`].
    ///
    /// # Errors
    ///
    /// Returns [`RoutePlanRequestError::InvalidCoordinate`] for the first
    /// out-of-range pair.
    pub fn route_input(&self) -> Result<RouteInput, RoutePlanRequestError> {
        let coordinates = self
            .route
            .coordinates
            .iter()
            .enumerate()
            .map(|(index, &[lat, lng])| {
                GeoPoint::new(lat, lng)
                    .map_err(|source| RoutePlanRequestError::InvalidCoordinate { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RouteInput {
            total_distance_km: self.route.distance,
            coordinates,
            start_charge_pct: self.current_charge,
        })
    }

    /// Resolve the vehicle and plan the route.
    ///
    /// # Errors
    ///
    /// Returns [`RoutePlanRequestError`] for an unknown model, an invalid
    /// coordinate, or a route the planner rejects.
    pub fn plan<L: PoiLookup>(
        &self,
        planner: &ChargePlanner<L>,
        catalogue: &VehicleCatalogue,
    ) -> Result<RoutePlanResponse, RoutePlanRequestError> {
        let model = catalogue.get(&self.ev_model)?;
        let route = self.route_input()?;
        let plan = planner.plan(&route, &model.vehicle)?;
        Ok(RoutePlanResponse::from(&plan))
    }
}

/// A charging stop as sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargingStopBody {
    /// Station name.
    pub name: String,
    /// Station latitude.
    pub lat: f64,
    /// Station longitude.
    pub lng: f64,
    /// Minutes spent charging.
    pub charge_time: u32,
    /// Charge on arrival, in percent.
    pub arrival_charge: u8,
    /// Charge on departure, in percent.
    pub departure_charge: u8,
    /// Land-use category label.
    #[serde(rename = "type")]
    pub category: String,
}

/// A leg for which no station was found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnreachableLegBody {
    /// Zero-based leg index.
    pub leg: usize,
    /// Latitude where a station was sought.
    pub lat: f64,
    /// Longitude where a station was sought.
    pub lng: f64,
}

/// Body of a route-plan response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanResponse {
    /// Stops found, in driving order.
    pub charging_stops: Vec<ChargingStopBody>,
    /// Legs without a station, in driving order.
    pub unreachable_legs: Vec<UnreachableLegBody>,
}

impl From<&RoutePlan> for RoutePlanResponse {
    fn from(plan: &RoutePlan) -> Self {
        Self {
            charging_stops: plan
                .charging_stops()
                .map(|stop| ChargingStopBody {
                    name: stop.station_name.clone(),
                    lat: stop.position.lat(),
                    lng: stop.position.lng(),
                    charge_time: stop.charge_time_minutes,
                    arrival_charge: stop.arrival_charge_pct,
                    departure_charge: stop.departure_charge_pct,
                    category: stop.station_category.clone(),
                })
                .collect(),
            unreachable_legs: plan
                .unreachable_legs()
                .map(|(leg, position)| UnreachableLegBody {
                    leg,
                    lat: position.lat(),
                    lng: position.lng(),
                })
                .collect(),
        }
    }
}

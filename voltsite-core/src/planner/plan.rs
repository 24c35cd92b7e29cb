//! Planner inputs and outputs.

use crate::GeoPoint;

/// A route to plan charging stops for.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteInput {
    /// Driving distance of the whole route in kilometres.
    pub total_distance_km: f64,
    /// Route polyline, assumed to be sampled roughly uniformly.
    pub coordinates: Vec<GeoPoint>,
    /// State of charge at departure, `0..=100`.
    pub start_charge_pct: u8,
}

/// A charging stop along a route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargingStop {
    /// Name of the station.
    pub station_name: String,
    /// Station position.
    pub position: GeoPoint,
    /// Time spent charging.
    pub charge_time_minutes: u32,
    /// State of charge on arrival.
    pub arrival_charge_pct: u8,
    /// State of charge on departure.
    pub departure_charge_pct: u8,
    /// Land-use category of the station.
    pub station_category: String,
}

/// Result of planning a single leg.
#[derive(Debug, Clone, PartialEq)]
pub enum LegOutcome {
    /// A station was found for the leg.
    Stop(ChargingStop),
    /// No acceptable station was found near the planned stopping point.
    Unreachable {
        /// Zero-based leg index.
        leg: usize,
        /// Where the stop was sought.
        position: GeoPoint,
    },
}

/// Ordered outcomes of every leg that needed a charge.
///
/// An empty plan means the route fits within the starting charge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoutePlan {
    legs: Vec<LegOutcome>,
}

impl RoutePlan {
    pub(crate) const fn new(legs: Vec<LegOutcome>) -> Self {
        Self { legs }
    }

    /// Leg outcomes in driving order.
    #[must_use]
    pub fn legs(&self) -> &[LegOutcome] {
        &self.legs
    }

    /// Stops that were found, in driving order.
    pub fn charging_stops(&self) -> impl Iterator<Item = &ChargingStop> {
        self.legs.iter().filter_map(|leg| match leg {
            LegOutcome::Stop(stop) => Some(stop),
            LegOutcome::Unreachable { .. } => None,
        })
    }

    /// Indices and search positions of legs without a station.
    pub fn unreachable_legs(&self) -> impl Iterator<Item = (usize, GeoPoint)> + '_ {
        self.legs.iter().filter_map(|leg| match *leg {
            LegOutcome::Unreachable { leg, position } => Some((leg, position)),
            LegOutcome::Stop(_) => None,
        })
    }

    /// The first leg without a station; the plan is infeasible beyond it.
    #[must_use]
    pub fn first_unreachable_leg(&self) -> Option<usize> {
        self.unreachable_legs().next().map(|(leg, _)| leg)
    }

    /// Whether every leg found a station.
    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.first_unreachable_leg().is_none()
    }

    /// Consume the plan, returning the leg outcomes.
    #[must_use]
    pub fn into_legs(self) -> Vec<LegOutcome> {
        self.legs
    }
}

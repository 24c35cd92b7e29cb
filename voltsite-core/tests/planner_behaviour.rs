#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for the greedy charging-stop planner.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use voltsite_core::test_support::MemoryPoiLookup;
use voltsite_core::{
    ChargePlanner, GeoPoint, Geofence, LegOutcome, RouteInput, RoutePlan, Site, SiteCategory,
    Vehicle,
};

#[derive(Debug, Default)]
struct PlannerWorld {
    vehicle: RefCell<Option<Vehicle>>,
    lookup: RefCell<MemoryPoiLookup>,
    plan: RefCell<Option<RoutePlan>>,
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::default()
}

fn point(lat: f64, lng: f64) -> GeoPoint {
    GeoPoint::new(lat, lng).expect("valid point")
}

#[given("a vehicle with range {range} km, battery {battery} kWh and charging speed {speed} kW")]
fn given_vehicle(world: &PlannerWorld, range: f64, battery: f64, speed: f64) {
    let vehicle = Vehicle::new(range, battery, speed).expect("valid vehicle");
    world.vehicle.replace(Some(vehicle));
}

#[given("stations every tenth of a degree along the route")]
fn given_stations(world: &PlannerWorld) {
    let sites = (0..10).map(|i| {
        let lat = f64::from(i) / 10.0;
        Site::new(point(lat, 0.002), SiteCategory::Market, format!("Station {i}"))
    });
    world.lookup.replace(MemoryPoiLookup::with_sites(sites));
}

#[given("no stations near the route")]
fn given_no_stations(world: &PlannerWorld) {
    world.lookup.replace(MemoryPoiLookup::default());
}

#[when("I plan a {distance} km route starting at {charge} percent charge")]
fn when_plan(world: &PlannerWorld, distance: f64, charge: u8) {
    let route = RouteInput {
        total_distance_km: distance,
        coordinates: (0..10).map(|i| point(f64::from(i) / 10.0, 0.0)).collect(),
        start_charge_pct: charge,
    };
    let vehicle = world.vehicle.borrow().expect("vehicle configured");
    let planner = ChargePlanner::new(world.lookup.borrow().clone(), Geofence::unrestricted());
    let plan = planner.plan(&route, &vehicle).expect("plan succeeds");
    world.plan.replace(Some(plan));
}

fn with_plan<T>(world: &PlannerWorld, check: impl FnOnce(&RoutePlan) -> T) -> T {
    let plan = world.plan.borrow();
    check(plan.as_ref().expect("plan recorded"))
}

#[then("the plan has {count} legs")]
fn then_leg_count(world: &PlannerWorld, count: usize) {
    with_plan(world, |plan| assert_eq!(plan.legs().len(), count));
}

#[then("every stop takes {minutes} minutes")]
fn then_charge_time(world: &PlannerWorld, minutes: u32) {
    with_plan(world, |plan| {
        assert!(plan.charging_stops().all(|s| s.charge_time_minutes == minutes));
    });
}

#[then("every stop arrives at {arrival} percent and departs at {departure} percent")]
fn then_charge_levels(world: &PlannerWorld, arrival: u8, departure: u8) {
    with_plan(world, |plan| {
        assert!(plan.charging_stops().all(|s| {
            s.arrival_charge_pct == arrival && s.departure_charge_pct == departure
        }));
    });
}

#[then("the plan is feasible")]
fn then_feasible(world: &PlannerWorld) {
    with_plan(world, |plan| assert!(plan.is_feasible()));
}

#[then("leg {leg} is unreachable")]
fn then_unreachable(world: &PlannerWorld, leg: usize) {
    with_plan(world, |plan| {
        let outcome = plan.legs().get(leg).expect("leg exists");
        assert!(matches!(outcome, LegOutcome::Unreachable { .. }));
        assert_eq!(plan.first_unreachable_leg(), Some(leg));
    });
}

#[scenario(path = "tests/features/planner.feature", index = 0)]
fn within_starting_charge(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 1)]
fn one_stop_beyond_reach(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 2)]
fn eighty_percent_recharge(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 3)]
fn unreachable_leg(world: PlannerWorld) {
    let _ = world;
}

#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for the restricted-zone geofence.

use std::cell::{Cell, RefCell};

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use voltsite_core::{GeoPoint, Geofence, RestrictedArea};

#[derive(Debug, Default)]
struct GeofenceWorld {
    fence: RefCell<Geofence>,
    valid: Cell<Option<bool>>,
}

#[fixture]
fn world() -> GeofenceWorld {
    GeofenceWorld::default()
}

#[given("the built-in NCR geofence")]
fn given_ncr(world: &GeofenceWorld) {
    world.fence.replace(Geofence::ncr());
}

#[given("a square restricted area from 0 to 2 degrees")]
fn given_square(world: &GeofenceWorld) {
    let ring = [(0.0, 0.0), (0.0, 2.0), (2.0, 2.0), (2.0, 0.0), (0.0, 0.0)]
        .into_iter()
        .map(|(lat, lng)| GeoPoint::new(lat, lng).expect("valid vertex"))
        .collect();
    let square = RestrictedArea::new("Square", ring).expect("closed ring");
    let fence = Geofence::new(vec![square], 0.001).expect("valid buffer");
    world.fence.replace(fence);
}

#[when("I check the point {lat}, {lng}")]
fn when_check(world: &GeofenceWorld, lat: f64, lng: f64) {
    let point = GeoPoint::new(lat, lng).expect("valid point");
    world.valid.set(Some(world.fence.borrow().is_valid_location(point)));
}

#[then("the location is accepted")]
fn then_accepted(world: &GeofenceWorld) {
    assert_eq!(world.valid.get(), Some(true));
}

#[then("the location is rejected")]
fn then_rejected(world: &GeofenceWorld) {
    assert_eq!(world.valid.get(), Some(false));
}

#[scenario(path = "tests/features/geofence.feature", index = 0)]
fn yamuna_channel_rejected(world: GeofenceWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/geofence.feature", index = 1)]
fn okhla_rejected(world: GeofenceWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/geofence.feature", index = 2)]
fn connaught_place_accepted(world: GeofenceWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/geofence.feature", index = 3)]
fn inside_buffer_rejected(world: GeofenceWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/geofence.feature", index = 4)]
fn outside_buffer_accepted(world: GeofenceWorld) {
    let _ = world;
}

//! Property-based tests for the geofence, scorer and planner.
//!
//! # Invariants tested
//!
//! - **Segment symmetry:** distance to a segment ignores its direction.
//! - **Bonus monotonicity:** enabling an attribute never lowers a score.
//! - **Spacing exclusivity:** two sites closer than the minimum spacing never
//!   both score above zero against each other.
//! - **Within reach:** a route shorter than the starting reach has no legs.
//! - **Determinism:** identical inputs give identical plans.

use proptest::prelude::*;
use voltsite_core::geofence::distance_to_segment;
use voltsite_core::test_support::MemoryPoiLookup;
use voltsite_core::{
    ChargePlanner, GeoPoint, Geofence, MIN_SPACING_DEGREES, RouteInput, Site, SiteAttributes,
    SiteCategory, SiteScorer, SuitabilityScorer, Vehicle,
};

fn point_strategy() -> impl Strategy<Value = GeoPoint> {
    (-80.0..80.0_f64, -170.0..170.0_f64).prop_filter_map("in range", |(lat, lng)| {
        GeoPoint::new(lat, lng).ok()
    })
}

fn attributes_strategy() -> impl Strategy<Value = SiteAttributes> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(near_highway, in_commercial, is_24_7, brand_known)| SiteAttributes {
            near_highway,
            in_commercial,
            is_24_7,
            brand_known,
        },
    )
}

fn vehicle_strategy() -> impl Strategy<Value = Vehicle> {
    (50.0..600.0_f64, 20.0..120.0_f64, 20.0..350.0_f64).prop_filter_map(
        "positive",
        |(range, battery, speed)| Vehicle::new(range, battery, speed).ok(),
    )
}

fn site(position: GeoPoint, attributes: SiteAttributes) -> Site {
    Site::new(position, SiteCategory::Market, "Candidate").with_attributes(attributes)
}

fn sample_route(total_distance_km: f64, start_charge_pct: u8) -> Option<RouteInput> {
    let coordinates = (0..20)
        .map(|i| GeoPoint::new(f64::from(i) / 20.0, 0.0).ok())
        .collect::<Option<Vec<_>>>()?;
    Some(RouteInput {
        total_distance_km,
        coordinates,
        start_charge_pct,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: swapping segment endpoints leaves the distance unchanged.
    #[test]
    fn segment_distance_is_symmetric(
        p in point_strategy(),
        a in point_strategy(),
        b in point_strategy(),
    ) {
        let forward = distance_to_segment(p, a, b);
        let backward = distance_to_segment(p, b, a);
        prop_assert!((forward - backward).abs() <= 1e-9 * forward.max(1.0));
        prop_assert!(forward >= 0.0);
    }

    /// Property: turning on any single bonus strictly raises the score.
    #[test]
    fn score_is_monotonic_in_each_bonus(
        position in point_strategy(),
        attributes in attributes_strategy(),
        bonus in 0_usize..4,
    ) {
        let scorer = SuitabilityScorer::new(Geofence::unrestricted());
        let mut without = attributes;
        let mut with = attributes;
        let (off, on) = match bonus {
            0 => (&mut without.near_highway, &mut with.near_highway),
            1 => (&mut without.in_commercial, &mut with.in_commercial),
            2 => (&mut without.is_24_7, &mut with.is_24_7),
            _ => (&mut without.brand_known, &mut with.brand_known),
        };
        *off = false;
        *on = true;
        let base = scorer.score(&site(position, without), &[]);
        let raised = scorer.score(&site(position, with), &[]);
        prop_assert!(raised > base);
        prop_assert!(base >= 1.0);
    }

    /// Property: close neighbours exclude each other.
    #[test]
    fn close_sites_never_both_accepted(
        a in point_strategy(),
        d_lat in -0.003..0.003_f64,
        d_lng in -0.003..0.003_f64,
        attributes in attributes_strategy(),
    ) {
        let b = GeoPoint::new(a.lat() + d_lat, a.lng() + d_lng);
        prop_assume!(b.is_ok());
        let b = b.unwrap_or(a);
        prop_assume!(a.degree_distance(&b) < MIN_SPACING_DEGREES);

        let scorer = SuitabilityScorer::new(Geofence::unrestricted());
        let a_given_b = scorer.score(&site(a, attributes), &[b]);
        let b_given_a = scorer.score(&site(b, attributes), &[a]);
        prop_assert_eq!(a_given_b, 0.0);
        prop_assert_eq!(b_given_a, 0.0);
    }

    /// Property: a route within the starting reach needs no charging legs.
    #[test]
    fn no_legs_within_starting_reach(
        vehicle in vehicle_strategy(),
        charge in 0_u8..=100,
        share in 0.0..=1.0_f64,
    ) {
        let reach = vehicle.range_km() * f64::from(charge) / 100.0;
        let route = sample_route(reach * share, charge);
        prop_assume!(route.is_some());
        let Some(route) = route else { return Ok(()) };

        let planner = ChargePlanner::new(MemoryPoiLookup::default(), Geofence::unrestricted());
        let plan = planner.plan(&route, &vehicle);
        prop_assert!(plan.is_ok_and(|p| p.legs().is_empty()));
    }

    /// Property: planning twice with the same collaborators gives the same plan.
    #[test]
    fn planning_is_deterministic(
        vehicle in vehicle_strategy(),
        charge in 10_u8..=100,
        distance in 0.0..3_000.0_f64,
    ) {
        let route = sample_route(distance, charge);
        prop_assume!(route.is_some());
        let Some(route) = route else { return Ok(()) };

        let stations = (0..20).filter_map(|i| {
            let position = GeoPoint::new(f64::from(i) / 20.0, 0.001).ok()?;
            Some(Site::new(position, SiteCategory::Office, format!("S{i}")))
        });
        let planner = ChargePlanner::new(
            MemoryPoiLookup::with_sites(stations),
            Geofence::unrestricted(),
        );
        let first = planner.plan(&route, &vehicle);
        let second = planner.plan(&route, &vehicle);
        prop_assert_eq!(first, second);
    }
}

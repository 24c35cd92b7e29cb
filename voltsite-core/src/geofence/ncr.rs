//! Built-in restricted areas for the Delhi National Capital Region.

use super::RestrictedArea;
use crate::GeoPoint;

const YAMUNA: &[(f64, f64)] = &[
    (28.6890, 77.2170),
    (28.6800, 77.2220),
    (28.6700, 77.2250),
    (28.6600, 77.2280),
    (28.6500, 77.2300),
    (28.6400, 77.2320),
    (28.6300, 77.2340),
    (28.6200, 77.2360),
    (28.6100, 77.2380),
    (28.6000, 77.2400),
    (28.5900, 77.2420),
    (28.5800, 77.2440),
    (28.5700, 77.2460),
    // west bank, heading back north
    (28.5700, 77.2360),
    (28.5800, 77.2340),
    (28.5900, 77.2320),
    (28.6000, 77.2300),
    (28.6100, 77.2280),
    (28.6200, 77.2260),
    (28.6300, 77.2240),
    (28.6400, 77.2220),
    (28.6500, 77.2200),
    (28.6600, 77.2180),
    (28.6700, 77.2160),
    (28.6800, 77.2140),
    (28.6890, 77.2170),
];

const OKHLA: &[(f64, f64)] = &[
    (28.5680, 77.3000),
    (28.5700, 77.3100),
    (28.5600, 77.3150),
    (28.5550, 77.3050),
    (28.5680, 77.3000),
];

fn ring(vertices: &[(f64, f64)]) -> Vec<GeoPoint> {
    vertices
        .iter()
        .map(|&(lat, lng)| GeoPoint::from_trusted(lat, lng))
        .collect()
}

/// The Yamuna river corridor and the Okhla bird sanctuary.
pub(super) fn areas() -> Vec<RestrictedArea> {
    vec![
        RestrictedArea::from_trusted("Yamuna River and Floodplains", ring(YAMUNA)),
        RestrictedArea::from_trusted("Okhla Bird Sanctuary", ring(OKHLA)),
    ]
}

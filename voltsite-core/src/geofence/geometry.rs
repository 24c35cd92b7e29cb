//! Planar geometry over raw latitude/longitude degrees.

use geo::{Coord, Line};

use crate::GeoPoint;

/// Shortest distance from `point` to the segment `p1`-`p2`, in degrees.
///
/// The projection parameter is clamped to the segment so points beyond either
/// end measure to the nearest endpoint. A zero-length segment measures to
/// `p1`. The result does not depend on the direction of the segment.
///
/// # Examples
///
/// ```
/// use voltsite_core::{GeoPoint, geofence::distance_to_segment};
///
/// # fn main() -> Result<(), voltsite_core::GeoPointError> {
/// let d = distance_to_segment(
///     GeoPoint::new(1.0, 1.0)?,
///     GeoPoint::new(0.0, 0.0)?,
///     GeoPoint::new(0.0, 2.0)?,
/// );
/// assert!((d - 1.0).abs() < 1e-12);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn distance_to_segment(point: GeoPoint, p1: GeoPoint, p2: GeoPoint) -> f64 {
    segment_distance(point.into(), Line::new(p1, p2))
}

#[expect(
    clippy::float_arithmetic,
    reason = "dot and cross products over degree offsets"
)]
pub(crate) fn segment_distance(point: Coord<f64>, edge: Line<f64>) -> f64 {
    let offset = point - edge.start;
    let delta = edge.delta();
    let len_sq = delta.x * delta.x + delta.y * delta.y;
    if len_sq == 0.0 {
        return offset.x.hypot(offset.y);
    }

    let t = (offset.x * delta.x + offset.y * delta.y) / len_sq;
    if t < 0.0 {
        offset.x.hypot(offset.y)
    } else if t > 1.0 {
        let beyond = point - edge.end;
        beyond.x.hypot(beyond.y)
    } else {
        (offset.x * delta.y - delta.x * offset.y).abs() / len_sq.sqrt()
    }
}

/// Crossing-number containment test.
///
/// The polygon is treated as open: a closing vertex equal to the first one is
/// ignored. Edge spans are half-open in longitude, so a ray passing exactly
/// through a vertex is counted once. Points on the boundary may fall either
/// way; the geofence catches them with its buffer test instead.
///
/// # Examples
///
/// ```
/// use voltsite_core::{GeoPoint, geofence::point_in_polygon};
///
/// # fn main() -> Result<(), voltsite_core::GeoPointError> {
/// let square = [
///     GeoPoint::new(0.0, 0.0)?,
///     GeoPoint::new(0.0, 2.0)?,
///     GeoPoint::new(2.0, 2.0)?,
///     GeoPoint::new(2.0, 0.0)?,
///     GeoPoint::new(0.0, 0.0)?,
/// ];
/// assert!(point_in_polygon(GeoPoint::new(1.0, 1.0)?, &square));
/// assert!(!point_in_polygon(GeoPoint::new(3.0, 3.0)?, &square));
/// # Ok(())
/// # }
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "edge crossing latitude is interpolated"
)]
pub fn point_in_polygon(point: GeoPoint, polygon: &[GeoPoint]) -> bool {
    let ring = open_ring(polygon);
    let Some(last) = ring.len().checked_sub(1) else {
        return false;
    };

    let x = point.lng();
    let y = point.lat();
    let previous = ring.iter().cycle().skip(last);
    ring.iter()
        .zip(previous)
        .map(|(vi, vj)| {
            (vi.lng() > x) != (vj.lng() > x)
                && y < (vj.lat() - vi.lat()) * (x - vi.lng()) / (vj.lng() - vi.lng()) + vi.lat()
        })
        .fold(false, |inside, crossed| inside != crossed)
}

fn open_ring(polygon: &[GeoPoint]) -> &[GeoPoint] {
    match (polygon.first(), polygon.split_last()) {
        (Some(first), Some((last, rest))) if first == last && !rest.is_empty() => rest,
        _ => polygon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const EPSILON: f64 = 1e-12;

    fn pt(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint::new(lat, lng).expect("valid test point")
    }

    #[fixture]
    fn square() -> Vec<GeoPoint> {
        vec![
            pt(0.0, 0.0),
            pt(0.0, 2.0),
            pt(2.0, 2.0),
            pt(2.0, 0.0),
            pt(0.0, 0.0),
        ]
    }

    #[rstest]
    #[case::perpendicular(pt(1.0, 1.0), 1.0)]
    #[case::before_start(pt(0.0, -3.0), 3.0)]
    #[case::beyond_end(pt(0.0, 5.0), 3.0)]
    #[case::on_segment(pt(0.0, 1.5), 0.0)]
    fn segment_distance_clamps_projection(#[case] point: GeoPoint, #[case] expected: f64) {
        let d = distance_to_segment(point, pt(0.0, 0.0), pt(0.0, 2.0));
        assert!((d - expected).abs() < EPSILON, "expected {expected}, got {d}");
    }

    #[rstest]
    fn degenerate_segment_measures_to_endpoint() {
        let d = distance_to_segment(pt(3.0, 4.0), pt(0.0, 0.0), pt(0.0, 0.0));
        assert!((d - 5.0).abs() < EPSILON);
    }

    #[rstest]
    fn segment_distance_ignores_direction() {
        let p = pt(0.3, 1.7);
        let a = pt(-1.0, 0.5);
        let b = pt(2.0, 2.5);
        let forward = distance_to_segment(p, a, b);
        let backward = distance_to_segment(p, b, a);
        assert!((forward - backward).abs() < EPSILON);
    }

    #[rstest]
    #[case(pt(1.0, 1.0), true)]
    #[case(pt(3.0, 3.0), false)]
    #[case(pt(1.0, -0.5), false)]
    #[case(pt(1.999, 0.001), true)]
    fn square_containment(square: Vec<GeoPoint>, #[case] point: GeoPoint, #[case] inside: bool) {
        assert_eq!(point_in_polygon(point, &square), inside);
    }

    #[rstest]
    fn closing_vertex_does_not_change_result(square: Vec<GeoPoint>) {
        let open = square.get(..4).expect("square has five vertices");
        for probe in [pt(1.0, 1.0), pt(3.0, 3.0), pt(0.5, 1.5)] {
            assert_eq!(point_in_polygon(probe, open), point_in_polygon(probe, &square));
        }
    }

    #[rstest]
    fn concave_polygon_notch_is_outside() {
        // A "U" shape opening to the north.
        let polygon = [
            pt(0.0, 0.0),
            pt(0.0, 3.0),
            pt(3.0, 3.0),
            pt(3.0, 2.0),
            pt(1.0, 2.0),
            pt(1.0, 1.0),
            pt(3.0, 1.0),
            pt(3.0, 0.0),
            pt(0.0, 0.0),
        ];
        assert!(!point_in_polygon(pt(2.0, 1.5), &polygon));
        assert!(point_in_polygon(pt(2.0, 0.5), &polygon));
        assert!(point_in_polygon(pt(0.5, 1.5), &polygon));
    }

    #[rstest]
    fn empty_polygon_contains_nothing() {
        assert!(!point_in_polygon(pt(0.0, 0.0), &[]));
    }
}

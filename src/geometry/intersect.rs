//! Segment and polyline crossing tests.
//!
//! Coordinates are treated as planar (lat, lon) pairs. The test only reports
//! proper, transversal crossings: segments that are collinear, overlap, or merely
//! touch at an endpoint are reported as non-intersecting. This is not robust for
//! degenerate input and is not meant to be.

use crate::geometry::types::{Coordinate, Polyline};

/// Signed orientation of `r` relative to the directed line `p → q`.
fn orientation(p: Coordinate, q: Coordinate, r: Coordinate) -> f64 {
    (q.lon - p.lon) * (r.lat - q.lat) - (q.lat - p.lat) * (r.lon - q.lon)
}

/// True iff segment `a–b` properly crosses segment `c–d`.
pub fn segments_intersect(a: Coordinate, b: Coordinate, c: Coordinate, d: Coordinate) -> bool {
    let o1 = orientation(a, b, c);
    let o2 = orientation(a, b, d);
    let o3 = orientation(c, d, a);
    let o4 = orientation(c, d, b);

    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

/// True iff any consecutive segment of `polyline` properly crosses `a–b`.
pub fn polyline_intersects(polyline: &Polyline, a: Coordinate, b: Coordinate) -> bool {
    polyline
        .segments()
        .any(|(p, q)| segments_intersect(p, q, a, b))
}

//! Two-candidate detour synthesis around a hazard's bounding box.

use crate::geometry::types::{Coordinate, Polyline};

/// Waypoint clearance beyond the hazard box, in degrees of latitude.
pub const DETOUR_OFFSET_DEG: f64 = 0.0015;

/// The north and south candidate paths, in that order.
///
/// Both waypoints sit on the hazard box's horizontal midpoint, offset
/// `DETOUR_OFFSET_DEG` beyond its max (north) or min (south) latitude.
pub fn detour_candidates(
    origin: Coordinate,
    destination: Coordinate,
    hazard: &Polyline,
) -> [Polyline; 2] {
    let bbox = hazard.bounding_box();
    let mid_lon = bbox.mid_lon();

    let north = Coordinate::new(bbox.max_lat + DETOUR_OFFSET_DEG, mid_lon);
    let south = Coordinate::new(bbox.min_lat - DETOUR_OFFSET_DEG, mid_lon);

    [
        Polyline::via(origin, north, destination),
        Polyline::via(origin, south, destination),
    ]
}

/// Pick the shorter of the north/south detours. Equal lengths go north.
pub fn synthesize_detour(origin: Coordinate, destination: Coordinate, hazard: &Polyline) -> Polyline {
    let [north, south] = detour_candidates(origin, destination, hazard);
    if north.length() <= south.length() {
        north
    } else {
        south
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon)
    }

    #[test]
    fn test_detour_keeps_endpoints() {
        let origin = c(48.1935, -114.3128);
        let destination = c(48.1978, -114.3260);
        let hazard = Polyline::new(vec![c(48.1990, -114.3200), c(48.1920, -114.3190)]).unwrap();

        let path = synthesize_detour(origin, destination, &hazard);

        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), origin);
        assert_eq!(path.last(), destination);
    }

    #[test]
    fn test_detour_picks_shorter_side() {
        // Hazard sits mostly south of the travel line, so going north is shorter.
        let origin = c(0.0, 0.0);
        let destination = c(0.0, 1.0);
        let hazard = Polyline::new(vec![c(0.001, 0.5), c(-0.5, 0.5)]).unwrap();

        let [north, south] = detour_candidates(origin, destination, &hazard);
        let chosen = synthesize_detour(origin, destination, &hazard);

        assert!(north.length() < south.length());
        assert_eq!(chosen, north);
        assert!((chosen.points()[1].lat - (0.001 + DETOUR_OFFSET_DEG)).abs() < 1e-12);
        assert!(chosen.length() <= south.length());
    }

    #[test]
    fn test_detour_goes_south_when_shorter() {
        let origin = c(0.0, 0.0);
        let destination = c(0.0, 1.0);
        let hazard = Polyline::new(vec![c(0.5, 0.5), c(-0.001, 0.5)]).unwrap();

        let chosen = synthesize_detour(origin, destination, &hazard);

        assert!((chosen.points()[1].lat - (-0.001 - DETOUR_OFFSET_DEG)).abs() < 1e-12);
        assert_eq!(chosen.points()[1].lon, 0.5);
    }

    #[test]
    fn test_equal_lengths_prefer_north() {
        // Symmetric hazard around the travel line.
        let origin = c(0.0, 0.0);
        let destination = c(0.0, 2.0);
        let hazard = Polyline::new(vec![c(0.5, 1.0), c(-0.5, 1.0)]).unwrap();

        let [north, south] = detour_candidates(origin, destination, &hazard);
        assert_eq!(north.length(), south.length());

        let chosen = synthesize_detour(origin, destination, &hazard);
        assert_eq!(chosen, north);
        assert!(chosen.points()[1].lat > 0.0);
    }
}

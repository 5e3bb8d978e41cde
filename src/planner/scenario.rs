//! Canned Kalispell flash-flood scenario.
//!
//! Every location is geocoded live when possible and falls back to a fixed
//! coordinate otherwise, so the scenario always renders.

use crate::geometry::{Coordinate, Polyline};

pub const SCENARIO_NAME: &str = "Kalispell Flash Flood (geocoded)";
pub const SCENARIO_DESCRIPTION: &str = "5th Ave W flooded, avoid it to reach Flathead High School.";

pub const ORIGIN_ADDRESS: &str = "2150 U.S. 93 S, Kalispell, MT 59901";
pub const DESTINATION_ADDRESS: &str = "Flathead High School, 644 4th Ave W, Kalispell, MT 59901";
pub const FLOODED_STREET_ADDRESS: &str = "5th Ave W, Kalispell, MT";

pub const ORIGIN_FALLBACK: Coordinate = Coordinate::new(48.1935, -114.3128);
pub const DESTINATION_FALLBACK: Coordinate = Coordinate::new(48.1978, -114.3260);
pub const FLOODED_POINT_FALLBACK: Coordinate = Coordinate::new(48.1962, -114.3265);

/// Short diagonal through `point`, standing in for the flooded street's geometry.
pub fn flooded_segment(point: Coordinate) -> Polyline {
    let Coordinate { lat, lon } = point;
    Polyline::through(
        Coordinate::new(lat + 0.0012, lon - 0.0008),
        &[point],
        Coordinate::new(lat - 0.0012, lon + 0.0008),
    )
}

/// Two-waypoint path that swings east of the origin, then passes north of the flooded point.
pub fn safe_route(origin: Coordinate, flooded: Coordinate, destination: Coordinate) -> Polyline {
    Polyline::through(
        origin,
        &[
            Coordinate::new((origin.lat + flooded.lat) / 2.0, origin.lon + 0.004),
            Coordinate::new(flooded.lat + 0.0015, flooded.lon - 0.003),
        ],
        destination,
    )
}

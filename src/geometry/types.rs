//! Coordinate, polyline and bounding box value types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Meters per degree of latitude, used for flat-earth radius conversion.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Errors raised when constructing geometry from untrusted input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Latitude/longitude outside WGS84 range or not finite.
    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// A polyline needs at least two points.
    #[error("polyline needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a coordinate, rejecting non-finite or out-of-range values.
    pub fn validated(lat: f64, lon: f64) -> Result<Self, GeometryError> {
        let coord = Self { lat, lon };
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeometryError::InvalidCoordinate { lat, lon })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Point halfway between `self` and `other` in degree-space.
    pub fn midpoint(&self, other: &Coordinate) -> Coordinate {
        Coordinate::new((self.lat + other.lat) / 2.0, (self.lon + other.lon) / 2.0)
    }

    /// Euclidean distance in degree-space.
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        (other.lat - self.lat).hypot(other.lon - self.lon)
    }
}

/// Total degree-space length of a path.
pub fn path_length(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .map(|pair| pair[0].planar_distance(&pair[1]))
        .sum()
}

/// An ordered path of at least two coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct Polyline(Vec<Coordinate>);

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Result<Self, GeometryError> {
        if points.len() < 2 {
            return Err(GeometryError::TooFewPoints(points.len()));
        }
        Ok(Self(points))
    }

    /// The straight two-point path.
    pub fn direct(origin: Coordinate, destination: Coordinate) -> Self {
        Self(vec![origin, destination])
    }

    /// A three-point path through a single waypoint.
    pub fn via(origin: Coordinate, waypoint: Coordinate, destination: Coordinate) -> Self {
        Self(vec![origin, waypoint, destination])
    }

    /// `origin`, then each waypoint in order, then `destination`.
    pub fn through(origin: Coordinate, waypoints: &[Coordinate], destination: Coordinate) -> Self {
        let mut points = Vec::with_capacity(waypoints.len() + 2);
        points.push(origin);
        points.extend_from_slice(waypoints);
        points.push(destination);
        Self(points)
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed polyline.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Coordinate {
        self.0[0]
    }

    pub fn last(&self) -> Coordinate {
        self.0[self.0.len() - 1]
    }

    /// Consecutive point pairs in path order.
    pub fn segments(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.0.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn length(&self) -> f64 {
        path_length(&self.0)
    }

    /// Mean of all points.
    pub fn centroid(&self) -> Coordinate {
        let n = self.0.len() as f64;
        let (lat, lon) = self
            .0
            .iter()
            .fold((0.0, 0.0), |(lat, lon), p| (lat + p.lat, lon + p.lon));
        Coordinate::new(lat / n, lon / n)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::enclosing(&self.0)
    }
}

impl TryFrom<Vec<Coordinate>> for Polyline {
    type Error = GeometryError;

    fn try_from(points: Vec<Coordinate>) -> Result<Self, Self::Error> {
        Polyline::new(points)
    }
}

impl From<Polyline> for Vec<Coordinate> {
    fn from(line: Polyline) -> Self {
        line.0
    }
}

/// Axis-aligned latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Smallest box containing every point. `points` must be non-empty.
    pub fn enclosing(points: &[Coordinate]) -> Self {
        let mut bbox = BoundingBox {
            min_lat: f64::INFINITY,
            min_lon: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            max_lon: f64::NEG_INFINITY,
        };
        for p in points {
            bbox.min_lat = bbox.min_lat.min(p.lat);
            bbox.min_lon = bbox.min_lon.min(p.lon);
            bbox.max_lat = bbox.max_lat.max(p.lat);
            bbox.max_lon = bbox.max_lon.max(p.lon);
        }
        bbox
    }

    /// Square box of half-width `radius_m / 111320` degrees around `center`.
    ///
    /// Flat-earth approximation, only meaningful for small radii.
    pub fn around(center: Coordinate, radius_m: f64) -> Self {
        let delta = radius_m / METERS_PER_DEGREE;
        BoundingBox {
            min_lat: center.lat - delta,
            min_lon: center.lon - delta,
            max_lat: center.lat + delta,
            max_lon: center.lon + delta,
        }
    }

    pub fn mid_lon(&self) -> f64 {
        (self.min_lon + self.max_lon) / 2.0
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.lat)
            && (self.min_lon..=self.max_lon).contains(&point.lon)
    }
}

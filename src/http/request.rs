//! Request parameters and bodies.
//!
//! # Design Decisions
//! - Required query parameters are enforced by the extractor (400 when missing)
//! - Semantic checks (coordinate ranges, survivor counts) happen in the service

use serde::Deserialize;

use crate::geometry::Coordinate;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

#[derive(Debug, Deserialize)]
pub struct ComputeRouteQuery {
    pub start_lat: f64,
    pub start_lon: f64,
    pub dest_lat: f64,
    pub dest_lon: f64,
}

impl ComputeRouteQuery {
    pub fn origin(&self) -> Coordinate {
        Coordinate::new(self.start_lat, self.start_lon)
    }

    pub fn destination(&self) -> Coordinate {
        Coordinate::new(self.dest_lat, self.dest_lon)
    }
}

#[derive(Debug, Deserialize)]
pub struct AddressQuery {
    pub address: String,
}

#[derive(Debug, Deserialize)]
pub struct SafeZoneQuery {
    pub address: String,
    /// Search radius in meters.
    pub radius: Option<f64>,
}

fn default_survivors() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct SosRequest {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_survivors")]
    pub survivors: u32,
}

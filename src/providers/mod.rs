//! External provider subsystem.
//!
//! # Data Flow
//! ```text
//! resolver / planner
//!     → trait objects (Geocoder, FeatureSource, SafeZoneSource, RoutingProvider)
//!     → http.rs (shared reqwest client, user agent, deadline, metrics)
//!     → nominatim.rs | overpass.rs | osrm.rs
//!     → ProviderResult<T>
//! ```
//!
//! # Design Decisions
//! - Every call is bounded by a per-endpoint timeout
//! - Failures are returned as `ProviderError`; callers choose the fallback
//! - Adapters hold no state besides the HTTP client and never touch hazard state

pub mod http;
pub mod nominatim;
pub mod osrm;
pub mod overpass;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::geometry::{BoundingBox, Coordinate, Polyline};

pub use nominatim::NominatimClient;
pub use osrm::OsrmRouter;
pub use overpass::OverpassClient;
pub use types::{MapFeature, NamePattern, ProviderError, ProviderResult, HIGHWAY};

/// Free-text address → coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Best matches first. An empty list means "no match".
    async fn query(&self, text: &str) -> ProviderResult<Vec<Coordinate>>;
}

/// Named ways inside a bounding box.
#[async_trait]
pub trait FeatureSource: Send + Sync {
    async fn query(
        &self,
        bbox: &BoundingBox,
        pattern: &NamePattern,
        kind: &str,
    ) -> ProviderResult<Vec<MapFeature>>;
}

/// Candidate safe-zone locations near a point.
#[async_trait]
pub trait SafeZoneSource: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    async fn candidates(
        &self,
        center: Coordinate,
        radius_m: f64,
        amenity: &str,
    ) -> ProviderResult<Vec<Coordinate>>;
}

/// Turn-by-turn route between two points.
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    async fn route(&self, origin: Coordinate, destination: Coordinate) -> ProviderResult<Polyline>;
}

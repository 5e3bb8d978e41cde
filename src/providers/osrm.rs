//! OSRM turn-by-turn routing.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::ProvidersConfig;
use crate::geometry::{Coordinate, Polyline};
use crate::providers::http::HttpEndpoint;
use crate::providers::types::{ProviderError, ProviderResult};
use crate::providers::RoutingProvider;

#[derive(Debug, Deserialize)]
struct RouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    geometry: GeoJsonLine,
}

/// GeoJSON LineString; coordinates are `[lon, lat]`.
#[derive(Debug, Deserialize)]
struct GeoJsonLine {
    coordinates: Vec<[f64; 2]>,
}

fn decode_route(response: RouteResponse) -> ProviderResult<Polyline> {
    if response.code != "Ok" {
        return Err(ProviderError::Rejected(response.code));
    }
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Rejected("no routes".to_string()))?;

    let points = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| Coordinate::new(lat, lon))
        .collect();
    Polyline::new(points).map_err(|e| ProviderError::Decode(e.to_string()))
}

#[derive(Debug, Clone)]
pub struct OsrmRouter {
    endpoint: HttpEndpoint,
}

impl OsrmRouter {
    pub fn new(config: &ProvidersConfig) -> ProviderResult<Self> {
        Ok(Self {
            endpoint: HttpEndpoint::new("osrm", &config.routing, &config.user_agent)?,
        })
    }
}

#[async_trait]
impl RoutingProvider for OsrmRouter {
    async fn route(&self, origin: Coordinate, destination: Coordinate) -> ProviderResult<Polyline> {
        let path = format!(
            "/route/v1/driving/{},{};{},{}",
            origin.lon, origin.lat, destination.lon, destination.lat
        );
        let response: RouteResponse = self
            .endpoint
            .get_json(&path, &[("overview", "full"), ("geometries", "geojson")])
            .await?;
        decode_route(response)
    }
}

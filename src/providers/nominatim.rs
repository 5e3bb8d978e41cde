//! Nominatim geocoder and free-text safe-zone search.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::config::ProvidersConfig;
use crate::geometry::{BoundingBox, Coordinate};
use crate::providers::http::HttpEndpoint;
use crate::providers::types::{ProviderError, ProviderResult};
use crate::providers::{Geocoder, SafeZoneSource};

/// Results requested when searching for safe-zone amenities.
const SAFE_ZONE_SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(deserialize_with = "lenient_f64")]
    lat: f64,
    #[serde(deserialize_with = "lenient_f64")]
    lon: f64,
}

/// Nominatim encodes coordinates as strings; accept numbers too.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Num(f64),
        Str(String),
    }

    match NumOrStr::deserialize(deserializer)? {
        NumOrStr::Num(n) => Ok(n),
        NumOrStr::Str(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone)]
pub struct NominatimClient {
    endpoint: HttpEndpoint,
}

impl NominatimClient {
    pub fn new(config: &ProvidersConfig) -> ProviderResult<Self> {
        Ok(Self {
            endpoint: HttpEndpoint::new("nominatim", &config.geocoder, &config.user_agent)?,
        })
    }

    async fn search(&self, params: &[(&str, String)]) -> ProviderResult<Vec<Coordinate>> {
        let places: Vec<Place> = self.endpoint.get_json("/search", params).await?;
        places
            .into_iter()
            .map(|p| {
                Coordinate::validated(p.lat, p.lon).map_err(|e| ProviderError::Decode(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn query(&self, text: &str) -> ProviderResult<Vec<Coordinate>> {
        self.search(&[
            ("q", text.to_string()),
            ("format", "json".to_string()),
            ("limit", "1".to_string()),
        ])
        .await
    }
}

#[async_trait]
impl SafeZoneSource for NominatimClient {
    fn name(&self) -> &'static str {
        self.endpoint.label()
    }

    async fn candidates(
        &self,
        center: Coordinate,
        radius_m: f64,
        amenity: &str,
    ) -> ProviderResult<Vec<Coordinate>> {
        let bbox = BoundingBox::around(center, radius_m);
        let viewbox = format!("{},{},{},{}", bbox.min_lon, bbox.max_lat, bbox.max_lon, bbox.min_lat);
        self.search(&[
            ("q", amenity.to_string()),
            ("format", "json".to_string()),
            ("limit", SAFE_ZONE_SEARCH_LIMIT.to_string()),
            ("viewbox", viewbox),
            ("bounded", "1".to_string()),
        ])
        .await
    }
}

//! Overpass map-feature queries.
//!
//! # Responsibilities
//! - Build Overpass QL for named-way and amenity lookups
//! - Decode `out geom` / `out center` element lists
//!
//! # Design Decisions
//! - Name patterns are regex-escaped and matched case-insensitively
//! - Elements without usable geometry are skipped, not treated as errors

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use crate::config::ProvidersConfig;
use crate::geometry::{BoundingBox, Coordinate, Polyline};
use crate::providers::http::HttpEndpoint;
use crate::providers::types::{MapFeature, NamePattern, ProviderResult};
use crate::providers::{FeatureSource, SafeZoneSource};

/// Server-side query timeout embedded in each query, in seconds.
const QUERY_TIMEOUT_SECS: u32 = 25;

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
struct Element {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    tags: HashMap<String, String>,
    #[serde(default)]
    geometry: Vec<Option<LatLon>>,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<LatLon>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LatLon {
    lat: f64,
    lon: f64,
}

impl From<LatLon> for Coordinate {
    fn from(p: LatLon) -> Self {
        Coordinate::new(p.lat, p.lon)
    }
}

/// Escape characters that are special inside an Overpass regex string literal.
pub fn escape_regex(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(
            ch,
            '\\' | '"' | '^' | '$' | '.' | '|' | '?' | '*' | '+' | '(' | ')' | '[' | ']' | '{' | '}'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Overpass QL for ways of `kind` inside `bbox` filtered by `pattern`.
pub fn way_query(bbox: &BoundingBox, pattern: &NamePattern, kind: &str) -> String {
    let name_filter = match pattern {
        NamePattern::Exact(name) => format!(r#"["name"~"^{}$", i]"#, escape_regex(name)),
        NamePattern::Contains(name) => format!(r#"["name"~"{}", i]"#, escape_regex(name)),
        NamePattern::AnyNamed => r#"["name"]"#.to_string(),
    };
    format!(
        "[out:json][timeout:{}];\nway({},{},{},{})[\"{}\"]{};\nout geom;",
        QUERY_TIMEOUT_SECS, bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon, kind, name_filter
    )
}

/// Overpass QL for nodes, ways and relations tagged `amenity` around a point.
pub fn amenity_query(center: Coordinate, radius_m: f64, amenity: &str) -> String {
    let around = format!("around:{},{},{}", radius_m, center.lat, center.lon);
    let tag = format!(r#"["amenity"="{}"]"#, amenity.replace('"', "\\\""));
    format!(
        "[out:json][timeout:{}];\n(\n  node({around}){tag};\n  way({around}){tag};\n  relation({around}){tag};\n);\nout center;",
        QUERY_TIMEOUT_SECS
    )
}

fn decode_ways(response: OverpassResponse) -> Vec<MapFeature> {
    response
        .elements
        .into_iter()
        .filter(|el| el.kind == "way")
        .filter_map(|el| {
            let points: Vec<Coordinate> = el.geometry.into_iter().flatten().map(Into::into).collect();
            let geometry = Polyline::new(points).ok()?;
            let name = el.tags.get("name").cloned().unwrap_or_default();
            Some(MapFeature { name, geometry })
        })
        .collect()
}

fn decode_points(response: OverpassResponse) -> Vec<Coordinate> {
    response
        .elements
        .into_iter()
        .filter_map(|el| match (el.kind.as_str(), el.lat, el.lon) {
            ("node", Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => el.center.map(Into::into),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    endpoint: HttpEndpoint,
}

impl OverpassClient {
    pub fn new(config: &ProvidersConfig) -> ProviderResult<Self> {
        Ok(Self {
            endpoint: HttpEndpoint::new("overpass", &config.overpass, &config.user_agent)?,
        })
    }

    async fn run(&self, query: String) -> ProviderResult<OverpassResponse> {
        tracing::trace!(query = %query, "Overpass query");
        self.endpoint
            .post_form_json("/api/interpreter", &[("data", query)])
            .await
    }
}

#[async_trait]
impl FeatureSource for OverpassClient {
    async fn query(
        &self,
        bbox: &BoundingBox,
        pattern: &NamePattern,
        kind: &str,
    ) -> ProviderResult<Vec<MapFeature>> {
        let response = self.run(way_query(bbox, pattern, kind)).await?;
        Ok(decode_ways(response))
    }
}

#[async_trait]
impl SafeZoneSource for OverpassClient {
    fn name(&self) -> &'static str {
        self.endpoint.label()
    }

    async fn candidates(
        &self,
        center: Coordinate,
        radius_m: f64,
        amenity: &str,
    ) -> ProviderResult<Vec<Coordinate>> {
        let response = self.run(amenity_query(center, radius_m, amenity)).await?;
        Ok(decode_points(response))
    }
}

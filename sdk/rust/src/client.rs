use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct HazardSummary {
    pub flood_zones: usize,
    pub closed_roads: usize,
    pub power_outages: usize,
    pub active_beacons: usize,
    pub version: u64,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    pub version: String,
    pub hazards: HazardSummary,
}

#[derive(Debug, Deserialize)]
pub struct Route {
    pub path: Vec<Coordinate>,
    pub hazards: Vec<String>,
    pub hazard_version: u64,
    pub detoured: bool,
}

#[derive(Debug, Deserialize)]
pub struct HazardFeature {
    pub name: String,
    pub geometry: Vec<Coordinate>,
    pub tag: String,
}

#[derive(Debug, Deserialize)]
pub struct SafeZonePlan {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub hazard_features: Vec<HazardFeature>,
    pub route_path: Vec<Coordinate>,
    pub hazard_version: u64,
}

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub flooded_street: Vec<Coordinate>,
    pub safe_route: Vec<Coordinate>,
    pub blocked_roads: Vec<String>,
    pub hazard_version: u64,
}

#[derive(Debug, Serialize)]
pub struct SosRequest {
    pub lat: f64,
    pub lon: f64,
    pub message: String,
    pub survivors: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Beacon {
    pub id: String,
    pub location: Coordinate,
    pub message: String,
    pub survivors: u32,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct SosCreated {
    pub beacon: Beacon,
    pub persisted: bool,
}

#[derive(Debug, Deserialize)]
struct SosList {
    sos: Vec<Beacon>,
}

pub struct SafeRouteClient {
    client: Client,
    base_url: String,
}

impl SafeRouteClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn status(&self) -> Result<Status, Box<dyn std::error::Error>> {
        let resp = self.client.get(format!("{}/status", self.base_url)).send().await?;
        decode(resp).await
    }

    /// Plan a hazard-aware route between two points.
    pub async fn plan_route(&self, origin: Coordinate, destination: Coordinate) -> Result<Route, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/compute_route", self.base_url))
            .query(&[
                ("start_lat", origin.lat),
                ("start_lon", origin.lon),
                ("dest_lat", destination.lat),
                ("dest_lon", destination.lon),
            ])
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn route_from_address(&self, address: &str) -> Result<Route, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .get(format!("{}/route", self.base_url))
            .query(&[("address", address)])
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn find_safe_zone(&self, address: &str, radius: Option<f64>) -> Result<SafeZonePlan, Box<dyn std::error::Error>> {
        let mut req = self
            .client
            .get(format!("{}/find_safe_zone", self.base_url))
            .query(&[("address", address)]);
        if let Some(radius) = radius {
            req = req.query(&[("radius", radius)]);
        }
        decode(req.send().await?).await
    }

    /// Submit an SOS beacon.
    pub async fn scenario(&self) -> Result<Scenario, Box<dyn std::error::Error>> {
        let resp = self.client.get(format!("{}/scenario", self.base_url)).send().await?;
        decode(resp).await
    }

    pub async fn submit_sos(&self, req: SosRequest) -> Result<SosCreated, Box<dyn std::error::Error>> {
        let resp = self
            .client
            .post(format!("{}/sos", self.base_url))
            .json(&req)
            .send()
            .await?;
        decode(resp).await
    }

    /// Persisted beacons, newest first.
    pub async fn list_sos(&self) -> Result<Vec<Beacon>, Box<dyn std::error::Error>> {
        let resp = self.client.get(format!("{}/sos", self.base_url)).send().await?;
        let list: SosList = decode(resp).await?;
        Ok(list.sos)
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, Box<dyn std::error::Error>> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(format!("SafeRoute returned error status {}: {}", status.as_u16(), text).into());
    }

    Ok(serde_json::from_str::<T>(&text)?)
}

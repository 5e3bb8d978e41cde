//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::geometry::Coordinate;
use crate::hazard::HazardCategory;

/// Root configuration for SafeRoute.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SafeRouteConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration for inbound requests.
    pub timeouts: TimeoutConfig,

    /// External provider endpoints.
    pub providers: ProvidersConfig,

    /// Hazard seed state and toggler settings.
    pub hazards: HazardConfig,

    /// Route planner settings.
    pub planner: PlannerConfig,

    /// Beacon persistence settings.
    pub beacons: BeaconConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for one API request, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// A single external HTTP provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Base URL, without trailing path.
    pub base_url: String,

    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

/// External provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// User-Agent sent to every provider.
    pub user_agent: String,

    /// Nominatim-compatible geocoder.
    pub geocoder: EndpointConfig,

    /// Overpass-compatible map-feature service.
    pub overpass: EndpointConfig,

    /// OSRM-compatible turn-by-turn router.
    pub routing: EndpointConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("SafeRoute/{}", env!("CARGO_PKG_VERSION")),
            geocoder: EndpointConfig {
                base_url: "https://nominatim.openstreetmap.org".to_string(),
                timeout_secs: 5,
            },
            overpass: EndpointConfig {
                base_url: "https://overpass-api.de".to_string(),
                timeout_secs: 15,
            },
            routing: EndpointConfig {
                base_url: "https://router.project-osrm.org".to_string(),
                timeout_secs: 10,
            },
        }
    }
}

/// Hazard store seed and toggler configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HazardConfig {
    /// Seconds between toggler ticks.
    pub toggle_interval_secs: u64,

    /// Category of the toggled member.
    pub toggled_category: HazardCategory,

    /// Name of the toggled member.
    pub toggled_member: String,

    pub flood_zones: Vec<String>,
    pub closed_roads: Vec<String>,
    pub power_outages: Vec<String>,
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            toggle_interval_secs: 10,
            toggled_category: HazardCategory::FloodZone,
            toggled_member: "Downtown Riverfront".to_string(),
            flood_zones: vec!["Downtown Riverfront".to_string(), "Harbor District".to_string()],
            closed_roads: vec![
                "Main St".to_string(),
                "Bridge Ave".to_string(),
                "Riverside Blvd".to_string(),
            ],
            power_outages: vec!["Industrial Park".to_string(), "West Valley".to_string()],
        }
    }
}

/// Route planner configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Name of the way known to be at risk, checked against direct routes.
    pub at_risk_way: String,

    /// Search radius around the route midpoint for the at-risk way, in meters.
    pub feature_radius_m: f64,

    /// Default safe-zone search radius, in meters.
    pub safe_zone_radius_m: f64,

    /// Radius for the hazard overlay in safe-zone plans, in meters (~3 miles).
    pub hazard_radius_m: f64,

    /// OSM amenity value treated as a safe zone.
    pub safe_zone_amenity: String,

    /// Destination for address routes when no safe zone can be located
    /// (Flathead High School by default).
    pub fallback_shelter: Coordinate,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            at_risk_way: "5th Ave W".to_string(),
            feature_radius_m: 2000.0,
            safe_zone_radius_m: 3000.0,
            hazard_radius_m: 4828.0,
            safe_zone_amenity: "school".to_string(),
            fallback_shelter: Coordinate::new(48.1978, -114.3260),
        }
    }
}

/// Beacon persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BeaconConfig {
    /// JSON-lines log file. In-memory only when unset.
    pub log_path: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

//! Startup orchestration.
//!
//! # Responsibilities
//! - Seed and initialize the hazard store from configuration
//! - Build provider clients, resolvers, the planner and the beacon log
//! - Build the hazard toggler for the caller to spawn
//!
//! # Design Decisions
//! - Fail fast: any construction error aborts startup
//! - The store is initialized before anything can mutate it

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::beacon::{BeaconLog, JsonlBeaconLog, MemoryBeaconLog};
use crate::config::{HazardConfig, SafeRouteConfig};
use crate::hazard::{HazardCategory, HazardError, HazardMap, HazardStore, HazardToggler};
use crate::planner::{PlannerProviders, RoutePlanner};
use crate::providers::{NominatimClient, OsrmRouter, OverpassClient, ProviderError, SafeZoneSource};
use crate::service::SafeRouteService;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build provider client: {0}")]
    Provider(#[from] ProviderError),

    #[error("invalid hazard toggler: {0}")]
    Toggler(#[from] HazardError),
}

/// The configured seed members.
pub fn seed_hazards(config: &HazardConfig) -> HazardMap {
    let seed = [
        (HazardCategory::FloodZone, &config.flood_zones),
        (HazardCategory::ClosedRoad, &config.closed_roads),
        (HazardCategory::PowerOutage, &config.power_outages),
    ];
    HazardMap::seeded(
        seed.into_iter()
            .flat_map(|(category, names)| names.iter().map(move |name| (category, name.clone()))),
    )
}

/// Wire the full service from validated configuration.
pub fn build_service(config: &SafeRouteConfig) -> Result<SafeRouteService, StartupError> {
    let store = Arc::new(HazardStore::uninitialized());
    store.initialize(seed_hazards(&config.hazards));

    let nominatim = Arc::new(NominatimClient::new(&config.providers)?);
    let overpass = Arc::new(OverpassClient::new(&config.providers)?);
    let router = Arc::new(OsrmRouter::new(&config.providers)?);

    let safe_zones: Vec<Arc<dyn SafeZoneSource>> = vec![overpass.clone(), nominatim.clone()];
    let providers = PlannerProviders {
        geocoder: nominatim,
        features: overpass,
        safe_zones,
        router,
    };
    let planner = RoutePlanner::new(store.clone(), providers, config.planner.clone());

    let beacons: Arc<dyn BeaconLog> = match &config.beacons.log_path {
        Some(path) => {
            tracing::info!(path = %path, "Persisting beacons to JSON-lines log");
            Arc::new(JsonlBeaconLog::new(path))
        }
        None => {
            tracing::warn!("No beacon log configured, beacons are kept in memory only");
            Arc::new(MemoryBeaconLog::new())
        }
    };

    let summary = store.read().summary();
    tracing::info!(
        flood_zones = summary.flood_zones,
        closed_roads = summary.closed_roads,
        power_outages = summary.power_outages,
        "Hazard state seeded"
    );

    Ok(SafeRouteService::new(store, planner, beacons))
}

/// Toggler for the configured member, ready to spawn.
pub fn build_toggler(config: &HazardConfig, store: Arc<HazardStore>) -> Result<HazardToggler, StartupError> {
    Ok(HazardToggler::new(
        store,
        config.toggled_category,
        config.toggled_member.clone(),
        Duration::from_secs(config.toggle_interval_secs),
    )?)
}

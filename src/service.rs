//! The SafeRoute service facade.
//!
//! Owns the hazard store, the route planner and the beacon log, and exposes
//! the caller-facing operations. Input validation happens here, so everything
//! below can assume well-formed coordinates.

use std::sync::Arc;

use crate::beacon::{BeaconLog, BeaconLogError};
use crate::error::{SafeRouteError, SafeRouteResult};
use crate::geometry::Coordinate;
use crate::hazard::{Beacon, HazardStore, HazardSummary};
use crate::observability::metrics;
use crate::planner::{PlannedRoute, RoutePlanner, SafeZonePlan, Scenario};

/// A created beacon and the outcome of its first persistence attempt.
///
/// The beacon exists (and is active in the hazard state) even when
/// `persisted` is an error; callers may retry with [`SafeRouteService::persist_beacon`].
#[derive(Debug)]
pub struct SubmittedBeacon {
    pub beacon: Beacon,
    pub persisted: Result<(), BeaconLogError>,
}

pub struct SafeRouteService {
    store: Arc<HazardStore>,
    planner: RoutePlanner,
    beacons: Arc<dyn BeaconLog>,
}

fn validate_coordinate(field: &str, point: Coordinate) -> SafeRouteResult<Coordinate> {
    if point.is_valid() {
        Ok(point)
    } else {
        Err(SafeRouteError::InvalidInput(format!(
            "{field} ({}, {}) is not a valid coordinate",
            point.lat, point.lon
        )))
    }
}

impl SafeRouteService {
    pub fn new(store: Arc<HazardStore>, planner: RoutePlanner, beacons: Arc<dyn BeaconLog>) -> Self {
        Self {
            store,
            planner,
            beacons,
        }
    }

    pub fn store(&self) -> &Arc<HazardStore> {
        &self.store
    }

    pub fn planner(&self) -> &RoutePlanner {
        &self.planner
    }

    pub async fn plan_route(&self, origin: Coordinate, destination: Coordinate) -> SafeRouteResult<PlannedRoute> {
        let origin = validate_coordinate("origin", origin)?;
        let destination = validate_coordinate("destination", destination)?;
        Ok(self.planner.plan_route(origin, destination).await)
    }

    pub async fn plan_route_by_address(&self, address: &str) -> SafeRouteResult<PlannedRoute> {
        self.planner.plan_route_by_address(address).await
    }

    /// `radius_m` defaults to the configured safe-zone radius.
    pub async fn find_safe_zone(&self, address: &str, radius_m: Option<f64>) -> SafeRouteResult<SafeZonePlan> {
        let radius_m = radius_m.unwrap_or(self.planner.config().safe_zone_radius_m);
        self.planner.find_safe_zone(address, radius_m).await
    }

    pub async fn scenario(&self) -> Scenario {
        self.planner.scenario().await
    }

    pub fn current_hazard_summary(&self) -> HazardSummary {
        self.store.read().summary()
    }

    /// Create a beacon, mark it active, then try to persist it once.
    pub async fn submit_beacon(
        &self,
        location: Coordinate,
        message: impl Into<String>,
        survivors: u32,
    ) -> SafeRouteResult<SubmittedBeacon> {
        let location = validate_coordinate("location", location)?;
        if survivors == 0 {
            return Err(SafeRouteError::InvalidInput("survivors must be at least 1".to_string()));
        }

        let beacon = Beacon::new(location, message, survivors);
        match self.store.mutate(|map| map.push_beacon(beacon.clone())) {
            Ok(((), version)) => tracing::debug!(beacon_id = %beacon.id, version, "Beacon marked active"),
            Err(e) => tracing::warn!(beacon_id = %beacon.id, error = %e, "Beacon not added to hazard state"),
        }

        let persisted = self.beacons.append(&beacon).await;
        metrics::record_beacon(persisted.is_ok());
        match &persisted {
            Ok(()) => tracing::info!(
                beacon_id = %beacon.id,
                lat = beacon.location.lat,
                lon = beacon.location.lon,
                survivors = beacon.survivors,
                "Beacon submitted"
            ),
            Err(e) => tracing::error!(beacon_id = %beacon.id, error = %e, "Beacon persistence failed"),
        }

        Ok(SubmittedBeacon { beacon, persisted })
    }

    /// Retry persistence for a beacon whose first append failed.
    pub async fn persist_beacon(&self, beacon: &Beacon) -> SafeRouteResult<()> {
        self.beacons.append(beacon).await?;
        metrics::record_beacon(true);
        Ok(())
    }

    /// Persisted beacons, newest first.
    pub async fn list_beacons(&self) -> SafeRouteResult<Vec<Beacon>> {
        Ok(self.beacons.list_all().await?)
    }
}

//! Hazard-aware route planning.

use std::sync::{Arc, Mutex, PoisonError};

use crate::config::PlannerConfig;
use crate::error::{SafeRouteError, SafeRouteResult};
use crate::geometry::{polyline_intersects, synthesize_detour, BoundingBox, Coordinate, Polyline};
use crate::hazard::{HazardCategory, HazardStore};
use crate::observability::metrics;
use crate::planner::overlay::{sample_hazards, simulated_hazards};
use crate::planner::scenario;
use crate::planner::types::{HazardFeature, PlannedRoute, SafeZonePlan, Scenario};
use crate::providers::{FeatureSource, Geocoder, NamePattern, RoutingProvider, SafeZoneSource, HIGHWAY};
use crate::resolver::{HazardFeatureResolver, LocalityResolver, SafeZoneLocator};

/// External collaborators used by the planner.
pub struct PlannerProviders {
    pub geocoder: Arc<dyn Geocoder>,
    pub features: Arc<dyn FeatureSource>,
    /// Consulted in order; the first one that answers wins.
    pub safe_zones: Vec<Arc<dyn SafeZoneSource>>,
    pub router: Arc<dyn RoutingProvider>,
}

pub struct RoutePlanner {
    store: Arc<HazardStore>,
    locality: LocalityResolver,
    feature_resolver: HazardFeatureResolver,
    features: Arc<dyn FeatureSource>,
    safe_zones: SafeZoneLocator,
    router: Arc<dyn RoutingProvider>,
    config: PlannerConfig,
    rng: Mutex<fastrand::Rng>,
}

impl RoutePlanner {
    pub fn new(store: Arc<HazardStore>, providers: PlannerProviders, config: PlannerConfig) -> Self {
        Self {
            store,
            locality: LocalityResolver::new(providers.geocoder),
            feature_resolver: HazardFeatureResolver::new(providers.features.clone()),
            features: providers.features,
            safe_zones: SafeZoneLocator::new(providers.safe_zones, config.safe_zone_amenity.clone()),
            router: providers.router,
            config,
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Fix the overlay RNG seed so safe-zone plans are reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
            ..self
        }
    }

    pub fn locality(&self) -> &LocalityResolver {
        &self.locality
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Direct route, bent around the at-risk way when it crosses the direct segment.
    ///
    /// Never fails: a failed feature lookup yields the direct path.
    pub async fn plan_route(&self, origin: Coordinate, destination: Coordinate) -> PlannedRoute {
        let midpoint = origin.midpoint(&destination);
        let hazard = self
            .feature_resolver
            .resolve_feature(&self.config.at_risk_way, midpoint, self.config.feature_radius_m)
            .await;

        let (path, detoured) = match hazard {
            Ok(geometry) if polyline_intersects(&geometry, origin, destination) => {
                tracing::info!(way = %self.config.at_risk_way, "Direct route crosses at-risk way, detouring");
                (synthesize_detour(origin, destination, &geometry), true)
            }
            Ok(_) => (Polyline::direct(origin, destination), false),
            Err(e) => {
                tracing::debug!(way = %self.config.at_risk_way, error = %e, "At-risk way unavailable, using direct route");
                (Polyline::direct(origin, destination), false)
            }
        };
        metrics::record_route(if detoured { "detour" } else { "direct" });

        let snapshot = self.store.read();
        PlannedRoute {
            path,
            hazards: snapshot.map.members(HazardCategory::FloodZone),
            hazard_version: snapshot.version,
            detoured,
        }
    }

    /// Route from a geocoded address to the nearest safe zone, or to the
    /// fallback shelter when none can be located.
    ///
    /// The only lookup failure surfaced is an unresolvable address.
    pub async fn plan_route_by_address(&self, address: &str) -> SafeRouteResult<PlannedRoute> {
        let origin = self.origin_for(address).await?;
        let destination = match self.safe_zones.nearest(origin, self.config.safe_zone_radius_m).await {
            Ok(zone) => zone,
            Err(e) => {
                let shelter = self.config.fallback_shelter;
                tracing::warn!(error = %e, lat = shelter.lat, lon = shelter.lon, "No safe zone located, using fallback shelter");
                shelter
            }
        };
        let path = self.street_route(origin, destination).await;

        let snapshot = self.store.read();
        Ok(PlannedRoute {
            path,
            hazards: snapshot.map.members(HazardCategory::FloodZone),
            hazard_version: snapshot.version,
            detoured: false,
        })
    }

    /// Nearest safe zone within `radius_m` of `address`, with a hazard overlay
    /// of nearby streets and a street-level route to it.
    pub async fn find_safe_zone(&self, address: &str, radius_m: f64) -> SafeRouteResult<SafeZonePlan> {
        if !(radius_m.is_finite() && radius_m > 0.0) {
            return Err(SafeRouteError::InvalidInput(format!("radius must be positive, got {radius_m}")));
        }
        let origin = self.origin_for(address).await?;
        let destination = self.safe_zones.nearest(origin, radius_m).await?;

        let (hazard_features, route_path) = tokio::join!(
            self.hazard_overlay(origin),
            self.street_route(origin, destination)
        );

        Ok(SafeZonePlan {
            origin,
            destination,
            hazard_features,
            route_path,
            hazard_version: self.store.version(),
        })
    }

    /// The canned Kalispell flood scenario, geocoded where possible.
    ///
    /// Never fails: each address falls back to a fixed coordinate and the
    /// flooded street to a short segment through the flooded point.
    pub async fn scenario(&self) -> Scenario {
        let located = move |address: &'static str, fallback: Coordinate| async move {
            match self.locality.resolve(address).await {
                Ok(point) => point,
                Err(e) => {
                    tracing::debug!(address, error = %e, "Scenario address not geocoded, using fixed coordinate");
                    fallback
                }
            }
        };
        let (origin, destination, flooded) = tokio::join!(
            located(scenario::ORIGIN_ADDRESS, scenario::ORIGIN_FALLBACK),
            located(scenario::DESTINATION_ADDRESS, scenario::DESTINATION_FALLBACK),
            located(scenario::FLOODED_STREET_ADDRESS, scenario::FLOODED_POINT_FALLBACK),
        );

        let flooded_street = match self
            .feature_resolver
            .resolve_feature(&self.config.at_risk_way, flooded, self.config.feature_radius_m)
            .await
        {
            Ok(geometry) => geometry,
            Err(e) => {
                tracing::debug!(way = %self.config.at_risk_way, error = %e, "Flooded way unavailable, using canned segment");
                scenario::flooded_segment(flooded)
            }
        };

        Scenario {
            name: scenario::SCENARIO_NAME.to_string(),
            description: scenario::SCENARIO_DESCRIPTION.to_string(),
            origin,
            destination,
            flooded_street,
            safe_route: scenario::safe_route(origin, flooded, destination),
            blocked_roads: vec![self.config.at_risk_way.clone()],
            hazard_version: self.store.version(),
        }
    }

    async fn origin_for(&self, address: &str) -> SafeRouteResult<Coordinate> {
        let address = address.trim();
        if address.is_empty() {
            return Err(SafeRouteError::InvalidInput("address must not be empty".to_string()));
        }
        self.locality
            .resolve(address)
            .await
            .map_err(|_| SafeRouteError::AddressNotFound(address.to_string()))
    }

    async fn street_route(&self, origin: Coordinate, destination: Coordinate) -> Polyline {
        match self.router.route(origin, destination).await {
            Ok(path) => {
                metrics::record_route("provider");
                path
            }
            Err(e) => {
                tracing::warn!(error = %e, "Routing provider failed, using direct path");
                metrics::record_route("direct");
                Polyline::direct(origin, destination)
            }
        }
    }

    async fn hazard_overlay(&self, origin: Coordinate) -> Vec<HazardFeature> {
        let bbox = BoundingBox::around(origin, self.config.hazard_radius_m);
        match self.features.query(&bbox, &NamePattern::AnyNamed, HIGHWAY).await {
            Ok(streets) => {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                sample_hazards(&mut rng, streets)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Street query failed, using simulated hazards");
                simulated_hazards(origin)
            }
        }
    }
}

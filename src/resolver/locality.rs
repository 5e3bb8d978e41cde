//! Address → coordinate resolution with a process-lifetime cache.

use dashmap::DashMap;
use std::sync::Arc;

use crate::error::{SafeRouteError, SafeRouteResult};
use crate::geometry::Coordinate;
use crate::observability::metrics;
use crate::providers::Geocoder;

/// Memoizing front for a single geocoding provider.
///
/// Successful lookups are cached for the process lifetime under their exact
/// address string. Failures are never cached. Concurrent misses on the same key
/// may both query the provider; the last write wins.
#[derive(Clone)]
pub struct LocalityResolver {
    geocoder: Arc<dyn Geocoder>,
    cache: Arc<DashMap<String, Coordinate>>,
}

impl LocalityResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Resolve `address`. Timeouts, provider errors and empty answers all
    /// come back as `NotFound`.
    pub async fn resolve(&self, address: &str) -> SafeRouteResult<Coordinate> {
        if let Some(hit) = self.cached(address) {
            metrics::record_cache_lookup(true);
            tracing::debug!(address = %address, "Geocode cache hit");
            return Ok(hit);
        }
        metrics::record_cache_lookup(false);

        let first = match self.geocoder.query(address).await {
            Ok(results) => results.into_iter().next(),
            Err(e) => {
                tracing::warn!(address = %address, error = %e, "Geocoding failed");
                return Err(SafeRouteError::NotFound(address.to_string()));
            }
        };

        match first {
            Some(coord) => {
                self.cache.insert(address.to_string(), coord);
                tracing::debug!(address = %address, lat = coord.lat, lon = coord.lon, "Geocoded address");
                Ok(coord)
            }
            None => {
                tracing::info!(address = %address, "Geocoder returned no results");
                Err(SafeRouteError::NotFound(address.to_string()))
            }
        }
    }

    pub fn cached(&self, address: &str) -> Option<Coordinate> {
        self.cache.get(address).map(|r| *r.value())
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

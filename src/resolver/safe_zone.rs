//! Nearest safe zone through an ordered chain of sources.

use std::sync::Arc;

use crate::error::{SafeRouteError, SafeRouteResult};
use crate::geometry::Coordinate;
use crate::providers::{ProviderError, SafeZoneSource};

pub struct SafeZoneLocator {
    sources: Vec<Arc<dyn SafeZoneSource>>,
    amenity: String,
}

impl SafeZoneLocator {
    /// Sources are consulted in the order given.
    pub fn new(sources: Vec<Arc<dyn SafeZoneSource>>, amenity: impl Into<String>) -> Self {
        Self {
            sources,
            amenity: amenity.into(),
        }
    }

    /// Nearest candidate to `center` from the first source that answers.
    ///
    /// An `Ok` answer ends the chain even when it is empty. Only errors fall
    /// through to the next source.
    pub async fn nearest(&self, center: Coordinate, radius_m: f64) -> SafeRouteResult<Coordinate> {
        let mut last_error = None;

        for source in &self.sources {
            match source.candidates(center, radius_m, &self.amenity).await {
                Ok(candidates) => {
                    tracing::debug!(
                        source = source.name(),
                        candidates = candidates.len(),
                        "Safe-zone source answered"
                    );
                    return candidates
                        .into_iter()
                        .min_by(|a, b| {
                            a.planar_distance(&center)
                                .total_cmp(&b.planar_distance(&center))
                        })
                        .ok_or_else(|| {
                            SafeRouteError::NotFound(format!("{} near {:?}", self.amenity, center))
                        });
                }
                Err(e) => {
                    tracing::warn!(source = source.name(), error = %e, "Safe-zone source failed");
                    last_error = Some(e);
                }
            }
        }

        Err(SafeRouteError::ProviderUnavailable(last_error.unwrap_or_else(|| {
            ProviderError::Rejected("no safe-zone sources configured".to_string())
        })))
    }
}

//! Named hazard feature → geometry.

use futures_util::future::join_all;
use std::sync::Arc;

use crate::error::{SafeRouteError, SafeRouteResult};
use crate::geometry::{BoundingBox, Coordinate, Polyline};
use crate::providers::{FeatureSource, MapFeature, NamePattern, HIGHWAY};

/// Name patterns tried for `name`, most specific first, duplicates collapsed.
pub fn name_patterns(name: &str) -> Vec<NamePattern> {
    let name = name.trim();
    let mut patterns = vec![
        NamePattern::Exact(name.to_string()),
        NamePattern::Contains(name.to_string()),
    ];
    if let Some(token) = name.split_whitespace().next() {
        let by_token = NamePattern::Contains(token.to_string());
        if !patterns.contains(&by_token) {
            patterns.push(by_token);
        }
    }
    patterns
}

/// Candidate whose centroid is closest to `reference`; earlier candidates win ties.
pub fn nearest_feature(candidates: Vec<MapFeature>, reference: Coordinate) -> Option<MapFeature> {
    let mut best: Option<(f64, MapFeature)> = None;
    for candidate in candidates {
        let distance = candidate.geometry.centroid().planar_distance(&reference);
        match &best {
            Some((best_distance, _)) if distance >= *best_distance => {}
            _ => best = Some((distance, candidate)),
        }
    }
    best.map(|(_, feature)| feature)
}

/// Looks up a named way near a reference point through the feature service.
#[derive(Clone)]
pub struct HazardFeatureResolver {
    source: Arc<dyn FeatureSource>,
}

impl HazardFeatureResolver {
    pub fn new(source: Arc<dyn FeatureSource>) -> Self {
        Self { source }
    }

    /// Resolve `name` to the geometry of the matching way nearest `reference`.
    ///
    /// All pattern queries are issued together and their results pooled.
    /// A failing query contributes nothing; `NotFound` only when the pool is empty.
    pub async fn resolve_feature(
        &self,
        name: &str,
        reference: Coordinate,
        radius_m: f64,
    ) -> SafeRouteResult<Polyline> {
        let bbox = BoundingBox::around(reference, radius_m);
        let patterns = name_patterns(name);

        let answers = join_all(
            patterns
                .iter()
                .map(|pattern| self.source.query(&bbox, pattern, HIGHWAY)),
        )
        .await;

        let mut candidates = Vec::new();
        for (pattern, answer) in patterns.iter().zip(answers) {
            match answer {
                Ok(features) => candidates.extend(features),
                Err(e) => {
                    tracing::warn!(feature = %name, pattern = ?pattern, error = %e, "Feature query failed")
                }
            }
        }

        let count = candidates.len();
        match nearest_feature(candidates, reference) {
            Some(feature) => {
                tracing::debug!(feature = %name, candidates = count, matched = %feature.name, "Resolved hazard feature");
                Ok(feature.geometry)
            }
            None => Err(SafeRouteError::NotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::{feature, FakeFeatureSource};

    const REFERENCE: Coordinate = Coordinate::new(48.19565, -114.3194);

    #[test]
    fn test_name_patterns_collapse_duplicates() {
        assert_eq!(
            name_patterns("5th Ave W"),
            vec![
                NamePattern::Exact("5th Ave W".into()),
                NamePattern::Contains("5th Ave W".into()),
                NamePattern::Contains("5th".into()),
            ]
        );
        assert_eq!(
            name_patterns("Main"),
            vec![NamePattern::Exact("Main".into()), NamePattern::Contains("Main".into())]
        );
    }

    #[test]
    fn test_nearest_prefers_first_on_tie() {
        let a = feature("A", &[(1.0, 0.0), (1.0, 2.0)]);
        let b = feature("B", &[(-1.0, 0.0), (-1.0, 2.0)]);
        let chosen = nearest_feature(vec![a, b], Coordinate::new(0.0, 1.0)).unwrap();
        assert_eq!(chosen.name, "A");
        assert!(nearest_feature(vec![], Coordinate::new(0.0, 0.0)).is_none());
    }

    #[tokio::test]
    async fn test_picks_nearest_across_all_queries() {
        let far = feature("5th Ave W", &[(48.30, -114.40), (48.31, -114.41)]);
        let near = feature("5th Avenue West", &[(48.1960, -114.3200), (48.1953, -114.3188)]);
        let source = Arc::new(
            FakeFeatureSource::new(Ok(vec![]))
                .with(NamePattern::Exact("5th Ave W".into()), Ok(vec![far]))
                .with(NamePattern::Contains("5th".into()), Ok(vec![near.clone()])),
        );
        let resolver = HazardFeatureResolver::new(source.clone());

        let geometry = resolver.resolve_feature("5th Ave W", REFERENCE, 2000.0).await.unwrap();
        assert_eq!(geometry, near.geometry);

        let seen = source.seen();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|(bbox, _, kind)| kind == HIGHWAY && bbox.contains(&REFERENCE)));
        let expected = BoundingBox::around(REFERENCE, 2000.0);
        assert_eq!(seen[0].0, expected);
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        let only = feature("5th Ave W", &[(48.19, -114.32), (48.20, -114.32)]);
        let source = Arc::new(
            FakeFeatureSource::failing()
                .with(NamePattern::Contains("5th Ave W".into()), Ok(vec![only.clone()])),
        );
        let resolver = HazardFeatureResolver::new(source);

        let geometry = resolver.resolve_feature("5th Ave W", REFERENCE, 2000.0).await.unwrap();
        assert_eq!(geometry, only.geometry);
    }

    #[tokio::test]
    async fn test_not_found_when_every_query_fails() {
        let resolver = HazardFeatureResolver::new(Arc::new(FakeFeatureSource::failing()));
        let err = resolver.resolve_feature("5th Ave W", REFERENCE, 2000.0).await.unwrap_err();
        assert!(matches!(err, SafeRouteError::NotFound(name) if name == "5th Ave W"));
    }
}

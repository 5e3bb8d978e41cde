//! Hazard overlay for safe-zone plans.

use crate::geometry::{Coordinate, Polyline};
use crate::planner::types::{HazardFeature, HazardTag};
use crate::providers::MapFeature;

pub const MIN_OVERLAY_STREETS: usize = 3;
pub const MAX_OVERLAY_STREETS: usize = 6;

/// Tag a random sample of 3 to 6 streets (fewer if fewer are available).
pub fn sample_hazards(rng: &mut fastrand::Rng, mut streets: Vec<MapFeature>) -> Vec<HazardFeature> {
    let wanted = rng.usize(MIN_OVERLAY_STREETS..=MAX_OVERLAY_STREETS);
    rng.shuffle(&mut streets);
    streets.truncate(wanted);

    streets
        .into_iter()
        .map(|street| HazardFeature {
            name: street.name,
            geometry: street.geometry,
            tag: HazardTag::ALL[rng.usize(..HazardTag::ALL.len())],
        })
        .collect()
}

/// Fixed stand-in hazards around `origin` for when the street query fails.
pub fn simulated_hazards(origin: Coordinate) -> Vec<HazardFeature> {
    let Coordinate { lat, lon } = origin;
    let street = |name: &str, a: (f64, f64), b: (f64, f64), tag: HazardTag| HazardFeature {
        name: name.to_string(),
        geometry: Polyline::direct(Coordinate::new(a.0, a.1), Coordinate::new(b.0, b.1)),
        tag,
    };

    vec![
        street(
            "Main St (simulated)",
            (lat + 0.001, lon - 0.002),
            (lat - 0.001, lon + 0.002),
            HazardTag::Flooded,
        ),
        street(
            "5th Ave (simulated)",
            (lat + 0.002, lon),
            (lat - 0.002, lon),
            HazardTag::Fire,
        ),
        street(
            "Oak Street (simulated)",
            (lat - 0.001, lon - 0.001),
            (lat + 0.001, lon + 0.001),
            HazardTag::Powerline,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::testing::feature;
    use std::collections::HashSet;

    fn streets(n: usize) -> Vec<MapFeature> {
        (0..n)
            .map(|i| feature(&format!("Street {i}"), &[(48.0 + i as f64 * 0.001, -114.0), (48.0, -114.01)]))
            .collect()
    }

    #[test]
    fn test_sample_size_bounds() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..50 {
            let picked = sample_hazards(&mut rng, streets(10));
            assert!((MIN_OVERLAY_STREETS..=MAX_OVERLAY_STREETS).contains(&picked.len()));

            let names: HashSet<_> = picked.iter().map(|h| h.name.clone()).collect();
            assert_eq!(names.len(), picked.len(), "streets sampled without replacement");
        }
    }

    #[test]
    fn test_sample_limited_by_availability() {
        let mut rng = fastrand::Rng::with_seed(1);
        assert_eq!(sample_hazards(&mut rng, streets(2)).len(), 2);
        assert!(sample_hazards(&mut rng, Vec::new()).is_empty());
    }

    #[test]
    fn test_same_seed_same_overlay() {
        let a = sample_hazards(&mut fastrand::Rng::with_seed(42), streets(12));
        let b = sample_hazards(&mut fastrand::Rng::with_seed(42), streets(12));
        assert_eq!(a, b);
    }

    #[test]
    fn test_simulated_hazards_offsets() {
        let hazards = simulated_hazards(Coordinate::new(48.0, -114.0));
        assert_eq!(hazards.len(), 3);

        assert_eq!(hazards[0].name, "Main St (simulated)");
        assert_eq!(hazards[0].tag, HazardTag::Flooded);
        assert_eq!(
            hazards[0].geometry.points(),
            &[Coordinate::new(48.0 + 0.001, -114.0 - 0.002), Coordinate::new(48.0 - 0.001, -114.0 + 0.002)]
        );
        assert_eq!(hazards[1].tag, HazardTag::Fire);
        assert_eq!(hazards[1].geometry.first(), Coordinate::new(48.0 + 0.002, -114.0));
        assert_eq!(hazards[2].name, "Oak Street (simulated)");
        assert_eq!(hazards[2].tag, HazardTag::Powerline);
    }
}

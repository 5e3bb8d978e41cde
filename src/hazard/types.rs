//! Hazard categories, beacons and the category→members map.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use crate::geometry::Coordinate;

/// Kinds of hazard tracked by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardCategory {
    FloodZone,
    ClosedRoad,
    PowerOutage,
    /// Members are beacon records rather than names.
    BeaconActive,
}

impl HazardCategory {
    /// Categories whose members are plain names.
    pub const NAMED: [HazardCategory; 3] = [
        HazardCategory::FloodZone,
        HazardCategory::ClosedRoad,
        HazardCategory::PowerOutage,
    ];

    pub fn is_named(&self) -> bool {
        !matches!(self, HazardCategory::BeaconActive)
    }
}

/// An emergency-assistance request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beacon {
    pub id: Uuid,
    pub location: Coordinate,
    pub message: String,
    pub survivors: u32,
    pub created_at: DateTime<Utc>,
}

impl Beacon {
    /// Create a new beacon stamped with a fresh id and the current time.
    pub fn new(location: Coordinate, message: impl Into<String>, survivors: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            location,
            message: message.into(),
            survivors,
            created_at: Utc::now(),
        }
    }
}

/// Live hazard contents: named members per category plus active beacons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HazardMap {
    members: BTreeMap<HazardCategory, BTreeSet<String>>,
    beacons: Vec<Beacon>,
}

impl HazardMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from named seed members. Beacon entries are ignored.
    pub fn seeded<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = (HazardCategory, S)>,
        S: Into<String>,
    {
        let mut map = Self::new();
        for (category, name) in seed {
            map.insert(category, name);
        }
        map
    }

    /// Named members of `category`, empty for `BeaconActive`.
    pub fn members(&self, category: HazardCategory) -> Vec<String> {
        self.members
            .get(&category)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, category: HazardCategory, name: &str) -> bool {
        self.members
            .get(&category)
            .is_some_and(|set| set.contains(name))
    }

    /// Add a named member. Returns false if already present or the category is not named.
    pub fn insert(&mut self, category: HazardCategory, name: impl Into<String>) -> bool {
        if !category.is_named() {
            return false;
        }
        self.members.entry(category).or_default().insert(name.into())
    }

    /// Remove a named member. Returns true if it was present.
    pub fn remove(&mut self, category: HazardCategory, name: &str) -> bool {
        self.members
            .get_mut(&category)
            .is_some_and(|set| set.remove(name))
    }

    pub fn push_beacon(&mut self, beacon: Beacon) {
        self.beacons.push(beacon);
    }

    pub fn beacons(&self) -> &[Beacon] {
        &self.beacons
    }

    pub fn count(&self, category: HazardCategory) -> usize {
        match category {
            HazardCategory::BeaconActive => self.beacons.len(),
            named => self.members.get(&named).map_or(0, BTreeSet::len),
        }
    }
}

/// Per-category counts taken from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardSummary {
    pub flood_zones: usize,
    pub closed_roads: usize,
    pub power_outages: usize,
    pub active_beacons: usize,
    pub version: u64,
}

/// A deep copy of the store contents and the version it was taken at.
#[derive(Debug, Clone, PartialEq)]
pub struct HazardSnapshot {
    pub map: HazardMap,
    pub version: u64,
}

impl HazardSnapshot {
    pub fn summary(&self) -> HazardSummary {
        HazardSummary {
            flood_zones: self.map.count(HazardCategory::FloodZone),
            closed_roads: self.map.count(HazardCategory::ClosedRoad),
            power_outages: self.map.count(HazardCategory::PowerOutage),
            active_beacons: self.map.count(HazardCategory::BeaconActive),
            version: self.version,
        }
    }
}

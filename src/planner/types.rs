//! Planner result types.

use serde::{Deserialize, Serialize};

use crate::geometry::{Coordinate, Polyline};

/// A route stamped with the hazard state it was planned against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedRoute {
    pub path: Polyline,
    /// Flood-zone members at `hazard_version`.
    pub hazards: Vec<String>,
    pub hazard_version: u64,
    /// True when a waypoint was inserted around the at-risk way.
    pub detoured: bool,
}

/// Hazard kinds assigned to streets in a safe-zone plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardTag {
    Flooded,
    Fire,
    Powerline,
    Blocked,
}

impl HazardTag {
    pub const ALL: [HazardTag; 4] = [
        HazardTag::Flooded,
        HazardTag::Fire,
        HazardTag::Powerline,
        HazardTag::Blocked,
    ];
}

/// A street flagged as hazardous for display alongside a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardFeature {
    pub name: String,
    pub geometry: Polyline,
    pub tag: HazardTag,
}

/// Evacuation plan from an address to the nearest safe zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeZonePlan {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub hazard_features: Vec<HazardFeature>,
    pub route_path: Polyline,
    pub hazard_version: u64,
}

/// A fixed evacuation scenario for demos: a flooded street between a known
/// origin and shelter, and a route around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub flooded_street: Polyline,
    pub safe_route: Polyline,
    pub blocked_roads: Vec<String>,
    pub hazard_version: u64,
}

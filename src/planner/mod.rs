//! Route planning subsystem.
//!
//! # Data Flow
//! ```text
//! plan_route(origin, destination)
//!     → midpoint → HazardFeatureResolver(at-risk way)
//!     → crosses direct segment? synthesize_detour : [origin, destination]
//!     → stamp with HazardStore snapshot
//!
//! plan_route_by_address / find_safe_zone(address)
//!     → LocalityResolver → SafeZoneLocator (→ fallback shelter)
//!     → RoutingProvider (→ direct path)
//!     → [find_safe_zone] street overlay (→ simulated hazards)
//!
//! scenario()
//!     → LocalityResolver × 3 (→ fixed coordinates)
//!     → HazardFeatureResolver(at-risk way) (→ canned flooded segment)
//! ```
//!
//! # Design Decisions
//! - `plan_route` and `scenario` never fail; provider failures degrade to canned geometry
//! - Address routes fall back to the configured shelter when no safe zone answers
//! - The hazard store is only read here, never mutated
//! - The overlay RNG is owned by the planner and can be seeded

pub mod overlay;
pub mod route;
pub mod scenario;
pub mod types;

pub use route::{PlannerProviders, RoutePlanner};
pub use types::{HazardFeature, HazardTag, PlannedRoute, SafeZonePlan, Scenario};

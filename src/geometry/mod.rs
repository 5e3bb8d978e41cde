//! Geometry engine.
//!
//! # Data Flow
//! ```text
//! hazard way geometry (Polyline)
//!     → intersect.rs (does the direct segment cross it?)
//!     → detour.rs (north/south waypoint candidates, shorter wins)
//!     → planned path (Polyline)
//! ```
//!
//! # Design Decisions
//! - Pure functions, no shared state
//! - Distances and lengths are Euclidean in degree-space, not geodesic;
//!   this is a local planarity approximation that only holds for small areas
//! - Crossing test is strict: collinear and touching segments do not intersect

pub mod detour;
pub mod intersect;
pub mod types;

pub use detour::{detour_candidates, synthesize_detour, DETOUR_OFFSET_DEG};
pub use intersect::{polyline_intersects, segments_intersect};
pub use types::{path_length, BoundingBox, Coordinate, GeometryError, Polyline};

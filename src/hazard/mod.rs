//! Hazard state subsystem.
//!
//! # Data Flow
//! ```text
//! seed config
//!     → store.rs (HazardStore::new, version 0)
//!
//! Mutations (write lock, version += 1):
//!     toggler.rs (periodic flip of one member)
//!     beacon submission (push active beacon)
//!
//! Reads (read lock, deep copy):
//!     route planner (version stamp, flood zones)
//!     status summary
//! ```
//!
//! # Design Decisions
//! - One lock, held only for copy-out or mutation, never across network calls
//! - No direct access to the live map outside `HazardStore::mutate`
//! - Version is a strictly increasing counter so callers can detect stale routes

pub mod store;
pub mod toggler;
pub mod types;

pub use store::{HazardError, HazardStore};
pub use toggler::{HazardToggler, ToggleOutcome};
pub use types::{Beacon, HazardCategory, HazardMap, HazardSnapshot, HazardSummary};

//! Append-only beacon persistence.
//!
//! # Data Flow
//! ```text
//! SafeRouteService::submit_beacon
//!     → hazard store (BeaconActive, in memory)
//!     → BeaconLog::append
//!         → MemoryBeaconLog | JsonlBeaconLog (one JSON object per line)
//! ```
//!
//! # Design Decisions
//! - A beacon is never rewritten once appended
//! - Appends are serialized so concurrent writers never interleave a line
//! - Listing is newest first; equal timestamps list the later append first

pub mod log;
pub mod types;

pub use log::{BeaconLog, JsonlBeaconLog, MemoryBeaconLog};
pub use types::{BeaconLogError, BeaconLogResult};

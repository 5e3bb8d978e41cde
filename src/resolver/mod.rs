//! Name and address resolution on top of the provider layer.
//!
//! # Data Flow
//! ```text
//! address ─→ LocalityResolver ─(cache miss)─→ Geocoder
//! way name ─→ HazardFeatureResolver ─(exact | contains | first token)─→ FeatureSource
//! point ─→ SafeZoneLocator ─(first Ok source)─→ [SafeZoneSource, ...]
//! ```
//!
//! # Design Decisions
//! - Distances are degree-space Euclidean, not geodesic
//! - The geocode cache never evicts

pub mod feature;
pub mod locality;
pub mod safe_zone;

pub use feature::HazardFeatureResolver;
pub use locality::LocalityResolver;
pub use safe_zone::SafeZoneLocator;

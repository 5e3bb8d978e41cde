//! SafeRoute: hazard-aware evacuation routing.
//!
//! Plans routes that bend around known hazards, locates nearby safe zones,
//! keeps a versioned view of live hazards and accepts emergency beacons.

pub mod beacon;
pub mod config;
pub mod error;
pub mod geometry;
pub mod hazard;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod planner;
pub mod providers;
pub mod resilience;
pub mod resolver;
pub mod service;

pub use config::SafeRouteConfig;
pub use error::{SafeRouteError, SafeRouteResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use service::SafeRouteService;

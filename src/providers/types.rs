//! Provider-facing types and error definitions.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::geometry::Polyline;

/// Errors that can occur when calling an external provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The call did not finish within its deadline.
    #[error("provider timed out after {0:?}")]
    Timeout(Duration),

    /// Connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status (429 rate limiting included).
    #[error("provider returned status {0}")]
    Status(u16),

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// Provider answered but reported a failure of its own.
    #[error("provider rejected request: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ProviderError::Status(status.as_u16())
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Name filter for map-feature queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamePattern {
    /// Whole name, case-insensitive.
    Exact(String),
    /// Substring, case-insensitive.
    Contains(String),
    /// Any feature that has a name at all.
    AnyNamed,
}

/// A named way returned by the map-feature service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFeature {
    pub name: String,
    pub geometry: Polyline,
}

/// OSM way kind used for hazard lookups.
pub const HIGHWAY: &str = "highway";

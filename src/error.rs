//! Service-level error taxonomy.

use thiserror::Error;

use crate::beacon::BeaconLogError;
use crate::geometry::GeometryError;
use crate::providers::ProviderError;

/// Errors surfaced to callers of the SafeRoute service.
#[derive(Debug, Error)]
pub enum SafeRouteError {
    /// The address could not be geocoded; there is no coordinate fallback.
    #[error("address not found: {0}")]
    AddressNotFound(String),

    /// A feature or safe zone could not be resolved after exhausting providers.
    #[error("not found: {0}")]
    NotFound(String),

    /// Every provider for a required lookup failed.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(#[from] ProviderError),

    /// The beacon store rejected a write.
    #[error("persistence failure: {0}")]
    PersistenceFailure(#[from] BeaconLogError),

    /// Malformed coordinates, survivor counts, addresses or radii.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<GeometryError> for SafeRouteError {
    fn from(e: GeometryError) -> Self {
        SafeRouteError::InvalidInput(e.to_string())
    }
}

/// Result type for service operations.
pub type SafeRouteResult<T> = Result<T, SafeRouteError>;

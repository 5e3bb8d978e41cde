//! Beacon persistence errors.

use thiserror::Error;

/// Errors that can occur when appending to or reading a beacon log.
#[derive(Debug, Error)]
pub enum BeaconLogError {
    #[error("beacon log I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode beacon: {0}")]
    Encode(#[from] serde_json::Error),

    /// The store refused the write for a reason other than I/O.
    #[error("beacon log unavailable: {0}")]
    Unavailable(String),
}

pub type BeaconLogResult<T> = Result<T, BeaconLogError>;

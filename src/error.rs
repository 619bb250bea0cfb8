//! Error types for geocells.

use thiserror::Error;

/// Errors produced by geohash, indexing and reprojection operations.
#[derive(Debug, Error)]
pub enum GeocellError {
    /// Bad precision, coordinate, bounding box or polygon.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed geohash string (empty, too long, or outside the base-32 alphabet).
    #[error("Invalid geohash: {0}")]
    InvalidGeohash(String),

    /// The CRS code is not present in the lookup table.
    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    /// Building or applying a coordinate transform failed.
    #[error("Coordinate transform failed: {0}")]
    TransformFailure(String),

    /// An enumeration would produce more cells than the configured limit.
    #[error("Cell limit of {limit} exceeded")]
    CellLimitExceeded { limit: usize },

    #[error("Operation cancelled")]
    Cancelled,

    /// The background worker panicked or was aborted.
    #[error("Background task failed: {0}")]
    Task(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GeocellError {
    /// True for caller mistakes (`InvalidArgument` and `InvalidGeohash`).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            GeocellError::InvalidArgument(_) | GeocellError::InvalidGeohash(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GeocellError>;

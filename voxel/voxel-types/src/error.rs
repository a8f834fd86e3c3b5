//! Error types for volume construction and classification.

use thiserror::Error;

/// Result type alias for volume operations.
pub type VolumeResult<T> = Result<T, VolumeError>;

/// Errors that can occur when constructing volumes or classification rules.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VolumeError {
    /// Every dimension of a volume must be at least 1.
    #[error("invalid volume dimensions: {width}x{height}x{depth}")]
    InvalidDimensions {
        /// Width (x extent).
        width: usize,
        /// Height (y extent).
        height: usize,
        /// Depth (z extent, number of slices).
        depth: usize,
    },

    /// The supplied buffer does not hold one value per voxel.
    #[error("buffer holds {actual} values but the shape requires {expected}")]
    BufferSizeMismatch {
        /// Voxel count demanded by the shape.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// The classification threshold is outside `1..=255`.
    #[error("threshold must be in 1..=255, got {0}")]
    InvalidThreshold(u8),
}

//! Error types for the thickness pipeline.

use thiserror::Error;
use voxel_types::{VolumeError, VolumeShape};

/// Result type alias for thickness operations.
pub type ThicknessResult<T> = Result<T, ThicknessError>;

/// Errors that can occur while computing a thickness map.
///
/// All variants are precondition violations or driver-level faults; the
/// numerical stages themselves cannot fail once their inputs are validated.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ThicknessError {
    /// A volume or classification rule was malformed.
    #[error(transparent)]
    Volume(#[from] VolumeError),

    /// Two volumes that must share a shape do not.
    #[error("volume shapes do not match: {expected} vs {actual}")]
    ShapeMismatch {
        /// Shape of the reference volume.
        expected: VolumeShape,
        /// Shape of the offending volume.
        actual: VolumeShape,
    },

    /// A worker thread panicked; no partial output is produced.
    #[error("worker thread panicked during {stage}")]
    WorkerPanic {
        /// Name of the stage that faulted.
        stage: &'static str,
    },

    /// The cancellation flag was set between stages.
    #[error("pipeline cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ThicknessError::ShapeMismatch {
            expected: VolumeShape::new(10, 10, 2).unwrap(),
            actual: VolumeShape::new(11, 10, 2).unwrap(),
        };
        assert!(format!("{err}").contains("10x10x2"));
        assert!(format!("{err}").contains("11x10x2"));

        let err = ThicknessError::WorkerPanic {
            stage: "distance transform",
        };
        assert!(format!("{err}").contains("distance transform"));

        let err = ThicknessError::Cancelled;
        assert!(format!("{err}").contains("cancelled"));
    }

    #[test]
    fn test_volume_error_converts() {
        let err: ThicknessError = VolumeError::InvalidThreshold(0).into();
        assert!(format!("{err}").contains("threshold"));
    }
}

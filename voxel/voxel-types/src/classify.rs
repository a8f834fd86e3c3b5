//! Foreground/background classification of byte voxels.

use crate::error::{VolumeError, VolumeResult};

/// Threshold rule that splits byte voxels into foreground and background.
///
/// A voxel is foreground when `value >= threshold`, XOR the `inverse` flag.
/// With `inverse = false` (the usual case) high values are foreground; with
/// `inverse = true` the classification flips.
///
/// # Example
///
/// ```
/// use voxel_types::Threshold;
///
/// let rule = Threshold::new(128, false).unwrap();
/// assert!(rule.is_foreground(200));
/// assert!(rule.is_background(100));
///
/// let inverted = Threshold::new(128, true).unwrap();
/// assert!(inverted.is_background(200));
/// assert!(inverted.is_foreground(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threshold {
    value: u8,
    inverse: bool,
}

impl Threshold {
    /// Creates a classification rule.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::InvalidThreshold`] if `value` is 0. A zero
    /// threshold would classify every voxel the same way regardless of its
    /// value, which is never what a caller wants.
    pub const fn new(value: u8, inverse: bool) -> VolumeResult<Self> {
        if value == 0 {
            return Err(VolumeError::InvalidThreshold(0));
        }
        Ok(Self { value, inverse })
    }

    /// The threshold value, in `1..=255`.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Whether the classification is inverted.
    #[must_use]
    pub const fn inverse(&self) -> bool {
        self.inverse
    }

    /// Whether `byte` classifies as foreground.
    #[must_use]
    pub const fn is_foreground(&self, byte: u8) -> bool {
        (byte >= self.value) != self.inverse
    }

    /// Whether `byte` classifies as background.
    #[must_use]
    pub const fn is_background(&self, byte: u8) -> bool {
        !self.is_foreground(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_threshold() {
        assert!(matches!(
            Threshold::new(0, false),
            Err(VolumeError::InvalidThreshold(0))
        ));
    }

    #[test]
    fn test_plain_classification() {
        let rule = Threshold::new(128, false).unwrap();
        assert!(rule.is_background(0));
        assert!(rule.is_background(127));
        assert!(rule.is_foreground(128));
        assert!(rule.is_foreground(255));
    }

    #[test]
    fn test_inverse_classification() {
        let rule = Threshold::new(128, true).unwrap();
        assert!(rule.is_foreground(0));
        assert!(rule.is_foreground(127));
        assert!(rule.is_background(128));
        assert!(rule.is_background(255));
    }

    #[test]
    fn test_foreground_background_partition() {
        // Every byte is exactly one of foreground/background under any rule.
        for threshold in [1u8, 100, 255] {
            for inverse in [false, true] {
                let rule = Threshold::new(threshold, inverse).unwrap();
                for byte in 0..=255u8 {
                    assert_ne!(rule.is_foreground(byte), rule.is_background(byte));
                }
            }
        }
    }

    #[test]
    fn test_extreme_thresholds() {
        // Threshold 1: only value 0 is background.
        let low = Threshold::new(1, false).unwrap();
        assert!(low.is_background(0));
        assert!(low.is_foreground(1));

        // Threshold 255: only value 255 is foreground.
        let high = Threshold::new(255, false).unwrap();
        assert!(high.is_background(254));
        assert!(high.is_foreground(255));
    }

    #[test]
    fn test_accessors() {
        let rule = Threshold::new(42, true).unwrap();
        assert_eq!(rule.value(), 42);
        assert!(rule.inverse());
    }
}

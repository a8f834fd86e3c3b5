//! Parameters for the thickness pipeline.

use voxel_types::{Threshold, VolumeResult};

/// Parameters for the thickness pipeline.
///
/// # Example
///
/// ```
/// use voxel_thickness::ThicknessParams;
///
/// // Defaults: threshold 128, plain classification, trim enabled.
/// let params = ThicknessParams::default();
/// assert_eq!(params.threshold, 128);
/// assert!(!params.inverse);
/// assert!(params.trim_overhang);
///
/// // Builder-style overrides
/// let params = ThicknessParams::default().threshold(64).inverse(true);
/// assert_eq!(params.threshold, 64);
/// assert!(params.inverse);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThicknessParams {
    /// Classification threshold, in `1..=255`. Voxels with `value >= threshold`
    /// are foreground (before `inverse` is applied).
    pub threshold: u8,

    /// Inverts the classification, making `value >= threshold` background.
    pub inverse: bool,

    /// Whether to zero map voxels whose input voxel classified as background.
    /// This removes "overhang" values that the border clean-up smears outside
    /// the original foreground, at the cost of an extra pass.
    pub trim_overhang: bool,
}

impl Default for ThicknessParams {
    fn default() -> Self {
        Self {
            threshold: 128,
            inverse: false,
            trim_overhang: true,
        }
    }
}

impl ThicknessParams {
    /// Sets the classification threshold.
    #[must_use]
    pub const fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the inverse classification flag.
    #[must_use]
    pub const fn inverse(mut self, inverse: bool) -> Self {
        self.inverse = inverse;
        self
    }

    /// Enables or disables the overhang trim pass.
    #[must_use]
    pub const fn trim_overhang(mut self, trim: bool) -> Self {
        self.trim_overhang = trim;
        self
    }

    /// Builds the classification rule these parameters describe.
    ///
    /// # Errors
    ///
    /// Returns [`voxel_types::VolumeError::InvalidThreshold`] if the
    /// threshold is 0.
    pub const fn classifier(&self) -> VolumeResult<Threshold> {
        Threshold::new(self.threshold, self.inverse)
    }
}

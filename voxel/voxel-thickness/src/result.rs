//! Result type of the thickness pipeline.

use voxel_types::{FloatVolume, VolumeShape};

/// Result of a thickness pipeline run.
///
/// Holds the thickness map (diameters, one per voxel, 0 for background) plus
/// the summary figures downstream consumers usually want without a second
/// scan.
///
/// # Example
///
/// ```
/// use voxel_thickness::ThicknessMap;
/// use voxel_types::{FloatVolume, VolumeShape};
///
/// let shape = VolumeShape::new(2, 2, 2).unwrap();
/// let result = ThicknessMap::from_volume(FloatVolume::zeros(shape));
/// assert_eq!(result.max_thickness, 0.0);
/// assert_eq!(result.foreground_voxels, 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ThicknessMap {
    /// The thickness map; every value is a diameter, background is 0.
    pub map: FloatVolume,
    /// Largest thickness in the map (display scaling, histogram bounds).
    pub max_thickness: f32,
    /// Number of voxels with a nonzero thickness.
    pub foreground_voxels: usize,
}

impl ThicknessMap {
    /// Wraps a finished map, scanning it once for the summary figures.
    #[must_use]
    pub fn from_volume(map: FloatVolume) -> Self {
        let mut max_thickness = 0.0f32;
        let mut foreground_voxels = 0;
        for &value in map.data() {
            if value > 0.0 {
                foreground_voxels += 1;
                max_thickness = max_thickness.max(value);
            }
        }
        Self {
            map,
            max_thickness,
            foreground_voxels,
        }
    }

    /// The map dimensions.
    #[must_use]
    pub const fn shape(&self) -> VolumeShape {
        self.map.shape()
    }

    /// Consumes the result, returning just the map.
    #[must_use]
    pub fn into_volume(self) -> FloatVolume {
        self.map
    }
}

impl std::fmt::Display for ThicknessMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Local Thickness Map:")?;
        writeln!(f, "  Shape: {}", self.shape())?;
        writeln!(f, "  Foreground voxels: {}", self.foreground_voxels)?;
        writeln!(f, "  Max thickness: {:.3}", self.max_thickness)?;
        Ok(())
    }
}

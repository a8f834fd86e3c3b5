//! Dense volume buffers.

use crate::error::{VolumeError, VolumeResult};
use crate::shape::VolumeShape;

/// Dense 8-bit volume, the input format for binary image pipelines.
///
/// Byte values are interpreted through a [`Threshold`](crate::Threshold)
/// rule; the volume itself stores raw values and never classifies.
///
/// # Example
///
/// ```
/// use voxel_types::{ByteVolume, VolumeShape};
///
/// let shape = VolumeShape::new(2, 2, 2).unwrap();
/// let volume = ByteVolume::from_vec(shape, vec![0; 8]).unwrap();
/// assert_eq!(volume.get(1, 1, 1), Some(0));
/// assert_eq!(volume.get(2, 0, 0), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByteVolume {
    shape: VolumeShape,
    data: Vec<u8>,
}

impl ByteVolume {
    /// Wraps an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::BufferSizeMismatch`] if `data.len()` is not
    /// exactly one byte per voxel.
    pub fn from_vec(shape: VolumeShape, data: Vec<u8>) -> VolumeResult<Self> {
        if data.len() != shape.voxel_count() {
            return Err(VolumeError::BufferSizeMismatch {
                expected: shape.voxel_count(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Creates a volume with every voxel set to `value`.
    #[must_use]
    pub fn filled(shape: VolumeShape, value: u8) -> Self {
        Self {
            shape,
            data: vec![value; shape.voxel_count()],
        }
    }

    /// The volume dimensions.
    #[must_use]
    pub const fn shape(&self) -> VolumeShape {
        self.shape
    }

    /// Value at `(x, y, z)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<u8> {
        if self.shape.contains(x, y, z) {
            Some(self.data[self.shape.index(x, y, z)])
        } else {
            None
        }
    }

    /// Sets the value at `(x, y, z)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: u8) {
        assert!(
            self.shape.contains(x, y, z),
            "voxel ({x}, {y}, {z}) out of bounds for {}",
            self.shape
        );
        let index = self.shape.index(x, y, z);
        self.data[index] = value;
    }

    /// The XY slice at depth `z`, `width * height` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `z >= depth`.
    #[must_use]
    pub fn slice(&self, z: usize) -> &[u8] {
        let len = self.shape.slice_len();
        &self.data[z * len..(z + 1) * len]
    }

    /// The whole buffer in flat index order.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Dense 32-bit float volume, used for distance and thickness maps.
///
/// # Example
///
/// ```
/// use voxel_types::{FloatVolume, VolumeShape};
///
/// let shape = VolumeShape::new(2, 2, 2).unwrap();
/// let mut volume = FloatVolume::zeros(shape);
/// volume.set(0, 1, 0, 3.5);
/// assert_eq!(volume.get(0, 1, 0), Some(3.5));
/// assert_eq!(volume.max_value(), 3.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatVolume {
    shape: VolumeShape,
    data: Vec<f32>,
}

impl FloatVolume {
    /// Creates a volume with every voxel set to 0.
    #[must_use]
    pub fn zeros(shape: VolumeShape) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.voxel_count()],
        }
    }

    /// Wraps an existing buffer.
    ///
    /// # Errors
    ///
    /// Returns [`VolumeError::BufferSizeMismatch`] if `data.len()` is not
    /// exactly one value per voxel.
    pub fn from_vec(shape: VolumeShape, data: Vec<f32>) -> VolumeResult<Self> {
        if data.len() != shape.voxel_count() {
            return Err(VolumeError::BufferSizeMismatch {
                expected: shape.voxel_count(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// The volume dimensions.
    #[must_use]
    pub const fn shape(&self) -> VolumeShape {
        self.shape
    }

    /// Value at `(x, y, z)`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        if self.shape.contains(x, y, z) {
            Some(self.data[self.shape.index(x, y, z)])
        } else {
            None
        }
    }

    /// Sets the value at `(x, y, z)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: f32) {
        assert!(
            self.shape.contains(x, y, z),
            "voxel ({x}, {y}, {z}) out of bounds for {}",
            self.shape
        );
        let index = self.shape.index(x, y, z);
        self.data[index] = value;
    }

    /// The XY slice at depth `z`, `width * height` values.
    ///
    /// # Panics
    ///
    /// Panics if `z >= depth`.
    #[must_use]
    pub fn slice(&self, z: usize) -> &[f32] {
        let len = self.shape.slice_len();
        &self.data[z * len..(z + 1) * len]
    }

    /// The whole buffer in flat index order.
    #[must_use]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the whole buffer in flat index order.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Largest value in the volume, or 0 for an all-zero volume.
    #[must_use]
    pub fn max_value(&self) -> f32 {
        self.data.iter().copied().fold(0.0, f32::max)
    }
}

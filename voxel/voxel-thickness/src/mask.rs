//! Overhang trim: masking a thickness map with its source volume.

use rayon::prelude::*;
use voxel_types::{ByteVolume, FloatVolume, Threshold};

use crate::error::{ThicknessError, ThicknessResult};

/// Returns a copy of `map` with every voxel zeroed whose voxel in `original`
/// classifies as background.
///
/// The border clean-up smears averaged values one voxel past the original
/// foreground; trimming removes that dilation so downstream statistics see
/// only genuine foreground. Neither input is modified, and trimming an
/// already-trimmed map is a no-op.
///
/// # Errors
///
/// Returns [`ThicknessError::ShapeMismatch`] if the two volumes disagree in
/// shape.
pub fn trim_overhang(
    map: &FloatVolume,
    original: &ByteVolume,
    rule: Threshold,
) -> ThicknessResult<FloatVolume> {
    if map.shape() != original.shape() {
        return Err(ThicknessError::ShapeMismatch {
            expected: original.shape(),
            actual: map.shape(),
        });
    }

    let plane = map.shape().slice_len();
    let mut out = map.clone();
    out.data_mut()
        .par_chunks_mut(plane)
        .enumerate()
        .for_each(|(z, slab)| {
            for (value, &byte) in slab.iter_mut().zip(original.slice(z)) {
                if rule.is_background(byte) {
                    *value = 0.0;
                }
            }
        });
    Ok(out)
}

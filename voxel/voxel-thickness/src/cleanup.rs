//! Border clean-up of the ball-covering map.
//!
//! The covering pass underestimates thickness near the foreground surface:
//! balls cannot extend outside the foreground, so border voxels pick up
//! jagged, too-small radii. The clean-up replaces each border voxel's value
//! by the average of its interior 26-neighbors, then doubles every radius
//! into a diameter.

// Index arithmetic on dense grids.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

use rayon::prelude::*;
use voxel_types::FloatVolume;

/// Border marker used between the flagging and averaging phases.
const BORDER: f32 = -1.0;

/// Value of the 26-neighbor at offset `(dx, dy, dz)` from `(x, y, z)`, or
/// `None` when the offset leaves the volume.
#[allow(clippy::too_many_arguments)]
fn neighbor(
    data: &[f32],
    dims: (usize, usize, usize),
    x: usize,
    y: usize,
    z: usize,
    dx: i32,
    dy: i32,
    dz: i32,
) -> Option<f32> {
    let (w, h, d) = dims;
    let x1 = x as i32 + dx;
    let y1 = y as i32 + dy;
    let z1 = z as i32 + dz;
    if x1 < 0 || x1 >= w as i32 || y1 < 0 || y1 >= h as i32 || z1 < 0 || z1 >= d as i32 {
        return None;
    }
    Some(data[x1 as usize + (y1 as usize) * w + (z1 as usize) * w * h])
}

/// Whether the voxel touches background through any of its 26 neighbors.
/// Offsets leaving the volume count as background.
fn touches_background(
    data: &[f32],
    dims: (usize, usize, usize),
    x: usize,
    y: usize,
    z: usize,
) -> bool {
    for dz in -1i32..=1 {
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 && dz == 0 {
                    continue;
                }
                match neighbor(data, dims, x, y, z, dx, dy, dz) {
                    Some(value) if value != 0.0 => {}
                    _ => return true,
                }
            }
        }
    }
    false
}

/// Mean of the positive (interior) values among the 26 neighbors in the
/// flag buffer, or `None` if the voxel has no interior neighbor. Border
/// markers are negative and background is 0, so both stay out of the sum.
fn interior_neighbor_mean(
    flags: &[f32],
    dims: (usize, usize, usize),
    x: usize,
    y: usize,
    z: usize,
) -> Option<f32> {
    let mut sum = 0.0f32;
    let mut count = 0u32;
    for dz in -1i32..=1 {
        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 && dz == 0 {
                    continue;
                }
                if let Some(value) = neighbor(flags, dims, x, y, z, dx, dy, dz) {
                    if value > 0.0 {
                        sum += value;
                        count += 1;
                    }
                }
            }
        }
    }
    (count > 0).then(|| sum / count as f32)
}

/// Cleans up a ball-covering map and converts radii to diameters.
///
/// Three phases, each a full pass partitioned over z-slices:
///
/// 1. Flag every voxel: 0 for background, a negative marker for border
///    voxels (non-background with a background 26-neighbor, counting the
///    volume faces as background), the input value for interior voxels.
/// 2. Resolve each border voxel to the mean of its interior 26-neighbors,
///    falling back to its own input value when it has none. Only the phase-1
///    buffer is read, in which every border is still marked, so borders
///    never contribute to each other's averages and the result does not
///    depend on traversal or worker order.
/// 3. Take absolute values and double.
///
/// The output is 0 exactly where the input is 0, and positive elsewhere.
#[must_use]
pub fn cleanup(cover: &FloatVolume) -> FloatVolume {
    let shape = cover.shape();
    let dims = (shape.width(), shape.height(), shape.depth());
    let (w, h, _) = dims;
    let plane = shape.slice_len();
    let data = cover.data();

    // Phase 1: flag background / border / interior.
    let mut flags = vec![0.0f32; shape.voxel_count()];
    flags
        .par_chunks_mut(plane)
        .enumerate()
        .for_each(|(z, slab)| {
            for y in 0..h {
                let row = y * w;
                for x in 0..w {
                    let value = data[row + x + z * plane];
                    slab[row + x] = if value == 0.0 {
                        0.0
                    } else if touches_background(data, dims, x, y, z) {
                        BORDER
                    } else {
                        value
                    };
                }
            }
        });

    // Phase 2: average borders from interior neighbors, into a fresh buffer.
    let mut out = FloatVolume::zeros(shape);
    out.data_mut()
        .par_chunks_mut(plane)
        .enumerate()
        .for_each(|(z, slab)| {
            for y in 0..h {
                let row = y * w;
                for x in 0..w {
                    let flag = flags[row + x + z * plane];
                    slab[row + x] = if flag == BORDER {
                        match interior_neighbor_mean(&flags, dims, x, y, z) {
                            Some(mean) => -mean,
                            None => -data[row + x + z * plane],
                        }
                    } else {
                        flag
                    };
                }
            }
        });

    // Phase 3: radii to diameters.
    out.data_mut()
        .par_chunks_mut(plane)
        .for_each(|slab| {
            for value in slab {
                *value = 2.0 * value.abs();
            }
        });
    out
}

//! Euclidean distance transform (Saito-Toriwaki, three separable passes).

// Index arithmetic on dense grids; dimensions are bounded by MAX_DIMENSION.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]

use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use voxel_types::{ByteVolume, FloatVolume, Threshold};

/// Largest supported per-axis dimension.
///
/// Squared distances travel through the passes as `i32`. The minimum search
/// compares `sentinel + delta^2 < 4 * (n + 1)^2`, which must stay below
/// `i32::MAX`; that holds up to this bound. Any volume that fits in memory is
/// far inside it.
pub(crate) const MAX_DIMENSION: usize = 23_169;

/// Stand-in for "no background in this direction". Exceeds every achievable
/// squared distance in the volume.
fn sentinel(max_dim: usize) -> i32 {
    let n = max_dim as i32;
    3 * (n + 1) * (n + 1)
}

/// Computes the Euclidean distance from every foreground voxel to the nearest
/// background voxel. Background voxels hold 0.
///
/// If no voxel classifies as background the result is all zeros: with nothing
/// to measure against, distances are 0 by convention rather than unbounded.
///
/// # Panics
///
/// Panics if any dimension exceeds 23,169, the bound at which
/// squared-distance intermediates would overflow `i32`.
#[must_use]
pub fn distance_map(input: &ByteVolume, rule: Threshold) -> FloatVolume {
    let shape = input.shape();
    assert!(
        shape.max_dimension() <= MAX_DIMENSION,
        "volume dimension {} exceeds supported maximum {MAX_DIMENSION}",
        shape.max_dimension()
    );

    let (w, h, d) = (shape.width(), shape.height(), shape.depth());
    let plane = shape.slice_len();
    let far = sentinel(shape.max_dimension());

    // Step 1: nearest background along x, per row. Each worker owns the
    // slices it writes; the input volume is read-only.
    let mut x_sq = vec![0i32; shape.voxel_count()];
    let any_background = AtomicBool::new(false);
    x_sq.par_chunks_mut(plane)
        .enumerate()
        .for_each(|(z, slab)| {
            let bytes = input.slice(z);
            let mut background = vec![false; w];
            let mut seen = false;
            for y in 0..h {
                let row = y * w;
                for (x, flag) in background.iter_mut().enumerate() {
                    *flag = rule.is_background(bytes[row + x]);
                    seen |= *flag;
                }
                for x in 0..w {
                    let mut min = far;
                    if let Some(offset) = background[x..].iter().position(|&b| b) {
                        let delta = offset as i32;
                        min = delta * delta;
                    }
                    if let Some(nearest) = background[..x].iter().rposition(|&b| b) {
                        let delta = (x - nearest) as i32;
                        let test = delta * delta;
                        if test < min {
                            min = test;
                        }
                    }
                    slab[row + x] = min;
                }
            }
            if seen {
                any_background.store(true, Ordering::Relaxed);
            }
        });

    if !any_background.load(Ordering::Relaxed) {
        debug!(shape = %shape, "no background voxels; distance map is zero");
        return FloatVolume::zeros(shape);
    }

    // Step 2: fold in y displacements. Columns within a slice are
    // independent, so the per-slice partitioning carries over.
    let mut xy_sq = vec![0i32; shape.voxel_count()];
    xy_sq
        .par_chunks_mut(plane)
        .enumerate()
        .for_each(|(z, slab)| {
            let prev = &x_sq[z * plane..(z + 1) * plane];
            let mut column = vec![0i32; h];
            for x in 0..w {
                let mut nonempty = false;
                for (y, value) in column.iter_mut().enumerate() {
                    *value = prev[x + y * w];
                    nonempty |= *value > 0;
                }
                // All-background column: stays 0.
                if !nonempty {
                    continue;
                }
                for y in 0..h {
                    let mut min = far;
                    let mut delta = y as i32;
                    for &value in &column {
                        let test = value + delta * delta;
                        if test < min {
                            min = test;
                        }
                        delta -= 1;
                    }
                    slab[x + y * w] = min;
                }
            }
        });
    drop(x_sq);

    // Step 3 prepass: restricted z-range per column. The scan window only
    // needs to reach one voxel past the nonzero span (everything further is
    // dominated by the span edge), computed once instead of per slice.
    let ranges: Vec<(i32, i32)> = (0..plane)
        .into_par_iter()
        .map(|xy| {
            let mut first = -1i32;
            let mut last = -1i32;
            for z in 0..d {
                if xy_sq[xy + z * plane] > 0 {
                    if first < 0 {
                        first = z as i32;
                    }
                    last = z as i32;
                }
            }
            if first < 0 {
                (-1, -1)
            } else {
                ((first - 1).max(0), (last + 1).min(d as i32 - 1))
            }
        })
        .collect();

    // Step 3: fold in z displacements and finalize to distances. Only
    // foreground voxels are scanned, re-applying the byte classification, so
    // background holds exactly 0 in the output.
    let mut out = FloatVolume::zeros(shape);
    let max_distance = out
        .data_mut()
        .par_chunks_mut(plane)
        .enumerate()
        .map(|(z, slab)| {
            let bytes = input.slice(z);
            let k = z as i32;
            let mut slab_max = 0.0f32;
            for (xy, value) in slab.iter_mut().enumerate() {
                if rule.is_background(bytes[xy]) {
                    continue;
                }
                let (z_start, z_stop) = ranges[xy];
                if z_start < 0 {
                    continue;
                }
                let begin = z_start.min(k);
                let end = z_stop.max(k);
                let mut min = far;
                let mut delta = k - begin;
                for zz in begin..=end {
                    let test = xy_sq[xy + (zz as usize) * plane] + delta * delta;
                    if test < min {
                        min = test;
                    }
                    delta -= 1;
                }
                let distance = f64::from(min).sqrt() as f32;
                *value = distance;
                slab_max = slab_max.max(distance);
            }
            slab_max
        })
        .reduce(|| 0.0f32, f32::max);

    debug!(shape = %shape, max_distance, "distance transform complete");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use voxel_types::VolumeShape;

    fn rule() -> Threshold {
        Threshold::new(128, false).unwrap()
    }

    /// Nearest-background distance by exhaustive search.
    fn brute_force(input: &ByteVolume, rule: Threshold, x: usize, y: usize, z: usize) -> f32 {
        let shape = input.shape();
        if rule.is_background(input.get(x, y, z).unwrap()) {
            return 0.0;
        }
        let mut best = f64::INFINITY;
        for bz in 0..shape.depth() {
            for by in 0..shape.height() {
                for bx in 0..shape.width() {
                    if rule.is_background(input.get(bx, by, bz).unwrap()) {
                        let dx = bx as f64 - x as f64;
                        let dy = by as f64 - y as f64;
                        let dz = bz as f64 - z as f64;
                        let dist = dz.mul_add(dz, dx.mul_add(dx, dy * dy)).sqrt();
                        best = best.min(dist);
                    }
                }
            }
        }
        best as f32
    }

    #[test]
    fn test_sentinel_exceeds_any_distance() {
        // The farthest two voxels in an n^3 volume are 3 * (n - 1)^2 apart
        // (squared); the sentinel must beat that.
        for n in [1usize, 4, 100, MAX_DIMENSION] {
            let far = i64::from(sentinel(n));
            let reachable = 3 * (n as i64 - 1) * (n as i64 - 1);
            assert!(far > reachable);
        }
    }

    #[test]
    fn test_all_background_is_zero() {
        let shape = VolumeShape::new(4, 4, 4).unwrap();
        let input = ByteVolume::filled(shape, 0);
        let map = distance_map(&input, rule());
        assert!(map.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_all_foreground_is_zero() {
        // No background voxel exists to measure from.
        let shape = VolumeShape::new(4, 4, 4).unwrap();
        let input = ByteVolume::filled(shape, 255);
        let map = distance_map(&input, rule());
        assert!(map.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_background_voxel() {
        let shape = VolumeShape::new(5, 5, 5).unwrap();
        let mut input = ByteVolume::filled(shape, 255);
        input.set(0, 0, 0, 0);
        let map = distance_map(&input, rule());

        assert_eq!(map.get(0, 0, 0), Some(0.0));
        assert_relative_eq!(map.get(3, 0, 0).unwrap(), 3.0);
        assert_relative_eq!(map.get(0, 4, 0).unwrap(), 4.0);
        assert_relative_eq!(map.get(0, 0, 2).unwrap(), 2.0);
        assert_relative_eq!(map.get(1, 1, 1).unwrap(), 3.0f32.sqrt(), epsilon = 1e-6);
        assert_relative_eq!(map.get(4, 4, 4).unwrap(), 48.0f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_slab_distances_along_x() {
        // Background half-space at x >= 5: distance is 5 - x.
        let shape = VolumeShape::new(10, 3, 2).unwrap();
        let mut input = ByteVolume::filled(shape, 0);
        for z in 0..2 {
            for y in 0..3 {
                for x in 0..5 {
                    input.set(x, y, z, 255);
                }
            }
        }
        let map = distance_map(&input, rule());
        for z in 0..2 {
            for y in 0..3 {
                for x in 0..5 {
                    assert_relative_eq!(map.get(x, y, z).unwrap(), (5 - x) as f32);
                }
                for x in 5..10 {
                    assert_eq!(map.get(x, y, z), Some(0.0));
                }
            }
        }
    }

    #[test]
    fn test_matches_brute_force_on_patterned_volume() {
        let shape = VolumeShape::new(7, 6, 5).unwrap();
        let mut bytes = Vec::with_capacity(shape.voxel_count());
        // Deterministic scatter of background voxels.
        for i in 0..shape.voxel_count() {
            bytes.push(if (i * 31 + 7) % 11 == 0 { 0 } else { 255 });
        }
        let input = ByteVolume::from_vec(shape, bytes).unwrap();
        let map = distance_map(&input, rule());

        for z in 0..shape.depth() {
            for y in 0..shape.height() {
                for x in 0..shape.width() {
                    let expected = brute_force(&input, rule(), x, y, z);
                    assert_relative_eq!(
                        map.get(x, y, z).unwrap(),
                        expected,
                        epsilon = 1e-5,
                        max_relative = 1e-5
                    );
                }
            }
        }
    }

    #[test]
    fn test_inverse_rule_flips_roles() {
        let shape = VolumeShape::new(5, 5, 1).unwrap();
        let mut input = ByteVolume::filled(shape, 0);
        input.set(2, 2, 0, 255);

        // Plain: single foreground voxel at distance 1 from its neighbors.
        let plain = distance_map(&input, rule());
        assert_relative_eq!(plain.get(2, 2, 0).unwrap(), 1.0);

        // Inverse: the same voxel becomes the lone background seed.
        let inverted = distance_map(&input, Threshold::new(128, true).unwrap());
        assert_eq!(inverted.get(2, 2, 0), Some(0.0));
        assert_relative_eq!(inverted.get(4, 4, 0).unwrap(), 8.0f32.sqrt(), epsilon = 1e-6);
    }
}

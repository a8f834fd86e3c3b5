//! Distance ridge extraction.
//!
//! A foreground voxel belongs to the ridge when its inscribed ball is not
//! contained in any 26-neighbor's inscribed ball. Containment is decided on
//! the integer grid: a precomputed template stores, per neighbor displacement
//! class and per occurring squared radius, the smallest neighbor squared
//! radius whose grid ball covers the center ball.

// Index arithmetic on dense grids; squared radii are exact in i32.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

use rayon::prelude::*;
use tracing::debug;
use voxel_types::FloatVolume;

/// Squared radius of a stored distance, recovered as an exact integer.
///
/// Distances are square roots of integers; rounding undoes the float error.
fn round_sq(value: f32) -> i32 {
    (f64::from(value) * f64::from(value) + 0.5) as i32
}

/// Ordered unique squared distances with a dense reverse lookup.
struct DistanceIndex {
    values: Vec<i32>,
    index_of: Vec<u32>,
}

impl DistanceIndex {
    fn build(data: &[f32], r_sq_max: usize) -> Self {
        let mut occurs = vec![false; r_sq_max];
        for &value in data {
            occurs[round_sq(value) as usize] = true;
        }
        let mut values = Vec::new();
        let mut index_of = vec![0u32; r_sq_max];
        for (r_sq, &present) in occurs.iter().enumerate() {
            if present {
                index_of[r_sq] = values.len() as u32;
                values.push(r_sq as i32);
            }
        }
        Self { values, index_of }
    }

    fn index(&self, r_sq: i32) -> usize {
        self.index_of[r_sq as usize] as usize
    }
}

/// Minimum covering squared radii, indexed by displacement class (1, 2, or 3
/// nonzero offset components) and squared-radius index.
struct RidgeTemplate {
    bounds: [Vec<i32>; 3],
}

impl RidgeTemplate {
    fn build(dist_sq_values: &[i32]) -> Self {
        Self {
            bounds: [
                scan_cube(1, 0, 0, dist_sq_values),
                scan_cube(1, 1, 0, dist_sq_values),
                scan_cube(1, 1, 1, dist_sq_values),
            ],
        }
    }

    fn bound(&self, class: usize, radius_index: usize) -> i32 {
        self.bounds[class][radius_index]
    }
}

/// For each squared radius in `dist_sq_values`, the smallest squared radius
/// `r1Sq` such that the grid ball of radius `sqrt(r1Sq)` centered at
/// `(dx, dy, dz)` contains every grid point of the ball of radius `sqrt(rSq)`
/// at the origin.
///
/// One representative displacement per class suffices: the cubic lattice is
/// symmetric under axis permutation and reflection, so every 26-neighbor of
/// the same class yields the same bound.
fn scan_cube(dx: i32, dy: i32, dz: i32, dist_sq_values: &[i32]) -> Vec<i32> {
    let (dx, dy, dz) = (dx.abs(), dy.abs(), dz.abs());
    dist_sq_values
        .iter()
        .map(|&r_sq| {
            let r = 1 + f64::from(r_sq).sqrt() as i32;
            let mut max = 0;
            for k in 0..=r {
                let k_sq = k * k;
                let dk = (k + dz) * (k + dz);
                for j in 0..=r {
                    let kj_sq = k_sq + j * j;
                    if kj_sq <= r_sq {
                        // Farthest grid point of the origin ball in the
                        // octant opposite the displacement.
                        let i_plus = f64::from(r_sq - kj_sq).sqrt() as i32 + dx;
                        let reach = dk + (j + dy) * (j + dy) + i_plus * i_plus;
                        if reach > max {
                            max = reach;
                        }
                    }
                }
            }
            max
        })
        .collect()
}

/// Whether any in-bounds 26-neighbor's ball covers the ball of the voxel at
/// `(x, y, z)` (whose squared radius has index `radius_index`).
fn covered_by_neighbor(
    data: &[f32],
    dims: (usize, usize, usize),
    x: usize,
    y: usize,
    z: usize,
    template: &RidgeTemplate,
    radius_index: usize,
) -> bool {
    let (w, h, d) = dims;
    let plane = w * h;
    for dz in -1i32..=1 {
        let z1 = z as i32 + dz;
        if z1 < 0 || z1 >= d as i32 {
            continue;
        }
        for dy in -1i32..=1 {
            let y1 = y as i32 + dy;
            if y1 < 0 || y1 >= h as i32 {
                continue;
            }
            for dx in -1i32..=1 {
                let x1 = x as i32 + dx;
                if x1 < 0 || x1 >= w as i32 {
                    continue;
                }
                let class = usize::from(dx != 0) + usize::from(dy != 0) + usize::from(dz != 0);
                if class == 0 {
                    continue;
                }
                let neighbor = data[x1 as usize + (y1 as usize) * w + (z1 as usize) * plane];
                if round_sq(neighbor) >= template.bound(class - 1, radius_index) {
                    return true;
                }
            }
        }
    }
    false
}

/// Extracts the distance ridge of a distance map.
///
/// Ridge voxels keep their distance; everything else (covered foreground and
/// background alike) becomes 0. Voxels with value 0 are treated as
/// background, so the map composes directly with [`distance_map`].
///
/// [`distance_map`]: crate::distance_map
#[must_use]
pub fn distance_ridge(distance: &FloatVolume) -> FloatVolume {
    let shape = distance.shape();
    let data = distance.data();
    let dist_max = distance.max_value();
    if dist_max <= 0.0 {
        return FloatVolume::zeros(shape);
    }

    let r_sq_max = round_sq(dist_max) as usize + 1;
    let index = DistanceIndex::build(data, r_sq_max);
    let template = RidgeTemplate::build(&index.values);
    debug!(
        radii = index.values.len(),
        max_distance = dist_max,
        "ridge template built"
    );

    let (w, h, d) = (shape.width(), shape.height(), shape.depth());
    let plane = shape.slice_len();
    let mut out = FloatVolume::zeros(shape);
    out.data_mut()
        .par_chunks_mut(plane)
        .enumerate()
        .for_each(|(z, slab)| {
            for y in 0..h {
                let row = y * w;
                for x in 0..w {
                    let value = data[row + x + z * plane];
                    if value <= 0.0 {
                        continue;
                    }
                    let radius_index = index.index(round_sq(value));
                    if !covered_by_neighbor(data, (w, h, d), x, y, z, &template, radius_index) {
                        slab[row + x] = value;
                    }
                }
            }
        });
    out
}

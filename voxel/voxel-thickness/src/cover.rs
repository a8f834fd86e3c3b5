//! Ball-covering pass.
//!
//! Every ridge voxel owns an inscribed ball; the local thickness at a voxel
//! is governed by the largest such ball containing it. This pass writes, for
//! each voxel, the maximum ridge radius among the balls that cover it (the
//! doubling into diameters happens in clean-up).

// Index arithmetic on dense grids; squared radii are exact in i32.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

use rayon::prelude::*;
use tracing::debug;
use voxel_types::FloatVolume;

/// A ridge voxel and the radius of its inscribed ball.
struct RidgeBall {
    x: i32,
    y: i32,
    z: i32,
    radius: f32,
}

/// Computes the ball-covering map of a distance ridge.
///
/// Work is partitioned over output slices: each worker owns one z-slice and
/// rasterizes into it the disk cross-sections of every ridge ball reaching
/// its depth. Writes never leave the owned slice, so the pass needs no
/// synchronization, and the per-voxel maximum is order-independent.
#[must_use]
pub fn ball_cover(ridge: &FloatVolume) -> FloatVolume {
    let shape = ridge.shape();
    let (w, h) = (shape.width(), shape.height());
    let plane = shape.slice_len();

    // Scan order is z-major, so the list arrives sorted by z.
    let mut balls = Vec::new();
    for (flat, &radius) in ridge.data().iter().enumerate() {
        if radius > 0.0 {
            balls.push(RidgeBall {
                x: (flat % w) as i32,
                y: (flat / w % h) as i32,
                z: (flat / plane) as i32,
                radius,
            });
        }
    }

    let mut out = FloatVolume::zeros(shape);
    if balls.is_empty() {
        return out;
    }

    let max_radius = balls.iter().map(|b| b.radius).fold(0.0f32, f32::max);
    // Integer voxels within |dz| <= R lie within |dz| <= floor(R).
    let reach = max_radius as i32;
    debug!(balls = balls.len(), max_radius, "covering ridge balls");

    out.data_mut()
        .par_chunks_mut(plane)
        .enumerate()
        .for_each(|(z, slab)| {
            let k = z as i32;
            let lo = balls.partition_point(|b| b.z < k - reach);
            let hi = balls.partition_point(|b| b.z <= k + reach);
            for ball in &balls[lo..hi] {
                let r_sq = (f64::from(ball.radius) * f64::from(ball.radius) + 0.5) as i32;
                let dk = k - ball.z;
                let disk_sq = r_sq - dk * dk;
                if disk_sq < 0 {
                    continue;
                }
                let dj_max = f64::from(disk_sq).sqrt() as i32;
                for dj in -dj_max..=dj_max {
                    let y = ball.y + dj;
                    if y < 0 || y >= h as i32 {
                        continue;
                    }
                    let di_max = f64::from(disk_sq - dj * dj).sqrt() as i32;
                    let x0 = (ball.x - di_max).max(0) as usize;
                    let x1 = (ball.x + di_max).min(w as i32 - 1) as usize;
                    let row = y as usize * w;
                    for cell in &mut slab[row + x0..=row + x1] {
                        if ball.radius > *cell {
                            *cell = ball.radius;
                        }
                    }
                }
            }
        });
    out
}

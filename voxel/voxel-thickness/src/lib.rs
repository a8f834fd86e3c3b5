//! Local thickness maps for binary 3D volumes.
//!
//! Given a binary volume (a stack of 2D slices thresholded into foreground
//! and background), this crate assigns to every foreground voxel the diameter
//! of the largest ball that fits entirely inside the foreground and covers
//! that voxel - the model-independent thickness definition of Hildebrand and
//! Rüegsegger.
//!
//! # Pipeline
//!
//! The computation runs in four stages, each a pure function from one volume
//! to the next:
//!
//! 1. [`distance_map`] - squared Euclidean distance transform of the
//!    foreground (Saito-Toriwaki, three separable passes), finalized to
//!    plain distances
//! 2. [`distance_ridge`] - keeps only voxels whose inscribed ball is not
//!    covered by a neighbor's ball
//! 3. [`ball_cover`] - for every voxel, the largest ridge-ball radius whose
//!    ball contains it
//! 4. [`cleanup`] - replaces jagged border values by the average of interior
//!    neighbors and doubles radii into diameters
//!
//! plus an optional trim pass, [`trim_overhang`], that zeroes voxels whose
//! input classified as background. [`compute_local_thickness`] sequences all
//! of it.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero GUI or engine dependencies**. Image
//! file I/O, calibration, display palettes, and progress reporting all live
//! with the caller; the crate consumes a [`ByteVolume`] plus
//! [`ThicknessParams`] and produces a [`ThicknessMap`].
//!
//! # Example
//!
//! ```
//! use voxel_thickness::{compute_local_thickness, ThicknessParams};
//! use voxel_types::{ByteVolume, VolumeShape};
//!
//! // A solid 4x4x4 block of foreground in a 10x10x10 volume.
//! let shape = VolumeShape::new(10, 10, 10).unwrap();
//! let mut input = ByteVolume::filled(shape, 0);
//! for z in 4..8 {
//!     for y in 4..8 {
//!         for x in 4..8 {
//!             input.set(x, y, z, 255);
//!         }
//!     }
//! }
//!
//! let result = compute_local_thickness(&input, &ThicknessParams::default()).unwrap();
//! assert_eq!(result.map.get(5, 5, 5), Some(4.0));
//! ```
//!
//! # Parallelism
//!
//! Every stage partitions its output over z-slices and hands each worker a
//! disjoint writable slab, reading only immutable buffers produced before the
//! stage barrier. Results are deterministic for a fixed input and
//! configuration, independent of worker scheduling.

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod cleanup;
mod cover;
mod edt;
mod error;
mod mask;
mod params;
mod pipeline;
mod result;
mod ridge;

pub use cleanup::cleanup;
pub use cover::ball_cover;
pub use edt::distance_map;
pub use error::{ThicknessError, ThicknessResult};
pub use mask::trim_overhang;
pub use params::ThicknessParams;
pub use pipeline::{compute_local_thickness, compute_local_thickness_cancellable};
pub use result::ThicknessMap;
pub use ridge::distance_ridge;

// Re-export the foundation types so callers need a single dependency.
pub use voxel_types::{ByteVolume, FloatVolume, Threshold, VolumeError, VolumeShape};

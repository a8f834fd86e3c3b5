//! Dense 3D volume buffers for voxel processing.
//!
//! This crate provides the foundational types shared by the voxel processing
//! crates:
//!
//! - [`VolumeShape`] - Validated volume dimensions with flat indexing
//! - [`ByteVolume`] - Dense 8-bit grid (binary images under a threshold)
//! - [`FloatVolume`] - Dense 32-bit float grid (distance and thickness maps)
//! - [`Threshold`] - Foreground/background classification rule
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero GUI or engine dependencies**. It can be
//! used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Python bindings
//!
//! # Storage Layout
//!
//! Volumes are stored slice-major, row-major: the voxel at `(x, y, z)` lives
//! at flat index `x + width * (y + height * z)`. A "slice" is the XY plane at
//! a fixed z, matching the stack-of-images convention of volumetric imaging.
//!
//! # Example
//!
//! ```
//! use voxel_types::{ByteVolume, Threshold, VolumeShape};
//!
//! let shape = VolumeShape::new(4, 4, 4).unwrap();
//! let volume = ByteVolume::filled(shape, 255);
//!
//! let rule = Threshold::new(128, false).unwrap();
//! assert!(rule.is_foreground(volume.get(0, 0, 0).unwrap()));
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod classify;
mod error;
mod shape;
mod volume;

pub use classify::Threshold;
pub use error::{VolumeError, VolumeResult};
pub use shape::VolumeShape;
pub use volume::{ByteVolume, FloatVolume};

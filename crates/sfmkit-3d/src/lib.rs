#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Pinhole camera intrinsics and their rescaling.
pub mod camera;

/// I/O utilities for reading reconstruction data.
pub mod io;

/// In-memory reconstruction indexed by camera and image ids.
pub mod reconstruction;

pub use crate::camera::{CameraError, CameraIntrinsics, ScaleFactors};
pub use crate::reconstruction::Reconstruction;

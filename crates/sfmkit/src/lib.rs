#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use sfmkit_image as image;

#[doc(inline)]
pub use sfmkit_imgproc as imgproc;

#[doc(inline)]
pub use sfmkit_io as io;

#[doc(inline)]
pub use sfmkit_3d as k3d;

/// Error types for the rescaling pipeline.
pub mod error;

/// Write rescaled images and their intrinsics manifest to disk.
pub mod export;

/// Resize images and rescale their camera intrinsics to a target width.
pub mod rescale;

pub use crate::error::RescaleError;
pub use crate::export::{export_reconstruction, ManifestEntry};
pub use crate::rescale::{
    rescale_reconstruction, rescale_view, RescaleConfig, RescaledView, RescaledViews,
};

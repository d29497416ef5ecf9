use std::path::PathBuf;

use sfmkit_3d::{io::colmap::ColmapError, CameraError};
use sfmkit_image::ImageError;
use sfmkit_io::IoError;

/// An error type for the rescaling pipeline.
#[derive(thiserror::Error, Debug)]
pub enum RescaleError {
    /// Error reading or decoding an image file.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error creating or resizing an image.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error reading the reconstruction or its camera parameters.
    #[error(transparent)]
    Colmap(#[from] ColmapError),

    /// Error deriving the rescaled intrinsics.
    #[error(transparent)]
    Camera(#[from] CameraError),

    /// The image references a camera that is not part of the reconstruction.
    #[error("Image {image_id} references unknown camera {camera_id}")]
    MissingCamera {
        /// id of the image
        image_id: u32,
        /// id of the missing camera
        camera_id: u32,
    },

    /// The image name cannot be used as a path below the output directory.
    #[error("Image name {0:?} escapes the output directory")]
    InvalidOutputName(String),

    /// Two images would be written to the same output file.
    #[error("More than one image maps to output file {}", .0.display())]
    DuplicateOutput(PathBuf),

    /// Error writing the intrinsics manifest.
    #[error("Failed to write the manifest. {0}")]
    Manifest(#[from] serde_json::Error),
}

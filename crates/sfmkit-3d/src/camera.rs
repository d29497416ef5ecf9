use serde::{Deserialize, Serialize};
use sfmkit_image::ImageSize;
use thiserror::Error;

/// Error types for camera operations.
#[derive(Debug, Error, PartialEq)]
pub enum CameraError {
    /// Invalid camera intrinsics matrix
    #[error("Invalid camera intrinsics matrix: {0}")]
    InvalidIntrinsics(String),

    /// Scale factors cannot be derived from an empty image size
    #[error("Cannot derive scale factors from {0} to {1}")]
    InvalidScale(ImageSize, ImageSize),
}

/// Represents the intrinsic parameters of a pinhole camera.
///
/// Distortion coefficients of the original camera model are not part of the
/// pinhole intrinsics; they are invariant to a pure pixel rescale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length in x direction
    pub fx: f64,
    /// Focal length in y direction
    pub fy: f64,
    /// Principal point x coordinate
    pub cx: f64,
    /// Principal point y coordinate
    pub cy: f64,
}

impl CameraIntrinsics {
    /// Create camera intrinsics from focal lengths and principal point.
    pub fn new(fx: f64, fy: f64, cx: f64, cy: f64) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Create camera intrinsics from a 3x3 intrinsics matrix.
    pub fn from_matrix(k: &[[f64; 3]; 3]) -> Result<Self, CameraError> {
        if k[0][1] != 0.0 || k[1][0] != 0.0 || k[2][0] != 0.0 || k[2][1] != 0.0 || k[2][2] != 1.0
        {
            return Err(CameraError::InvalidIntrinsics(
                "Intrinsics matrix must have form [[fx, 0, cx], [0, fy, cy], [0, 0, 1]]"
                    .to_string(),
            ));
        }

        Ok(Self {
            fx: k[0][0],
            fy: k[1][1],
            cx: k[0][2],
            cy: k[1][2],
        })
    }

    /// Convert to 3x3 intrinsics matrix.
    pub fn to_matrix(&self) -> [[f64; 3]; 3] {
        [
            [self.fx, 0.0, self.cx],
            [0.0, self.fy, self.cy],
            [0.0, 0.0, 1.0],
        ]
    }

    /// Rescale the intrinsics to a resized image.
    ///
    /// `fx` and `cx` follow the horizontal factor, `fy` and `cy` the vertical one.
    pub fn scaled(&self, scale: ScaleFactors) -> Self {
        Self {
            fx: self.fx * scale.x,
            fy: self.fy * scale.y,
            cx: self.cx * scale.x,
            cy: self.cy * scale.y,
        }
    }
}

/// Per-axis ratio between a resized image and its source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    /// new width over old width
    pub x: f64,
    /// new height over old height
    pub y: f64,
}

impl ScaleFactors {
    /// Compute the factors mapping pixel coordinates of `src` onto `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`CameraError::InvalidScale`] if either size is empty.
    pub fn from_sizes(src: ImageSize, dst: ImageSize) -> Result<Self, CameraError> {
        if src.area() == 0 || dst.area() == 0 {
            return Err(CameraError::InvalidScale(src, dst));
        }

        Ok(Self {
            x: dst.width as f64 / src.width as f64,
            y: dst.height as f64 / src.height as f64,
        })
    }

    /// Whether both axes share the same factor.
    pub fn is_uniform(&self) -> bool {
        self.x == self.y
    }
}

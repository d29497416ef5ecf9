use crate::camera::CameraIntrinsics;

use super::ColmapError;

/// Represents a Colmap camera model id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraModelId {
    /// Simple pinhole camera model
    CameraModelSimplePinhole = 0,
    /// Pinhole camera model
    CameraModelPinhole = 1,
    /// Simplified radial camera model
    CameraModelSimplifiedRadial = 2,
    /// Radial camera model
    CameraModelRadial = 3,
    /// OpenCV camera model
    CameraModelOpenCV = 4,
    /// OpenCV fisheye camera model
    CameraModelOpenCVFisheye = 5,
    /// Full OpenCV camera model
    CameraModelFullOpenCV = 6,
    /// Field of view camera model
    CameraModelFOV = 7,
    /// Simple radial fisheye camera model
    CameraModelSimpleRadialFisheye = 8,
    /// Radial fisheye camera model
    CameraModelRadialFisheye = 9,
    /// Thin prism fisheye camera model
    CameraModelThinPrismFisheye = 10,
}

impl CameraModelId {
    /// Whether the model stores a single focal length shared by both axes.
    pub fn has_single_focal(&self) -> bool {
        matches!(
            self,
            CameraModelId::CameraModelSimplePinhole
                | CameraModelId::CameraModelSimplifiedRadial
                | CameraModelId::CameraModelRadial
                | CameraModelId::CameraModelSimpleRadialFisheye
                | CameraModelId::CameraModelRadialFisheye
        )
    }

    /// Number of leading parameters holding the focal length(s) and principal point.
    pub fn num_pinhole_params(&self) -> usize {
        if self.has_single_focal() {
            3
        } else {
            4
        }
    }
}

/// Represents a camera in the Colmap system.
#[derive(Debug, Clone, PartialEq)]
pub struct ColmapCamera {
    /// Camera id
    pub camera_id: u32,
    /// Camera model id
    pub model_id: CameraModelId,
    /// Image width
    pub width: usize,
    /// Image height
    pub height: usize,
    /// Camera parameters
    pub params: Vec<f64>,
}

impl ColmapCamera {
    /// Extract the pinhole intrinsics from the model parameters.
    ///
    /// Single focal models store `[f, cx, cy, ..]`, the others `[fx, fy, cx, cy, ..]`.
    /// Distortion terms after the pinhole block are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ColmapError::InvalidNumCameraParams`] if the parameter vector is too short.
    pub fn intrinsics(&self) -> Result<CameraIntrinsics, ColmapError> {
        let expected = self.model_id.num_pinhole_params();
        if self.params.len() < expected {
            return Err(ColmapError::InvalidNumCameraParams(self.params.len()));
        }

        let p = &self.params;
        let intrinsics = if self.model_id.has_single_focal() {
            CameraIntrinsics::new(p[0], p[0], p[1], p[2])
        } else {
            CameraIntrinsics::new(p[0], p[1], p[2], p[3])
        };

        Ok(intrinsics)
    }
}

/// Represents an image in the Colmap system.
#[derive(Debug, Clone, PartialEq)]
pub struct ColmapImage {
    /// Image name
    pub name: String,
    /// Image id
    pub image_id: u32,
    /// Camera id
    pub camera_id: u32,
    /// Rotation
    pub rotation: [f64; 4], // qw, qx, qy, qz
    /// Translation
    pub translation: [f64; 3], // x, y, z
    /// Points2d
    pub points2d: Vec<(f64, f64, i64)>,
}

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use super::{CameraModelId, ColmapCamera, ColmapImage};
use crate::reconstruction::Reconstruction;

/// Error types for the COLMAP module.
#[derive(Debug, thiserror::Error)]
pub enum ColmapError {
    /// Error reading or writing file
    #[error("error reading or writing file")]
    IoError(#[from] std::io::Error),

    /// Invalid number of camera parameters
    #[error("Invalid number of camera parameters: {0}")]
    InvalidNumCameraParams(usize),

    /// Parse error
    #[error("Parse error {0}")]
    ParseError(String),
}

/// Read the cameras.txt file and return a vector of ColmapCamera structs.
///
/// Comment lines starting with `#` and blank lines are skipped.
///
/// # Arguments
///
/// * `path` - The path to the cameras.txt file.
pub fn read_cameras_txt(path: impl AsRef<Path>) -> Result<Vec<ColmapCamera>, ColmapError> {
    // open the file and create a buffered reader
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let cameras = reader
        .lines()
        .filter(|line| {
            line.as_ref()
                .map_or(true, |l| !is_comment(l) && !l.trim().is_empty())
        })
        .map(|line| -> Result<ColmapCamera, ColmapError> {
            let line = line.map_err(ColmapError::from)?;
            parse_camera_line(&line)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(cameras)
}

/// Read the images.txt file and return a vector of ColmapImage structs.
///
/// Every image spans two lines: the pose line and the (possibly empty) 2D points line.
/// Comment lines starting with `#` are skipped, and blank lines are skipped while
/// looking for the next pose line.
///
/// # Arguments
///
/// * `path` - The path to the images.txt file.
pub fn read_images_txt(path: impl AsRef<Path>) -> Result<Vec<ColmapImage>, ColmapError> {
    // open the file and create a buffered reader
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let lines = reader
        .lines()
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .filter(|line| !is_comment(line))
        .collect::<Vec<_>>();

    let mut images = Vec::new();
    let mut lines = lines.iter();

    while let Some(pose_line) = lines.by_ref().find(|line| !line.trim().is_empty()) {
        // a trailing pose line without its points line has no observations
        let points_line = lines.next().map_or("", String::as_str);
        images.push(parse_image_line(pose_line, points_line)?);
    }

    Ok(images)
}

/// Read `cameras.txt` and `images.txt` from a COLMAP sparse model directory.
///
/// # Arguments
///
/// * `dir` - The directory containing the text model.
pub fn read_reconstruction_txt(dir: impl AsRef<Path>) -> Result<Reconstruction, ColmapError> {
    let dir = dir.as_ref();
    let cameras = read_cameras_txt(dir.join("cameras.txt"))?;
    let images = read_images_txt(dir.join("images.txt"))?;
    Ok(Reconstruction::new(cameras, images))
}

fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Utility functions for parsing COLMAP text files
fn parse_part<T: std::str::FromStr>(s: &str) -> Result<T, ColmapError>
where
    T::Err: std::fmt::Display,
{
    s.parse::<T>()
        .map_err(|e| ColmapError::ParseError(format!("{}: {}", s, e)))
}

fn parse_array<T, const N: usize>(parts: &[&str], what: &str) -> Result<[T; N], ColmapError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    parts
        .iter()
        .map(|s| parse_part(s))
        .collect::<Result<Vec<_>, _>>()?
        .try_into()
        .map_err(|_| ColmapError::ParseError(format!("Invalid number of {} coordinates", what)))
}

/// Parse a camera line and return a ColmapCamera struct.
/// NOTE: The number of parameters depends on the camera model.
///       CAMERA_ID, MODEL, WIDTH, HEIGHT, PARAMS[0], PARAMS[1], ...
fn parse_camera_line(line: &str) -> Result<ColmapCamera, ColmapError> {
    // split the line into parts by whitespace
    let parts = line.split_whitespace().collect::<Vec<_>>();

    if parts.len() < 5 {
        return Err(ColmapError::ParseError(format!(
            "Invalid number of parts: {}",
            parts.len()
        )));
    }

    Ok(ColmapCamera {
        camera_id: parse_part(parts[0])?,
        model_id: parse_camera_model_id(parts[1])?,
        width: parse_part(parts[2])?,
        height: parse_part(parts[3])?,
        params: parts[4..]
            .iter()
            .map(|s| parse_part(s))
            .collect::<Result<Vec<_>, _>>()?,
    })
}

fn parse_camera_model_id(model_id: &str) -> Result<CameraModelId, ColmapError> {
    match model_id {
        "SIMPLE_PINHOLE" => Ok(CameraModelId::CameraModelSimplePinhole),
        "PINHOLE" => Ok(CameraModelId::CameraModelPinhole),
        "SIMPLE_RADIAL" => Ok(CameraModelId::CameraModelSimplifiedRadial),
        "RADIAL" => Ok(CameraModelId::CameraModelRadial),
        "OPENCV" => Ok(CameraModelId::CameraModelOpenCV),
        "OPENCV_FISHEYE" => Ok(CameraModelId::CameraModelOpenCVFisheye),
        "FULL_OPENCV" => Ok(CameraModelId::CameraModelFullOpenCV),
        "FOV" => Ok(CameraModelId::CameraModelFOV),
        "SIMPLE_RADIAL_FISHEYE" => Ok(CameraModelId::CameraModelSimpleRadialFisheye),
        "RADIAL_FISHEYE" => Ok(CameraModelId::CameraModelRadialFisheye),
        "THIN_PRISM_FISHEYE" => Ok(CameraModelId::CameraModelThinPrismFisheye),
        _ => Err(ColmapError::ParseError(format!(
            "Invalid camera model id: {}",
            model_id
        ))),
    }
}

/// Parse an image line and return a ColmapImage struct.
/// #   IMAGE_ID, QW, QX, QY, QZ, TX, TY, TZ, CAMERA_ID, NAME
/// #   POINTS2D[] as (X, Y, POINT3D_ID)
fn parse_image_line(line1: &str, line2: &str) -> Result<ColmapImage, ColmapError> {
    // split the line into parts by whitespace
    let parts1 = line1.split_whitespace().collect::<Vec<_>>();
    let parts2 = line2.split_whitespace().collect::<Vec<_>>();

    if parts1.len() < 10 {
        return Err(ColmapError::ParseError(format!(
            "Invalid number of parts: {}",
            parts1.len()
        )));
    }

    Ok(ColmapImage {
        image_id: parse_part(parts1[0])?,
        rotation: parse_array(&parts1[1..5], "rotation")?,
        translation: parse_array(&parts1[5..8], "translation")?,
        camera_id: parse_part(parts1[8])?,
        name: parts1[9].to_string(),
        points2d: parts2
            .chunks_exact(3)
            .map(|chunk| -> Result<(f64, f64, i64), ColmapError> {
                Ok((
                    parse_part(chunk[0])?,
                    parse_part(chunk[1])?,
                    parse_part(chunk[2])?,
                ))
            })
            .collect::<Result<Vec<_>, _>>()?,
    })
}

//! Pixel interpolation modes used when resampling images.
//!
//! - **Nearest**: fastest, uses the nearest pixel value
//! - **Bilinear**: linear interpolation between adjacent pixels
//! - **Bicubic**: Catmull-Rom cubic convolution
//! - **Lanczos3**: windowed sinc with a support of three pixels

use std::str::FromStr;

/// Interpolation mode for the resize operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Nearest neighbor interpolation
    Nearest,
    /// Bilinear interpolation
    Bilinear,
    /// Bicubic (Catmull-Rom) interpolation
    #[default]
    Bicubic,
    /// Lanczos interpolation with a 3 pixel window
    Lanczos3,
}

/// Error returned when parsing an unknown interpolation mode name.
#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Unknown interpolation mode: {0}. Expected one of nearest, bilinear, bicubic, lanczos3")]
pub struct ParseInterpolationError(pub String);

impl FromStr for InterpolationMode {
    type Err = ParseInterpolationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(InterpolationMode::Nearest),
            "bilinear" => Ok(InterpolationMode::Bilinear),
            "bicubic" => Ok(InterpolationMode::Bicubic),
            "lanczos3" | "lanczos" => Ok(InterpolationMode::Lanczos3),
            _ => Err(ParseInterpolationError(s.to_string())),
        }
    }
}

impl std::fmt::Display for InterpolationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            InterpolationMode::Nearest => "nearest",
            InterpolationMode::Bilinear => "bilinear",
            InterpolationMode::Bicubic => "bicubic",
            InterpolationMode::Lanczos3 => "lanczos3",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::{InterpolationMode, ParseInterpolationError};

    #[test]
    fn parse_modes() -> Result<(), ParseInterpolationError> {
        assert_eq!("nearest".parse::<InterpolationMode>()?, InterpolationMode::Nearest);
        assert_eq!("Bilinear".parse::<InterpolationMode>()?, InterpolationMode::Bilinear);
        assert_eq!("lanczos".parse::<InterpolationMode>()?, InterpolationMode::Lanczos3);
        assert!("area".parse::<InterpolationMode>().is_err());
        Ok(())
    }

    #[test]
    fn display_roundtrip() -> Result<(), ParseInterpolationError> {
        let mode = InterpolationMode::default();
        assert_eq!(mode, InterpolationMode::Bicubic);
        assert_eq!(mode.to_string().parse::<InterpolationMode>()?, mode);
        Ok(())
    }
}

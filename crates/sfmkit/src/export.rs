use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use sfmkit_3d::{CameraIntrinsics, Reconstruction};
use sfmkit_io::{write_image_png_rgb8, IoError};

use crate::error::RescaleError;
use crate::rescale::{for_each_view, RescaleConfig};

/// File name of the manifest written next to the resized images.
pub const MANIFEST_FILE_NAME: &str = "intrinsics.json";

/// One record of the manifest describing a written image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// id of the source image in the reconstruction
    pub image_id: u32,
    /// file name of the source image
    pub name: String,
    /// path of the written PNG, relative to the output directory
    pub file: PathBuf,
    /// width of the written image in pixels
    pub width: usize,
    /// height of the written image in pixels
    pub height: usize,
    /// intrinsics rescaled to the written image
    pub intrinsics: CameraIntrinsics,
}

/// Map an image name onto a PNG path relative to the output directory.
///
/// Names that already end in `.png` are kept, any other name gets `.png`
/// appended so that `a.jpg` and `a.png` land in different files.
///
/// # Errors
///
/// Returns [`RescaleError::InvalidOutputName`] for empty or absolute names and
/// names containing `..`.
pub fn output_file_name(name: &str) -> Result<PathBuf, RescaleError> {
    let mut file = PathBuf::new();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => file.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(RescaleError::InvalidOutputName(name.to_string()));
            }
        }
    }
    if file.as_os_str().is_empty() {
        return Err(RescaleError::InvalidOutputName(name.to_string()));
    }

    if file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
    {
        return Ok(file);
    }

    let mut file = file.into_os_string();
    file.push(".png");
    Ok(PathBuf::from(file))
}

/// Rescale a reconstruction and write the result to a directory.
///
/// Every image is written as PNG under `output_dir`, keeping the directory
/// layout of its name, and the rescaled intrinsics of all images are written
/// to [`MANIFEST_FILE_NAME`] in ascending image id order.
///
/// Output names are checked for every image before anything is decoded or
/// written.
///
/// # Arguments
///
/// * `recon` - The reconstruction providing images and cameras.
/// * `image_dir` - The directory containing the image files.
/// * `output_dir` - The directory to write the images and manifest to.
/// * `config` - The rescaling options.
///
/// # Returns
///
/// The manifest entries, in the order they were written.
pub fn export_reconstruction(
    recon: &Reconstruction,
    image_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    config: &RescaleConfig,
) -> Result<Vec<ManifestEntry>, RescaleError> {
    let output_dir = output_dir.as_ref();

    let mut seen = HashSet::with_capacity(recon.num_images());
    for image in recon.images.values() {
        let file = output_file_name(&image.name)?;
        if !seen.insert(file.clone()) {
            return Err(RescaleError::DuplicateOutput(file));
        }
    }

    std::fs::create_dir_all(output_dir).map_err(IoError::from)?;

    let mut entries = Vec::with_capacity(recon.num_images());
    for_each_view(recon, image_dir, config, |view| {
        let file = output_file_name(&view.name)?;
        let out_path = output_dir.join(&file);
        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent).map_err(IoError::from)?;
        }
        write_image_png_rgb8(&out_path, &view.image)?;

        log::debug!("wrote {}", out_path.display());

        entries.push(ManifestEntry {
            image_id: view.image_id,
            name: view.name,
            file,
            width: view.image.width(),
            height: view.image.height(),
            intrinsics: view.intrinsics,
        });
        Ok(())
    })?;

    let manifest = std::fs::File::create(output_dir.join(MANIFEST_FILE_NAME))
        .map_err(IoError::from)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(manifest), &entries)?;

    log::info!(
        "wrote {} images and {} to {}",
        entries.len(),
        MANIFEST_FILE_NAME,
        output_dir.display()
    );

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_name_keeps_png() -> Result<(), RescaleError> {
        assert_eq!(output_file_name("a.png")?, PathBuf::from("a.png"));
        assert_eq!(output_file_name("a.PNG")?, PathBuf::from("a.PNG"));
        assert_eq!(output_file_name("sub/b.png")?, PathBuf::from("sub/b.png"));
        assert_eq!(output_file_name("./a.png")?, output_file_name("a.png")?);
        Ok(())
    }

    #[test]
    fn output_name_appends_png() -> Result<(), RescaleError> {
        assert_eq!(output_file_name("a.jpg")?, PathBuf::from("a.jpg.png"));
        assert_eq!(output_file_name("a")?, PathBuf::from("a.png"));
        assert_eq!(output_file_name("a.png.jpg")?, PathBuf::from("a.png.jpg.png"));
        assert_ne!(output_file_name("a.jpg")?, output_file_name("a.png")?);
        Ok(())
    }

    #[test]
    fn output_name_rejects_escapes() {
        for name in ["../x.png", "sub/../../x.jpg", "/tmp/x.png", "", "."] {
            assert!(
                matches!(
                    output_file_name(name),
                    Err(RescaleError::InvalidOutputName(ref n)) if n == name
                ),
                "{name:?} should be rejected"
            );
        }
    }
}

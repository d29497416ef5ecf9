use std::path::Path;

use sfmkit_3d::{
    io::colmap::{ColmapCamera, ColmapImage},
    CameraIntrinsics, Reconstruction, ScaleFactors,
};
use sfmkit_image::{Image, ImageError, ImageSize};
use sfmkit_imgproc::{interpolation::InterpolationMode, resize::resize_to_width};
use sfmkit_io::read_image_any_rgb8;

use crate::error::RescaleError;

/// Default width of the rescaled images, in pixels.
pub const DEFAULT_TARGET_WIDTH: usize = 400;

/// Options of a rescaling pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RescaleConfig {
    /// Width of every output image in pixels.
    pub target_width: usize,
    /// Resampling filter used to resize the images.
    pub interpolation: InterpolationMode,
}

impl Default for RescaleConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            interpolation: InterpolationMode::default(),
        }
    }
}

/// One resized image together with the intrinsics valid for it.
#[derive(Debug, Clone)]
pub struct RescaledView {
    /// id of the source image in the reconstruction
    pub image_id: u32,
    /// file name of the source image
    pub name: String,
    /// size of the decoded source file
    pub source_size: ImageSize,
    /// the resized image
    pub image: Image<u8, 3>,
    /// intrinsics rescaled to the size of `image`
    pub intrinsics: CameraIntrinsics,
    /// ratio between the resized and the source image
    pub scale: ScaleFactors,
}

impl RescaledView {
    /// The resized image with its values mapped to `[0, 1]`.
    pub fn normalized(&self) -> Result<Image<f32, 3>, ImageError> {
        self.image.cast_and_scale::<f32>(1.0 / 255.0)
    }
}

/// The output of a full pass: parallel collections, one entry per source image.
///
/// The n-th entry of every collection refers to the same source image.
#[derive(Debug, Clone, Default)]
pub struct RescaledViews {
    /// ids of the source images
    pub image_ids: Vec<u32>,
    /// file names of the source images
    pub names: Vec<String>,
    /// resized images with values in `[0, 1]`
    pub images: Vec<Image<f32, 3>>,
    /// rescaled 3x3 intrinsics matrices
    pub intrinsics: Vec<[[f64; 3]; 3]>,
}

impl RescaledViews {
    /// Number of views.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no view was produced.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Append a view to every collection at once.
    pub fn push(&mut self, view: RescaledView) -> Result<(), ImageError> {
        let image = view.normalized()?;
        self.image_ids.push(view.image_id);
        self.names.push(view.name);
        self.images.push(image);
        self.intrinsics.push(view.intrinsics.to_matrix());
        Ok(())
    }
}

/// Resize a single image of the reconstruction and rescale its camera intrinsics.
///
/// The scale factors are taken from the decoded file, so the intrinsics stay
/// consistent even when the camera record stores a different resolution.
///
/// # Arguments
///
/// * `image` - The image record.
/// * `camera` - The camera that captured the image.
/// * `image_dir` - The directory containing the image files.
/// * `config` - The rescaling options.
pub fn rescale_view(
    image: &ColmapImage,
    camera: &ColmapCamera,
    image_dir: impl AsRef<Path>,
    config: &RescaleConfig,
) -> Result<RescaledView, RescaleError> {
    let intrinsics = camera.intrinsics()?;

    let img = read_image_any_rgb8(image_dir.as_ref().join(&image.name))?;
    let resized = resize_to_width(&img, config.target_width, config.interpolation)?;

    let scale = ScaleFactors::from_sizes(img.size(), resized.size())?;

    log::debug!(
        "image {} ({}): {}x{} -> {}x{}, scale ({:.4}, {:.4})",
        image.image_id,
        image.name,
        img.width(),
        img.height(),
        resized.width(),
        resized.height(),
        scale.x,
        scale.y
    );

    Ok(RescaledView {
        image_id: image.image_id,
        name: image.name.clone(),
        source_size: img.size(),
        image: resized,
        intrinsics: intrinsics.scaled(scale),
        scale,
    })
}

/// Visit the images of a reconstruction in ascending id order, rescaling each
/// one and handing it to `f`. Stops at the first error.
pub(crate) fn for_each_view<F>(
    recon: &Reconstruction,
    image_dir: impl AsRef<Path>,
    config: &RescaleConfig,
    mut f: F,
) -> Result<(), RescaleError>
where
    F: FnMut(RescaledView) -> Result<(), RescaleError>,
{
    let image_dir = image_dir.as_ref();
    for image in recon.images.values() {
        let camera = recon
            .camera_for(image)
            .ok_or(RescaleError::MissingCamera {
                image_id: image.image_id,
                camera_id: image.camera_id,
            })?;

        f(rescale_view(image, camera, image_dir, config)?)?;
    }
    Ok(())
}

/// Resize every image of a reconstruction and rescale the matching intrinsics.
///
/// Images are visited in ascending id order. The first failure aborts the pass.
///
/// # Arguments
///
/// * `recon` - The reconstruction providing images and cameras.
/// * `image_dir` - The directory containing the image files.
/// * `config` - The rescaling options.
///
/// # Returns
///
/// Parallel collections of normalized images and 3x3 intrinsics matrices.
pub fn rescale_reconstruction(
    recon: &Reconstruction,
    image_dir: impl AsRef<Path>,
    config: &RescaleConfig,
) -> Result<RescaledViews, RescaleError> {
    let mut views = RescaledViews::default();
    for_each_view(recon, image_dir, config, |view| Ok(views.push(view)?))?;

    log::info!(
        "rescaled {} images to width {} ({})",
        views.len(),
        config.target_width,
        config.interpolation
    );

    Ok(views)
}

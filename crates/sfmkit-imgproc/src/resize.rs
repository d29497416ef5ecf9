use crate::interpolation::InterpolationMode;
use fast_image_resize as fr;
use sfmkit_image::{Image, ImageError, ImageSize};

/// Compute the size of an image scaled to `target_width` keeping its aspect ratio.
///
/// The new height is `round(height * target_width / width)` and never drops below one pixel.
///
/// # Arguments
///
/// * `src` - The size of the source image.
/// * `target_width` - The width of the output image.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if the source is empty or the target width is zero.
///
/// # Example
///
/// ```
/// use sfmkit_image::ImageSize;
/// use sfmkit_imgproc::resize::aspect_preserving_size;
///
/// let size = aspect_preserving_size(ImageSize { width: 640, height: 480 }, 400).unwrap();
///
/// assert_eq!(size, ImageSize { width: 400, height: 300 });
/// ```
pub fn aspect_preserving_size(
    src: ImageSize,
    target_width: usize,
) -> Result<ImageSize, ImageError> {
    if src.width == 0 || src.height == 0 || target_width == 0 {
        return Err(ImageError::InvalidImageSize(
            src.width,
            src.height,
            target_width,
            0,
        ));
    }

    let height = (src.height as f64 * target_width as f64 / src.width as f64).round() as usize;

    Ok(ImageSize {
        width: target_width,
        height: height.max(1),
    })
}

/// Resize an image to a new size using the [fast_image_resize](https://crates.io/crates/fast_image_resize) crate.
///
/// The size of `dst` defines the output size. Only 3-channel u8 images are supported.
///
/// # Arguments
///
/// * `src` - The input image container with 3 channels.
/// * `dst` - The output image container, already allocated with the new size.
/// * `interpolation` - The interpolation mode to use.
///
/// # Example
///
/// ```
/// use sfmkit_image::{Image, ImageSize};
/// use sfmkit_imgproc::interpolation::InterpolationMode;
/// use sfmkit_imgproc::resize::resize_fast;
///
/// let image = Image::<_, 3>::new(
///   ImageSize {
///     width: 4,
///     height: 5,
///   },
///   vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///   width: 2,
///   height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0).unwrap();
///
/// resize_fast(&image, &mut image_resized, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
///
/// # Errors
///
/// The function returns an error if either image is empty or the backend fails.
pub fn resize_fast(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.size().area() == 0 || dst.size().area() == 0 {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    // prepare the input image for the fast_image_resize crate
    let src_image = fr::images::ImageRef::new(
        src.width() as u32,
        src.height() as u32,
        src.as_slice(),
        fr::PixelType::U8x3,
    )
    .map_err(|e| ImageError::ResizeError(e.to_string()))?;

    // prepare the output image for the fast_image_resize crate
    let (dst_width, dst_height) = (dst.width() as u32, dst.height() as u32);
    let mut dst_image = fr::images::Image::from_slice_u8(
        dst_width,
        dst_height,
        dst.as_slice_mut(),
        fr::PixelType::U8x3,
    )
    .map_err(|e| ImageError::ResizeError(e.to_string()))?;

    let options = fr::ResizeOptions::new().resize_alg(resize_alg(interpolation));

    fr::Resizer::new()
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| ImageError::ResizeError(e.to_string()))?;

    Ok(())
}

/// Resize an image to `target_width` pixels wide, keeping its aspect ratio.
///
/// # Arguments
///
/// * `src` - The input image container with 3 channels.
/// * `target_width` - The width of the output image.
/// * `interpolation` - The interpolation mode to use.
///
/// # Returns
///
/// A new image whose width is exactly `target_width`.
pub fn resize_to_width(
    src: &Image<u8, 3>,
    target_width: usize,
    interpolation: InterpolationMode,
) -> Result<Image<u8, 3>, ImageError> {
    let new_size = aspect_preserving_size(src.size(), target_width)?;

    // nothing to resample
    if new_size == src.size() {
        return Ok(src.clone());
    }

    let mut dst = Image::from_size_val(new_size, 0u8)?;
    resize_fast(src, &mut dst, interpolation)?;

    Ok(dst)
}

fn resize_alg(interpolation: InterpolationMode) -> fr::ResizeAlg {
    match interpolation {
        InterpolationMode::Nearest => fr::ResizeAlg::Nearest,
        InterpolationMode::Bilinear => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
        InterpolationMode::Bicubic => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
        InterpolationMode::Lanczos3 => fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3),
    }
}

use std::path::Path;

use sfmkit_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path and converts it to RGB8.
///
/// The method tries to read from any image format supported by the image crate,
/// guessing the format from the file content. Grayscale, alpha and 16-bit images
/// are converted to three 8-bit channels.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An RGB image containing the decoded pixel data.
///
/// # Errors
///
/// Returns [`IoError::FileDoesNotExist`] if the path does not exist and
/// [`IoError::ImageDecodeError`] if the content cannot be decoded.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

#[cfg(test)]
mod tests {
    use crate::error::IoError;
    use crate::functional::read_image_any_rgb8;
    use crate::png::write_image_png_rgb8;
    use sfmkit_image::Image;

    #[test]
    fn read_any_png() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gradient.png");

        let data = (0..6 * 4 * 3).map(|v| v as u8).collect::<Vec<_>>();
        let image = Image::<u8, 3>::new([6, 4].into(), data)?;
        write_image_png_rgb8(&file_path, &image)?;

        let image_back = read_image_any_rgb8(&file_path)?;
        assert_eq!(image_back.size().width, 6);
        assert_eq!(image_back.size().height, 4);
        assert_eq!(image_back.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn read_any_gray_as_rgb() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("gray.png");

        image::GrayImage::from_pixel(3, 2, image::Luma([7u8])).save(&file_path)?;

        let image = read_image_any_rgb8(&file_path)?;
        assert_eq!(image.size().width, 3);
        assert_eq!(image.size().height, 2);
        assert!(image.as_slice().iter().all(|&v| v == 7));

        Ok(())
    }

    #[test]
    fn read_missing_file() {
        let res = read_image_any_rgb8("does/not/exist.jpg");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_garbage_file() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("broken.png");
        std::fs::write(&file_path, b"not an image")?;

        let res = read_image_any_rgb8(&file_path);
        assert!(matches!(res, Err(IoError::ImageDecodeError(_))));

        Ok(())
    }
}

use std::path::Path;

use approx::assert_relative_eq;
use sfmkit::image::{Image, ImageSize};
use sfmkit::imgproc::interpolation::InterpolationMode;
use sfmkit::io::write_image_png_rgb8;
use sfmkit::k3d::io::colmap::read_reconstruction_txt;
use sfmkit::{rescale_reconstruction, RescaleConfig};

const CAMERAS_TXT: &str = "\
# Camera list with one line of data per camera:
#   CAMERA_ID, MODEL, WIDTH, HEIGHT, PARAMS[]
# Number of cameras: 2
1 PINHOLE 640 480 500 520 320 240
2 SIMPLE_RADIAL 1000 333 900 500 166.5 -0.02
";

// image ids are deliberately out of order in the file
const IMAGES_TXT: &str = "\
# Image list with two lines of data per image:
#   IMAGE_ID, QW, QX, QY, QZ, TX, TY, TZ, CAMERA_ID, NAME
#   POINTS2D[] as (X, Y, POINT3D_ID)
3 1 0 0 0 0 0 0 2 wide.png

1 1 0 0 0 0 0 0 1 first.png
320 240 -1
2 1 0 0 0 0 0 0 1 second.png

";

fn write_checkerboard(
    path: impl AsRef<Path>,
    size: ImageSize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut data = Vec::with_capacity(size.area() * 3);
    for y in 0..size.height {
        for x in 0..size.width {
            let v = if (x / 8 + y / 8) % 2 == 0 { 255 } else { 0 };
            data.extend_from_slice(&[v, v / 2, 255 - v]);
        }
    }
    write_image_png_rgb8(path, &Image::<u8, 3>::new(size, data)?)?;
    Ok(())
}

#[test]
fn rescale_colmap_text_model() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    let model_dir = tmp_dir.path().join("sparse");
    let image_dir = tmp_dir.path().join("images");
    std::fs::create_dir_all(&model_dir)?;
    std::fs::create_dir_all(&image_dir)?;

    std::fs::write(model_dir.join("cameras.txt"), CAMERAS_TXT)?;
    std::fs::write(model_dir.join("images.txt"), IMAGES_TXT)?;

    write_checkerboard(image_dir.join("first.png"), [640, 480].into())?;
    write_checkerboard(image_dir.join("second.png"), [640, 480].into())?;
    write_checkerboard(image_dir.join("wide.png"), [1000, 333].into())?;

    let recon = read_reconstruction_txt(&model_dir)?;
    let config = RescaleConfig {
        target_width: 400,
        interpolation: InterpolationMode::Bicubic,
    };
    let views = rescale_reconstruction(&recon, &image_dir, &config)?;

    // lock-step collections in ascending image id order
    assert_eq!(views.len(), 3);
    assert_eq!(views.image_ids, vec![1, 2, 3]);
    assert_eq!(views.names, vec!["first.png", "second.png", "wide.png"]);
    assert_eq!(views.intrinsics.len(), views.images.len());

    for (image, k) in views.images.iter().zip(&views.intrinsics) {
        assert_eq!(image.width(), 400);
        assert_eq!(k[0][1], 0.0);
        assert_eq!(k[1][0], 0.0);
        assert_eq!(k[2], [0.0, 0.0, 1.0]);
        assert!(image.as_slice().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    // 640x480 -> 400x300, uniform scale
    assert_eq!(views.images[0].height(), 300);
    let k = views.intrinsics[0];
    assert_relative_eq!(k[0][0], 312.5, epsilon = 1e-9);
    assert_relative_eq!(k[1][1], 325.0, epsilon = 1e-9);
    assert_relative_eq!(k[0][2], 200.0, epsilon = 1e-9);
    assert_relative_eq!(k[1][2], 150.0, epsilon = 1e-9);
    assert_relative_eq!(k[0][0] / 500.0, k[1][1] / 520.0, epsilon = 1e-12);

    // 1000x333 -> 400x133, the axes scale independently
    let wide = &views.images[2];
    assert_eq!(wide.height(), 133);
    let (sx, sy) = (400.0 / 1000.0, 133.0 / 333.0);
    let k = views.intrinsics[2];
    assert_relative_eq!(k[0][0], 900.0 * sx, epsilon = 1e-9);
    assert_relative_eq!(k[1][1], 900.0 * sy, epsilon = 1e-9);
    assert_relative_eq!(k[0][2], 500.0 * sx, epsilon = 1e-9);
    assert_relative_eq!(k[1][2], 166.5 * sy, epsilon = 1e-9);
    assert!((k[0][0] / 900.0 - k[1][1] / 900.0).abs() > 1e-6);

    // aspect ratio preserved within half a pixel of rounding
    let expected_height = 333.0 * 400.0 / 1000.0;
    assert!((wide.height() as f64 - expected_height).abs() <= 0.5);

    Ok(())
}

#[test]
fn rescale_fails_on_missing_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempfile::tempdir()?;
    std::fs::write(tmp_dir.path().join("cameras.txt"), CAMERAS_TXT)?;
    std::fs::write(tmp_dir.path().join("images.txt"), IMAGES_TXT)?;

    let recon = read_reconstruction_txt(tmp_dir.path())?;
    let res = rescale_reconstruction(&recon, tmp_dir.path(), &RescaleConfig::default());
    assert!(res.is_err());

    Ok(())
}

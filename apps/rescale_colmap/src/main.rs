use argh::FromArgs;
use std::path::PathBuf;

use sfmkit::imgproc::interpolation::InterpolationMode;
use sfmkit::k3d::io::colmap;
use sfmkit::RescaleConfig;

#[derive(FromArgs)]
/// Resize the images of a COLMAP reconstruction and rescale their intrinsics
struct Args {
    /// path to the COLMAP text model (cameras.txt, images.txt)
    #[argh(option)]
    colmap_path: PathBuf,

    /// path to the directory containing the images
    #[argh(option)]
    image_dir: PathBuf,

    /// width of the resized images in pixels
    #[argh(option, default = "sfmkit::rescale::DEFAULT_TARGET_WIDTH")]
    target_width: usize,

    /// interpolation mode: nearest, bilinear, bicubic or lanczos3
    #[argh(option, default = "InterpolationMode::default()")]
    interpolation: InterpolationMode,

    /// directory to write the resized images and intrinsics.json to
    #[argh(option)]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let config = RescaleConfig {
        target_width: args.target_width,
        interpolation: args.interpolation,
    };

    // read the cameras and images
    let recon = colmap::read_reconstruction_txt(&args.colmap_path)?;
    log::info!(
        "loaded {} cameras and {} images from {}",
        recon.num_cameras(),
        recon.num_images(),
        args.colmap_path.display()
    );

    let Some(output_dir) = args.output_dir else {
        let views = sfmkit::rescale_reconstruction(&recon, &args.image_dir, &config)?;
        for (name, k) in views.names.iter().zip(&views.intrinsics) {
            log::info!(
                "{name}: fx={:.3} fy={:.3} cx={:.3} cy={:.3}",
                k[0][0],
                k[1][1],
                k[0][2],
                k[1][2]
            );
        }
        return Ok(());
    };

    let entries = sfmkit::export_reconstruction(&recon, &args.image_dir, &output_dir, &config)?;
    for entry in &entries {
        log::debug!("{} -> {}", entry.name, entry.file.display());
    }

    Ok(())
}

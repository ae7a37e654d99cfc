use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use feedwatch_core::annotate::render_overlay;
use feedwatch_core::detection::{estimate_density_with_mask, select_region};
use feedwatch_core::io::calibration_store::FileCalibrationStore;
use feedwatch_core::io::image_io::{load_frame, save_mask_png, save_rgb_image};
use feedwatch_core::level::{calibrate, load_or_calibrate, normalize};

use super::load_config;
use crate::report::print_measurement;

#[derive(Args)]
pub struct MeasureArgs {
    /// Photo of the hopper to measure
    pub photo: PathBuf,

    /// Monitor config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Calibrate from this empty-hopper photo instead of the stored calibration
    #[arg(long, requires = "full")]
    pub empty: Option<PathBuf>,

    /// Calibrate from this full-hopper photo instead of the stored calibration
    #[arg(long, requires = "empty")]
    pub full: Option<PathBuf>,

    /// Write the material mask as a PNG
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Write the annotated result image
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &MeasureArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;

    let reference = match (&args.empty, &args.full) {
        (Some(empty_path), Some(full_path)) => {
            let empty = load_frame(empty_path)
                .with_context(|| format!("Failed to load {}", empty_path.display()))?;
            let full = load_frame(full_path)
                .with_context(|| format!("Failed to load {}", full_path.display()))?;
            calibrate(
                &empty,
                &full,
                &config.estimator,
                config.calibration.contrast_ratio,
            )?
        }
        _ => {
            let store = FileCalibrationStore::new(&config.calibration.path);
            load_or_calibrate(&store, &config.calibration, &config.estimator)
                .context("Calibration unavailable")?
        }
    };

    let frame = load_frame(&args.photo)
        .with_context(|| format!("Failed to load {}", args.photo.display()))?;
    frame.ensure_measurable()?;

    let region = select_region(frame.width(), frame.height(), &config.estimator);
    let (density, mask) = estimate_density_with_mask(&frame, &region, &config.estimator)?;
    let reading = normalize(density, &reference, Local::now())?;

    print_measurement(&args.photo, &reference, &reading);

    if let Some(path) = args.mask.as_ref().or(config.output.debug_mask.as_ref()) {
        save_mask_png(&mask, path)
            .with_context(|| format!("Failed to write mask {}", path.display()))?;
        println!("Mask written to {}", path.display());
    }

    if let Some(path) = args.output.as_ref().or(config.output.overlay.as_ref()) {
        let overlay = render_overlay(&frame, &region, &reading);
        save_rgb_image(&overlay, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Result image written to {}", path.display());
    }

    Ok(())
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use feedwatch_core::io::calibration_store::{CalibrationStore, FileCalibrationStore};
use feedwatch_core::io::image_io::load_frame;
use feedwatch_core::level::calibrate;

use super::load_config;

#[derive(Args)]
pub struct CalibrateArgs {
    /// Monitor config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Photo of the empty hopper (overrides the config)
    #[arg(long)]
    pub empty: Option<PathBuf>,

    /// Photo of the full hopper (overrides the config)
    #[arg(long)]
    pub full: Option<PathBuf>,

    /// Calibration file to write (overrides the config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &CalibrateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let empty_path = args.empty.as_ref().unwrap_or(&config.calibration.empty_photo);
    let full_path = args.full.as_ref().unwrap_or(&config.calibration.full_photo);
    let store_path = args.output.as_ref().unwrap_or(&config.calibration.path);

    let empty = load_frame(empty_path)
        .with_context(|| format!("Failed to load {}", empty_path.display()))?;
    let full =
        load_frame(full_path).with_context(|| format!("Failed to load {}", full_path.display()))?;

    let reference = calibrate(
        &empty,
        &full,
        &config.estimator,
        config.calibration.contrast_ratio,
    )?;

    FileCalibrationStore::new(store_path).save(&reference)?;

    println!("Empty density: {:.2}%", reference.empty_density);
    println!("Full density:  {:.2}%", reference.full_density);
    println!("Calibration saved to {}", store_path.display());
    Ok(())
}

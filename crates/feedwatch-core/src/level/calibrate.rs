use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::consts::DEFAULT_CALIBRATION_CONTRAST_RATIO;
use crate::detection::{measure_frame, EstimatorConfig};
use crate::error::{FeedwatchError, Result};
use crate::frame::Frame;
use crate::io::calibration_store::CalibrationStore;
use crate::io::image_io::load_frame;

use super::normalize::CalibrationReference;

/// Where the calibration pair lives and how to rebuild it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Text file holding the empty and full densities, one per line.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Photo of the empty hopper.
    #[serde(default = "default_empty_photo")]
    pub empty_photo: PathBuf,
    /// Photo of the full hopper.
    #[serde(default = "default_full_photo")]
    pub full_photo: PathBuf,
    /// Warn when full density is less than this multiple of empty density.
    #[serde(default = "default_contrast_ratio")]
    pub contrast_ratio: f64,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("calibration.txt")
}
fn default_empty_photo() -> PathBuf {
    PathBuf::from("empty.jpg")
}
fn default_full_photo() -> PathBuf {
    PathBuf::from("full.jpg")
}
fn default_contrast_ratio() -> f64 {
    DEFAULT_CALIBRATION_CONTRAST_RATIO
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            empty_photo: default_empty_photo(),
            full_photo: default_full_photo(),
            contrast_ratio: DEFAULT_CALIBRATION_CONTRAST_RATIO,
        }
    }
}

/// Measure both reference photos and return the validated pair.
///
/// A weak contrast between the two photos is only a warning; an inverted or
/// equal pair is an error.
pub fn calibrate(
    empty_frame: &Frame,
    full_frame: &Frame,
    estimator: &EstimatorConfig,
    contrast_ratio: f64,
) -> Result<CalibrationReference> {
    let (_, empty_density) = measure_frame(empty_frame, estimator)?;
    let (_, full_density) = measure_frame(full_frame, estimator)?;
    info!(empty_density, full_density, "Calibration densities measured");

    if full_density < empty_density * contrast_ratio {
        warn!(
            empty_density,
            full_density,
            contrast_ratio,
            "Full and empty references differ very little; check the calibration photos"
        );
    }

    CalibrationReference::new(empty_density, full_density)
}

/// Load the stored calibration, or rebuild it from the reference photos
/// and persist it when none is stored yet.
///
/// A stored pair that fails validation is returned as an error rather than
/// silently recalibrated.
pub fn load_or_calibrate(
    store: &dyn CalibrationStore,
    config: &CalibrationConfig,
    estimator: &EstimatorConfig,
) -> Result<CalibrationReference> {
    match store.load() {
        Ok(reference) => {
            reference.validate()?;
            info!(
                empty = reference.empty_density,
                full = reference.full_density,
                "Loaded calibration"
            );
            Ok(reference)
        }
        Err(FeedwatchError::CalibrationMissing(path)) => {
            info!(path = %path.display(), "No calibration stored, calibrating from reference photos");
            let empty = load_frame(&config.empty_photo)?;
            let full = load_frame(&config.full_photo)?;
            let reference = calibrate(&empty, &full, estimator, config.contrast_ratio)?;
            store.save(&reference)?;
            Ok(reference)
        }
        Err(e) => Err(e),
    }
}

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::{FeedwatchError, Result};

use super::status::FillStatus;

/// Densities measured on known-empty and known-full reference photos.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationReference {
    pub empty_density: f64,
    pub full_density: f64,
}

impl CalibrationReference {
    /// Build and validate a reference pair.
    pub fn new(empty_density: f64, full_density: f64) -> Result<Self> {
        let reference = Self {
            empty_density,
            full_density,
        };
        reference.validate()?;
        Ok(reference)
    }

    /// The full density must strictly exceed the empty density.
    pub fn validate(&self) -> Result<()> {
        if self.full_density.is_finite()
            && self.empty_density.is_finite()
            && self.full_density > self.empty_density
        {
            Ok(())
        } else {
            Err(FeedwatchError::InvalidCalibration {
                empty: self.empty_density,
                full: self.full_density,
            })
        }
    }

    /// Width of the calibrated density range.
    pub fn range(&self) -> f64 {
        self.full_density - self.empty_density
    }
}

/// One calibrated measurement of the hopper.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelReading {
    /// Fill level in [0, 100].
    pub level: f64,
    pub status: FillStatus,
    /// Raw density the level was derived from.
    pub density: f64,
    pub timestamp: DateTime<Local>,
}

/// Map a raw density onto the calibrated 0-100% range and bucket it.
pub fn normalize(
    raw_density: f64,
    calibration: &CalibrationReference,
    timestamp: DateTime<Local>,
) -> Result<LevelReading> {
    calibration.validate()?;

    let level = ((raw_density - calibration.empty_density) / calibration.range() * 100.0)
        .clamp(0.0, 100.0);

    Ok(LevelReading {
        level,
        status: FillStatus::from_level(level),
        density: raw_density,
        timestamp,
    })
}

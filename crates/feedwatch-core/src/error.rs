use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedwatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Capture failed: {0}")]
    Capture(String),

    #[error("Invalid calibration: full density {full:.2}% must exceed empty density {empty:.2}%")]
    InvalidCalibration { empty: f64, full: f64 },

    #[error("Calibration not found at {0}")]
    CalibrationMissing(PathBuf),

    #[error("Malformed calibration file: {0}")]
    CalibrationParse(String),

    #[error("Actuator error: {0}")]
    Actuator(String),

    #[error("Notification failed: {0}")]
    Notification(String),
}

pub type Result<T> = std::result::Result<T, FeedwatchError>;

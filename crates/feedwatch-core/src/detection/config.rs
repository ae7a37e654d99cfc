use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BLUR_KERNEL_SIZE, DEFAULT_BRIGHTNESS_THRESHOLD, DEFAULT_MARGIN_X, DEFAULT_MARGIN_Y,
    DEFAULT_MORPH_KERNEL_SIZE, DEFAULT_VALUE_THRESHOLD,
};

/// Tuning parameters for region selection and density estimation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Fraction of the width excluded on each side, in [0.0, 0.5).
    #[serde(default = "default_margin_x")]
    pub margin_x: f32,
    /// Fraction of the height excluded on each side, in [0.0, 0.5).
    #[serde(default = "default_margin_y")]
    pub margin_y: f32,
    /// Smoothed luminance (0-255) at or below which a pixel is dark.
    #[serde(default = "default_brightness_threshold")]
    pub brightness_threshold: f32,
    /// HSV value (0-255) at or below which a pixel is near-black.
    #[serde(default = "default_value_threshold")]
    pub value_threshold: u8,
    /// Side length of the Gaussian smoothing kernel.
    #[serde(default = "default_blur_kernel_size")]
    pub blur_kernel_size: usize,
    /// Side length of the elliptical structuring element used for opening/closing.
    #[serde(default = "default_morph_kernel_size")]
    pub morph_kernel_size: usize,
}

fn default_margin_x() -> f32 {
    DEFAULT_MARGIN_X
}
fn default_margin_y() -> f32 {
    DEFAULT_MARGIN_Y
}
fn default_brightness_threshold() -> f32 {
    DEFAULT_BRIGHTNESS_THRESHOLD
}
fn default_value_threshold() -> u8 {
    DEFAULT_VALUE_THRESHOLD
}
fn default_blur_kernel_size() -> usize {
    DEFAULT_BLUR_KERNEL_SIZE
}
fn default_morph_kernel_size() -> usize {
    DEFAULT_MORPH_KERNEL_SIZE
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            margin_x: DEFAULT_MARGIN_X,
            margin_y: DEFAULT_MARGIN_Y,
            brightness_threshold: DEFAULT_BRIGHTNESS_THRESHOLD,
            value_threshold: DEFAULT_VALUE_THRESHOLD,
            blur_kernel_size: DEFAULT_BLUR_KERNEL_SIZE,
            morph_kernel_size: DEFAULT_MORPH_KERNEL_SIZE,
        }
    }
}

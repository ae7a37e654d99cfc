use ndarray::{Array2, ArrayView3};

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};

/// Convert RGB pixels to luminance on a 0-255 scale, rounded to whole
/// 8-bit gray levels.
pub fn luminance(rgb: &ArrayView3<'_, u8>) -> Array2<f32> {
    let (h, w, _) = rgb.dim();
    Array2::from_shape_fn((h, w), |(row, col)| {
        (LUMINANCE_R * rgb[[row, col, 0]] as f32
            + LUMINANCE_G * rgb[[row, col, 1]] as f32
            + LUMINANCE_B * rgb[[row, col, 2]] as f32)
            .round()
    })
}

/// The V channel of an HSV conversion: the brightest of the three channels.
///
/// Hue and saturation are never needed by the estimator, so they are not computed.
pub fn hsv_value(rgb: &ArrayView3<'_, u8>) -> Array2<u8> {
    let (h, w, _) = rgb.dim();
    Array2::from_shape_fn((h, w), |(row, col)| {
        rgb[[row, col, 0]]
            .max(rgb[[row, col, 1]])
            .max(rgb[[row, col, 2]])
    })
}

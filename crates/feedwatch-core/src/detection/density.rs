use ndarray::{Array2, Zip};
use tracing::debug;

use crate::error::{FeedwatchError, Result};
use crate::filters::color::{hsv_value, luminance};
use crate::filters::gaussian_blur::gaussian_blur_array;
use crate::frame::{Frame, Region};

use super::config::EstimatorConfig;
use super::morphology::{morphological_closing, morphological_opening, StructuringElement};
use super::region::select_region;

/// Percentage of `region` covered by dark granular material.
///
/// Always in [0, 100]. Fails only if `region` does not lie inside `frame`.
pub fn estimate_density(frame: &Frame, region: &Region, config: &EstimatorConfig) -> Result<f64> {
    estimate_density_with_mask(frame, region, config).map(|(density, _)| density)
}

/// Like [`estimate_density`], also returning the final material mask
/// (region-sized, row-major) for debugging.
///
/// Pipeline: crop -> luminance -> Gaussian blur -> dark mask, HSV value mask ->
/// AND -> opening -> closing -> count.
pub fn estimate_density_with_mask(
    frame: &Frame,
    region: &Region,
    config: &EstimatorConfig,
) -> Result<(f64, Array2<bool>)> {
    if !region.fits_within(frame.width(), frame.height()) {
        return Err(FeedwatchError::InvalidDimensions {
            width: region.width as usize,
            height: region.height as usize,
        });
    }

    // Step 1: crop.
    let pixels = frame.view_region(region);

    // Step 2: smoothed luminance, kept on whole gray levels.
    let gray =
        gaussian_blur_array(&luminance(&pixels), config.blur_kernel_size).mapv(f32::round);

    // Step 3-5: both tests must agree that the pixel is material.
    let value = hsv_value(&pixels);
    let mut mask = Array2::from_elem(gray.dim(), false);
    Zip::from(&mut mask)
        .and(&gray)
        .and(&value)
        .for_each(|m, &g, &v| {
            *m = g <= config.brightness_threshold && v <= config.value_threshold;
        });

    // Step 5a: drop specks, then fill pinholes.
    let element = StructuringElement::ellipse(config.morph_kernel_size);
    let opened = morphological_opening(&mask, &element);
    let closed = morphological_closing(&opened, &element);

    // Step 6: coverage.
    let material = closed.iter().filter(|&&v| v).count();
    let density = material as f64 / region.area() as f64 * 100.0;

    debug!(
        material,
        total = region.area(),
        density,
        "Estimated material density"
    );

    Ok((density, closed))
}

/// Select the analysis region for `frame` and estimate its density.
///
/// Rejects frames too small to measure before any analysis runs.
pub fn measure_frame(frame: &Frame, config: &EstimatorConfig) -> Result<(Region, f64)> {
    frame.ensure_measurable()?;
    let region = select_region(frame.width(), frame.height(), config);
    let density = estimate_density(frame, &region, config)?;
    Ok((region, density))
}

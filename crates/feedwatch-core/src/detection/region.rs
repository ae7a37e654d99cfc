use crate::frame::Region;

use super::config::EstimatorConfig;

/// Choose the analysis region for a frame of the given size.
///
/// A fixed fraction of each edge is dropped because the hopper walls cast
/// shadows there. The result is always non-empty and inside the frame, even
/// for out-of-range margins or tiny frames.
pub fn select_region(frame_width: usize, frame_height: usize, config: &EstimatorConfig) -> Region {
    let (x, width) = trim_axis(frame_width, config.margin_x);
    let (y, height) = trim_axis(frame_height, config.margin_y);
    Region {
        x: x as u32,
        y: y as u32,
        width: width as u32,
        height: height as u32,
    }
}

/// Returns (offset, extent) along one axis.
fn trim_axis(len: usize, fraction: f32) -> (usize, usize) {
    if len == 0 {
        return (0, 0);
    }
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 0.5)
    } else {
        0.0
    };
    // Capping at (len - 1) / 2 leaves at least one pixel after trimming both edges.
    let margin = ((len as f32 * fraction) as usize).min((len - 1) / 2);
    (margin, len - 2 * margin)
}

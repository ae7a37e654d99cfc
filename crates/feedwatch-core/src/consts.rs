/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in a color frame (R, G, B).
pub const COLOR_CHANNEL_COUNT: usize = 3;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Frames with either side shorter than this are not measured.
pub const MIN_FRAME_DIMENSION: usize = 16;

/// Default fraction of the frame width excluded on the left and right edges.
pub const DEFAULT_MARGIN_X: f32 = 0.15;

/// Default fraction of the frame height excluded on the top and bottom edges.
pub const DEFAULT_MARGIN_Y: f32 = 0.15;

/// Default luminance (0-255) at or below which a smoothed pixel counts as dark.
pub const DEFAULT_BRIGHTNESS_THRESHOLD: f32 = 100.0;

/// Default HSV value (0-255) at or below which a pixel counts as near-black.
pub const DEFAULT_VALUE_THRESHOLD: u8 = 120;

/// Default side length of the Gaussian smoothing kernel.
pub const DEFAULT_BLUR_KERNEL_SIZE: usize = 5;

/// Default side length of the elliptical structuring element.
pub const DEFAULT_MORPH_KERNEL_SIZE: usize = 5;

/// Level below which the hopper is reported as empty.
pub const LEVEL_EMPTY_BELOW: f64 = 10.0;

/// Level below which the hopper is reported as very low.
pub const LEVEL_VERY_LOW_BELOW: f64 = 25.0;

/// Level below which the hopper is reported as low.
pub const LEVEL_LOW_BELOW: f64 = 45.0;

/// Level below which the hopper is reported as medium.
pub const LEVEL_MEDIUM_BELOW: f64 = 65.0;

/// Level below which the hopper is reported as good. Anything above is full.
pub const LEVEL_GOOD_BELOW: f64 = 85.0;

/// A full reference should be at least this many times denser than the
/// empty reference, otherwise calibration logs a warning.
pub const DEFAULT_CALIBRATION_CONTRAST_RATIO: f64 = 3.0;

/// Default minimum level (%) below which a replenishment is triggered.
pub const DEFAULT_MIN_LEVEL: f64 = 20.0;

/// Default wait between cycles, in seconds.
pub const DEFAULT_CYCLE_INTERVAL_SECS: u64 = 3600;

/// Default time the dispenser is held open, in seconds.
pub const DEFAULT_DISPENSE_SECS: u64 = 3;

/// Default wait after closing the dispenser before re-measuring, in seconds.
pub const DEFAULT_SETTLE_SECS: u64 = 10;

/// Default number of frames discarded while the camera sensor warms up.
pub const DEFAULT_WARMUP_FRAMES: usize = 5;

/// History tag attached to the post-replenishment record.
pub const REPLENISHED_TAG: &str = "replenished";

/// Height in pixels of the status panel stacked above the overlay image.
pub const OVERLAY_PANEL_HEIGHT: u32 = 60;

/// Thickness in pixels of the region outline in the overlay image.
pub const OVERLAY_OUTLINE_THICKNESS: u32 = 2;

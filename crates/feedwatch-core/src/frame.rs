use ndarray::{s, Array3, ArrayView3};

use crate::consts::{COLOR_CHANNEL_COUNT, MIN_FRAME_DIMENSION};
use crate::error::{FeedwatchError, Result};

/// A single RGB photograph of the hopper.
/// Pixel data is 8 bits per channel, shape = (height, width, 3).
#[derive(Clone, Debug)]
pub struct Frame {
    data: Array3<u8>,
}

impl Frame {
    /// Wrap an RGB array. Fails unless the last axis holds exactly three channels.
    pub fn new(data: Array3<u8>) -> Result<Self> {
        let (h, w, c) = data.dim();
        if c != COLOR_CHANNEL_COUNT {
            return Err(FeedwatchError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        Ok(Self { data })
    }

    /// Build a frame filled with a single color.
    pub fn filled(width: usize, height: usize, rgb: [u8; 3]) -> Self {
        let data = Array3::from_shape_fn((height, width, COLOR_CHANNEL_COUNT), |(_, _, c)| rgb[c]);
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// RGB triple at (row, col).
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        ]
    }

    pub fn data(&self) -> &Array3<u8> {
        &self.data
    }

    /// Reject frames too small to hold a meaningful analysis region.
    pub fn ensure_measurable(&self) -> Result<()> {
        if self.width() < MIN_FRAME_DIMENSION || self.height() < MIN_FRAME_DIMENSION {
            return Err(FeedwatchError::InvalidDimensions {
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }

    /// Borrow the pixels inside `region`.
    pub fn view_region(&self, region: &Region) -> ArrayView3<'_, u8> {
        let x = region.x as usize;
        let y = region.y as usize;
        self.data.slice(s![
            y..y + region.height as usize,
            x..x + region.width as usize,
            ..
        ])
    }
}

/// A rectangle in frame coordinates selected for analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True if the rectangle is non-empty and lies inside a `width` x `height` frame.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.width > 0
            && self.height > 0
            && self.x as usize + self.width as usize <= width
            && self.y as usize + self.height as usize <= height
    }
}

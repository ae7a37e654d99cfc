use std::path::Path;

use image::{GrayImage, ImageFormat, Luma, RgbImage};
use ndarray::{Array2, Array3};

use crate::error::{FeedwatchError, Result};
use crate::frame::Frame;

/// Load a photo (JPEG, PNG, ...) as an 8-bit RGB frame.
pub fn load_frame(path: &Path) -> Result<Frame> {
    let img = image::open(path)?.to_rgb8();
    frame_from_rgb(&img)
}

/// Convert an in-memory RGB image into a frame.
pub fn frame_from_rgb(img: &RgbImage) -> Result<Frame> {
    let (w, h) = img.dimensions();
    let data = Array3::from_shape_vec((h as usize, w as usize, 3), img.as_raw().clone())
        .map_err(|_| FeedwatchError::InvalidDimensions {
            width: w as usize,
            height: h as usize,
        })?;
    Frame::new(data)
}

/// Convert a frame back into an RGB image buffer.
pub fn frame_to_rgb(frame: &Frame) -> RgbImage {
    let w = frame.width() as u32;
    let h = frame.height() as u32;
    RgbImage::from_fn(w, h, |x, y| image::Rgb(frame.pixel(y as usize, x as usize)))
}

/// Save a binary mask as an 8-bit PNG (material = white).
pub fn save_mask_png(mask: &Array2<bool>, path: &Path) -> Result<()> {
    let (h, w) = mask.dim();
    let img = GrayImage::from_fn(w as u32, h as u32, |x, y| {
        Luma([if mask[[y as usize, x as usize]] { 255 } else { 0 }])
    });
    img.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Save an RGB image, choosing the format from the file extension.
pub fn save_rgb_image(img: &RgbImage, path: &Path) -> Result<()> {
    img.save(path)?;
    Ok(())
}

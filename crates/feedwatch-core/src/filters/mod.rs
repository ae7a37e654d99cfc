pub mod color;
pub mod gaussian_blur;

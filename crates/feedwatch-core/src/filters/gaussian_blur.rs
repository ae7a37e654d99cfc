use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Sigma implied by a kernel size when none is given explicitly.
///
/// Matches the convention used by common imaging libraries for `sigma = 0`.
pub fn sigma_for_kernel_size(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Smooth a single-channel image with a fixed `size` x `size` Gaussian kernel,
/// using separable 1D convolution. Borders replicate the edge pixel.
pub fn gaussian_blur_array(data: &Array2<f32>, size: usize) -> Array2<f32> {
    if size <= 1 {
        return data.clone();
    }
    let kernel = make_gaussian_kernel(size);
    let row_pass = convolve_rows(data, &kernel);
    convolve_cols(&row_pass, &kernel)
}

fn make_gaussian_kernel(size: usize) -> Vec<f32> {
    // Even sizes have no center tap.
    let size = size | 1;
    let radius = size / 2;
    let sigma = sigma_for_kernel_size(size);
    let s2 = 2.0 * sigma * sigma;
    let mut kernel = vec![0.0f32; size];
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

fn convolve_rows(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() as isize / 2;

    let tap = |row: usize, col: usize| -> f32 {
        kernel
            .iter()
            .enumerate()
            .map(|(ki, &kv)| {
                let src_col = (col as isize + ki as isize - radius).clamp(0, w as isize - 1);
                data[[row, src_col as usize]] * kv
            })
            .sum()
    };

    convolve_with(h, w, tap)
}

fn convolve_cols(data: &Array2<f32>, kernel: &[f32]) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() as isize / 2;

    let tap = |row: usize, col: usize| -> f32 {
        kernel
            .iter()
            .enumerate()
            .map(|(ki, &kv)| {
                let src_row = (row as isize + ki as isize - radius).clamp(0, h as isize - 1);
                data[[src_row as usize, col]] * kv
            })
            .sum()
    };

    convolve_with(h, w, tap)
}

/// Evaluate `tap` at every pixel, splitting rows across threads for large images.
fn convolve_with<F>(h: usize, w: usize, tap: F) -> Array2<f32>
where
    F: Fn(usize, usize) -> f32 + Sync,
{
    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let rows: Vec<Vec<f32>> = (0..h)
            .into_par_iter()
            .map(|row| (0..w).map(|col| tap(row, col)).collect())
            .collect();

        let mut result = Array2::<f32>::zeros((h, w));
        for (row, row_data) in rows.into_iter().enumerate() {
            for (col, val) in row_data.into_iter().enumerate() {
                result[[row, col]] = val;
            }
        }
        result
    } else {
        Array2::from_shape_fn((h, w), |(row, col)| tap(row, col))
    }
}

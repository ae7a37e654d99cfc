mod common;

use approx::assert_abs_diff_eq;
use feedwatch_core::detection::{
    estimate_density, estimate_density_with_mask, measure_frame, select_region, EstimatorConfig,
};
use feedwatch_core::error::FeedwatchError;
use feedwatch_core::frame::{Frame, Region};

use common::{full_frame_estimator, hopper_frame, striped_frame, BACKGROUND, MATERIAL};

fn whole(frame: &Frame) -> Region {
    Region {
        x: 0,
        y: 0,
        width: frame.width() as u32,
        height: frame.height() as u32,
    }
}

#[test]
fn test_density_empty_hopper_is_zero() {
    let frame = Frame::filled(64, 48, BACKGROUND);
    let d = estimate_density(&frame, &whole(&frame), &EstimatorConfig::default()).unwrap();
    assert_eq!(d, 0.0);
}

#[test]
fn test_density_full_hopper_is_hundred() {
    let frame = Frame::filled(64, 48, MATERIAL);
    let d = estimate_density(&frame, &whole(&frame), &EstimatorConfig::default()).unwrap();
    assert_abs_diff_eq!(d, 100.0, epsilon = 1e-9);
}

#[test]
fn test_density_counts_material_rows() {
    let config = full_frame_estimator();
    for rows in [8, 15, 40, 70] {
        let (_, d) = measure_frame(&hopper_frame(rows), &config).unwrap();
        assert_abs_diff_eq!(d, rows as f64, epsilon = 1e-9);
    }
}

#[test]
fn test_density_ignores_colored_shadow() {
    // Deep blue is dark in luminance but bright in HSV value, so the masks disagree.
    let frame = Frame::filled(40, 40, [10, 10, 255]);
    let d = estimate_density(&frame, &whole(&frame), &EstimatorConfig::default()).unwrap();
    assert_eq!(d, 0.0);
}

#[test]
fn test_density_ignores_dim_but_not_dark_pixels() {
    // Value 115 passes the HSV test but luminance 115 fails the brightness test.
    let frame = Frame::filled(40, 40, [115, 115, 115]);
    let d = estimate_density(&frame, &whole(&frame), &EstimatorConfig::default()).unwrap();
    assert_eq!(d, 0.0);
}

#[test]
fn test_density_rounds_luminance_to_gray_levels() {
    // Luminance 100.23 rounds to gray level 100, which is at the dark threshold.
    let frame = Frame::filled(40, 40, [100, 100, 102]);
    let d = estimate_density(&frame, &whole(&frame), &EstimatorConfig::default()).unwrap();
    assert_abs_diff_eq!(d, 100.0, epsilon = 1e-9);
}

#[test]
fn test_density_removes_isolated_specks() {
    let mut data = Frame::filled(50, 50, BACKGROUND).data().clone();
    for &(row, col) in &[(10, 10), (25, 30), (40, 5)] {
        for c in 0..3 {
            data[[row, col, c]] = 0;
        }
    }
    let frame = Frame::new(data).unwrap();
    let d = estimate_density(&frame, &whole(&frame), &EstimatorConfig::default()).unwrap();
    assert_eq!(d, 0.0);
}

#[test]
fn test_density_always_in_range() {
    let config = EstimatorConfig::default();
    for seed in 0u32..12 {
        let mut data = Frame::filled(48, 36, BACKGROUND).data().clone();
        let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
        for v in data.iter_mut() {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            *v = (state % 256) as u8;
        }
        let frame = Frame::new(data).unwrap();
        let region = select_region(frame.width(), frame.height(), &config);
        let d = estimate_density(&frame, &region, &config).unwrap();
        assert!((0.0..=100.0).contains(&d), "seed {seed}: {d}");
    }
}

#[test]
fn test_density_uses_only_region() {
    // Material only in the top 10% which the default 15% margin excludes.
    let frame = striped_frame(100, 100, 10);
    let (region, d) = measure_frame(&frame, &EstimatorConfig::default()).unwrap();
    assert_eq!(region.y, 15);
    assert_eq!(d, 0.0);
}

#[test]
fn test_mask_matches_region_size() {
    let frame = hopper_frame(30);
    let config = EstimatorConfig::default();
    let region = select_region(frame.width(), frame.height(), &config);
    let (d, mask) = estimate_density_with_mask(&frame, &region, &config).unwrap();
    assert_eq!(mask.dim(), (region.height as usize, region.width as usize));
    let counted = mask.iter().filter(|&&v| v).count() as f64 / region.area() as f64 * 100.0;
    assert_abs_diff_eq!(d, counted, epsilon = 1e-12);
}

#[test]
fn test_region_outside_frame_is_rejected() {
    let frame = Frame::filled(20, 20, BACKGROUND);
    let region = Region {
        x: 10,
        y: 0,
        width: 20,
        height: 20,
    };
    let err = estimate_density(&frame, &region, &EstimatorConfig::default()).unwrap_err();
    assert!(matches!(err, FeedwatchError::InvalidDimensions { .. }));
}

#[test]
fn test_tiny_frame_is_not_measured() {
    let frame = Frame::filled(8, 8, MATERIAL);
    let err = measure_frame(&frame, &EstimatorConfig::default()).unwrap_err();
    assert!(matches!(err, FeedwatchError::InvalidDimensions { width: 8, height: 8 }));
}

//! Gaussian smoothing for floating point grids

use image::{ImageBuffer, Luma};
use imageproc::filter::gaussian_blur_f32;
use ndarray::Array2;

type GrayF32 = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Smooth a grid with an isotropic Gaussian of the given `sigma`
///
/// Edge pixels are extended outwards, so a constant field stays constant.
/// A non-positive or non-finite `sigma` returns the grid unchanged.
pub fn gaussian_filter(input: &Array2<f64>, sigma: f64) -> Array2<f64> {
    if input.is_empty() || !sigma.is_finite() || sigma <= 0.0 {
        return input.clone();
    }

    let (rows, cols) = input.dim();
    let buffer = GrayF32::from_fn(cols as u32, rows as u32, |x, y| {
        let value = input.get([y as usize, x as usize]).copied().unwrap_or(0.0);
        Luma([value as f32])
    });

    let blurred = gaussian_blur_f32(&buffer, sigma as f32);

    Array2::from_shape_fn((rows, cols), |(row, col)| {
        f64::from(blurred.get_pixel(col as u32, row as u32).0[0])
    })
}

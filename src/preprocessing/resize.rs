//! Lanczos resampling of normalized grids to a fixed square resolution

use crate::io::error::{Result, invalid_parameter, validation_error};
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};
use ndarray::Array2;

type GrayF32 = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Resample a unit-range grid to `target_size x target_size`
///
/// Uses Lanczos3 so downscaling is antialiased; ringing overshoot is clamped
/// back into [0, 1]. Grids already at the target size are returned unchanged.
///
/// # Errors
///
/// Returns an error if `target_size` is zero or the grid is empty
pub fn resize_square(image: &Array2<f64>, target_size: u32) -> Result<Array2<f64>> {
    if target_size == 0 {
        return Err(invalid_parameter(
            "target_size",
            &target_size,
            &"must be at least 1",
        ));
    }

    let (rows, cols) = image.dim();
    if rows == 0 || cols == 0 {
        return Err(validation_error(&format!(
            "cannot resize an empty {rows}x{cols} grid"
        )));
    }

    let target = target_size as usize;
    if rows == target && cols == target {
        return Ok(image.clone());
    }

    let buffer = GrayF32::from_fn(cols as u32, rows as u32, |x, y| {
        let value = image.get([y as usize, x as usize]).copied().unwrap_or(0.0);
        Luma([value as f32])
    });

    let resized = imageops::resize(&buffer, target_size, target_size, FilterType::Lanczos3);

    Ok(Array2::from_shape_fn((target, target), |(row, col)| {
        let value = resized.get_pixel(col as u32, row as u32).0[0];
        f64::from(value).clamp(0.0, 1.0)
    }))
}

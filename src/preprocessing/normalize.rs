//! Conversion of raw pixel data to unit-range floating point grids

use crate::io::error::{Result, validation_error};
use ndarray::{Array2, ArrayView2};
use num_traits::ToPrimitive;

/// Convert raw samples of any numeric type to `f64`
///
/// # Errors
///
/// Returns a validation error if a sample cannot be represented as a finite `f64`
pub fn to_f64_grid<T>(raw: ArrayView2<'_, T>) -> Result<Array2<f64>>
where
    T: ToPrimitive,
{
    let mut converted = Array2::zeros(raw.dim());
    for ((row, col), sample) in raw.indexed_iter() {
        let value = sample
            .to_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                validation_error(&format!("non-finite pixel value at ({row}, {col})"))
            })?;
        if let Some(slot) = converted.get_mut([row, col]) {
            *slot = value;
        }
    }
    Ok(converted)
}

/// Linear min-max scaling to [0, 1]
///
/// A zero-variance grid (max equals min) maps to all zeros.
pub fn min_max_normalize(image: &Array2<f64>) -> Array2<f64> {
    let (min, max) = image
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if max > min {
        let range = max - min;
        image.mapv(|v| (v - min) / range)
    } else {
        Array2::zeros(image.dim())
    }
}

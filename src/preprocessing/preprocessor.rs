//! Reduction of raw pixel arrays to a normalized square slice

use crate::io::error::{Result, validation_error};
use crate::preprocessing::normalize::{min_max_normalize, to_f64_grid};
use crate::preprocessing::resize::resize_square;
use ndarray::{ArrayView2, ArrayViewD, Axis, Ix2};
use num_traits::ToPrimitive;

/// Select the single 2D slice to analyze
///
/// Multi-frame input (one extra leading axis) contributes only its first frame.
///
/// # Errors
///
/// Returns a validation error if the input is not 2D after that reduction,
/// has no frames, or has an empty axis
pub fn first_slice<'a, T>(raw: ArrayViewD<'a, T>) -> Result<ArrayView2<'a, T>> {
    let shape = raw.shape().to_vec();

    let slice = match raw.ndim() {
        3 => {
            if shape.first().copied().unwrap_or(0) == 0 {
                return Err(validation_error(&"multi-frame input contains no frames"));
            }
            raw.index_axis_move(Axis(0), 0)
        }
        _ => raw,
    };

    let slice = slice.into_dimensionality::<Ix2>().map_err(|_shape_error| {
        validation_error(&format!("expected a 2D pixel array, got shape {shape:?}"))
    })?;

    let (rows, cols) = slice.dim();
    if rows == 0 || cols == 0 {
        return Err(validation_error(&format!(
            "pixel array has an empty axis: {rows}x{cols}"
        )));
    }

    Ok(slice)
}

/// Full preprocessing: slice selection, min-max normalization and resampling
///
/// # Errors
///
/// Returns an error if the input cannot be reduced to a non-empty 2D grid of
/// finite values, or if `target_size` is zero
pub fn preprocess<T>(raw: ArrayViewD<'_, T>, target_size: u32) -> Result<ndarray::Array2<f64>>
where
    T: ToPrimitive,
{
    let slice = first_slice(raw)?;
    let (rows, cols) = slice.dim();

    let normalized = min_max_normalize(&to_f64_grid(slice)?);
    let resized = resize_square(&normalized, target_size)?;

    log::debug!(
        "Preprocessed slice {rows}x{cols} -> {}x{}",
        resized.nrows(),
        resized.ncols()
    );

    Ok(resized)
}

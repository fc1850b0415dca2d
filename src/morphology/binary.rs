//! Binary erosion, dilation, opening and closing with a 3x3 cross element
//!
//! Pixels beyond the grid edge are treated as background, so erosion eats
//! into masks that touch the border while dilation never grows from outside.

use ndarray::Array2;

// Offsets of the cross structuring element, centre included
const CROSS: [(isize, isize); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];

fn neighbour(mask: &Array2<bool>, row: usize, col: usize, offset: (isize, isize)) -> bool {
    let r = row.checked_add_signed(offset.0);
    let c = col.checked_add_signed(offset.1);
    match (r, c) {
        (Some(r), Some(c)) => mask.get([r, c]).copied().unwrap_or(false),
        _ => false,
    }
}

fn erode_once(mask: &Array2<bool>) -> Array2<bool> {
    Array2::from_shape_fn(mask.dim(), |(row, col)| {
        CROSS
            .iter()
            .all(|&offset| neighbour(mask, row, col, offset))
    })
}

fn dilate_once(mask: &Array2<bool>) -> Array2<bool> {
    Array2::from_shape_fn(mask.dim(), |(row, col)| {
        CROSS
            .iter()
            .any(|&offset| neighbour(mask, row, col, offset))
    })
}

/// Shrink foreground by one cross-shaped step per iteration
pub fn erode(mask: &Array2<bool>, iterations: usize) -> Array2<bool> {
    (0..iterations).fold(mask.clone(), |current, _| erode_once(&current))
}

/// Grow foreground by one cross-shaped step per iteration
pub fn dilate(mask: &Array2<bool>, iterations: usize) -> Array2<bool> {
    (0..iterations).fold(mask.clone(), |current, _| dilate_once(&current))
}

/// Erosion followed by dilation; removes features thinner than the element
pub fn open(mask: &Array2<bool>, iterations: usize) -> Array2<bool> {
    dilate(&erode(mask, iterations), iterations)
}

/// Dilation followed by erosion; bridges gaps narrower than the element
pub fn close(mask: &Array2<bool>, iterations: usize) -> Array2<bool> {
    erode(&dilate(mask, iterations), iterations)
}

/// Number of foreground pixels
pub fn count(mask: &Array2<bool>) -> usize {
    mask.iter().filter(|&&set| set).count()
}

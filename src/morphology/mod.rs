//! Grid primitives used by detection and finding extraction

/// Erosion, dilation, opening and closing of boolean masks
pub mod binary;
/// Connected-component labeling
pub mod labeling;
/// Gaussian smoothing of floating point grids
pub mod smoothing;

pub use labeling::Components;

//! Normalization and resampling of raw slices ahead of detection

/// Min-max normalization of raw pixel data
pub mod normalize;
/// Slice selection and the full preprocessing pass
pub mod preprocessor;
/// Lanczos resampling to the model resolution
pub mod resize;

pub use preprocessor::preprocess;

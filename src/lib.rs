//! Statistical anomaly detection for single grayscale image slices
//!
//! A slice is normalized and resampled, compared against the statistics of
//! its own tissue, and turned into a smoothed anomaly probability mask. Strong
//! regions of the mask become ranked findings, and the mask is rendered as a
//! translucent heatmap for display.

#![forbid(unsafe_code)]

/// Probability mask estimation backends and fallback chaining
pub mod detection;
/// Region extraction, severity grading and summaries
pub mod findings;
/// Input/output operations and error handling
pub mod io;
/// Binary morphology, connected components and Gaussian smoothing
pub mod morphology;
/// Request orchestration and result records
pub mod pipeline;
/// Slice selection, normalization and resampling
pub mod preprocessing;
/// Colormaps and heatmap overlay rendering
pub mod visualization;

pub use io::error::{DetectionError, Result};
pub use pipeline::{AnomalyPipeline, DetectionResult, PipelineConfig};

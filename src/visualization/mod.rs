//! Heatmap rendering of probability masks

/// Colormap lookup tables
pub mod colormap;
/// Heatmap rendering, PNG encoding and base64 transport
pub mod heatmap;

pub use colormap::Colormap;
pub use heatmap::{HeatmapRenderer, Overlay, to_base64};

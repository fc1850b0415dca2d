//! Input/output operations, configuration, and error handling

/// Command-line parsing and batch file processing
pub mod cli;
/// Detection constants and defaults
pub mod configuration;
/// Error types for detection failures
pub mod error;
/// Grayscale image loading and heatmap export
pub mod image;
/// Progress tracking for batch processing
pub mod progress;
/// JSON report export
pub mod report;

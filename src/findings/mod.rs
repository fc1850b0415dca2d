//! Findings extracted from probability masks and their summary

/// Region extraction from thresholded masks
pub mod extractor;
/// Finding, bounding box and severity types
pub mod finding;
/// Recommendation summary
pub mod summary;

pub use extractor::{extract_findings, finding_threshold};
pub use finding::{BoundingBox, Finding, Severity};
pub use summary::{Summary, summarize};

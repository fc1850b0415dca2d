//! Serializable outcome of one detection request

use crate::detection::AnalysisMode;
use crate::findings::{Finding, Summary};
use crate::io::error::Result;
use crate::visualization::Overlay;
use serde::Serialize;

/// Status reported for a request that ran to completion
pub const STATUS_COMPLETED: &str = "completed";

/// Top-level detection output
#[derive(Debug, Clone, Serialize)]
pub struct DetectionResult {
    /// Request status
    pub status: &'static str,
    /// Analysis that was requested
    pub analysis_type: AnalysisMode,
    /// Wall-clock time spent, in milliseconds
    pub processing_time_ms: u64,
    /// Findings ordered by confidence, highest first
    pub findings: Vec<Finding>,
    /// Rendered heatmap
    pub overlay: Overlay,
    /// Aggregate summary
    pub summary: Summary,
}

impl DetectionResult {
    /// Compact JSON encoding
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON encoding
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

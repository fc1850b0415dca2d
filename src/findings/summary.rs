//! Aggregation of findings into a single recommendation

use crate::findings::finding::{Finding, Severity, serialize_rounded};
use serde::Serialize;

/// Recommendation when nothing was found
pub const NO_FINDINGS_RECOMMENDATION: &str = "No significant anomalies detected.";
/// Recommendation when any finding is high severity
pub const URGENT_RECOMMENDATION: &str =
    "Significant regions of interest detected. Urgent clinical review recommended.";
/// Recommendation when the worst finding is moderate
pub const REVIEW_RECOMMENDATION: &str =
    "Regions of interest detected. Clinical review recommended.";
/// Recommendation when every finding is low severity
pub const ROUTINE_RECOMMENDATION: &str =
    "Minor variations detected. Routine follow-up may be sufficient.";

/// Aggregate view over all findings of one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Number of findings
    pub total_findings: usize,
    /// Highest finding confidence, 0 when empty
    #[serde(serialize_with = "serialize_rounded")]
    pub max_confidence: f64,
    /// Number of slices that contributed
    pub regions_analyzed: usize,
    /// Recommendation text chosen from the worst severity present
    pub recommendation: String,
}

/// Summarize `findings` from `regions_analyzed` slices
pub fn summarize(findings: &[Finding], regions_analyzed: usize) -> Summary {
    let max_confidence = findings
        .iter()
        .map(|finding| finding.confidence)
        .fold(0.0_f64, f64::max);

    let worst = findings.iter().map(|finding| finding.severity).max();
    let recommendation = match worst {
        None => NO_FINDINGS_RECOMMENDATION,
        Some(Severity::High) => URGENT_RECOMMENDATION,
        Some(Severity::Moderate) => REVIEW_RECOMMENDATION,
        Some(Severity::Low) => ROUTINE_RECOMMENDATION,
    };

    Summary {
        total_findings: findings.len(),
        max_confidence,
        regions_analyzed,
        recommendation: recommendation.to_string(),
    }
}

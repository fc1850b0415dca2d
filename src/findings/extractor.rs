//! Conversion of probability masks into scored, bounded findings

use crate::findings::finding::{BoundingBox, Finding};
use crate::io::configuration::{
    BASE_FINDING_THRESHOLD, FINDING_THRESHOLD_SLOPE, MIN_FINDING_THRESHOLD,
};
use crate::io::error::{Result, invalid_parameter};
use crate::morphology::labeling::Components;
use ndarray::Array2;
use std::cmp::Ordering;

/// Binarization threshold used for a given sensitivity
///
/// Higher sensitivity keeps weaker parts of the probability field.
pub fn finding_threshold(sensitivity: f64) -> f64 {
    FINDING_THRESHOLD_SLOPE
        .mul_add(-sensitivity, BASE_FINDING_THRESHOLD)
        .max(MIN_FINDING_THRESHOLD)
}

/// Extract one finding per connected region of `mask > threshold`
///
/// Findings are ordered by confidence, highest first; equal confidences keep
/// raster order of their regions.
///
/// # Errors
///
/// Returns an error if `threshold` is not finite
pub fn extract_findings(mask: &Array2<f64>, threshold: f64) -> Result<Vec<Finding>> {
    if !threshold.is_finite() {
        return Err(invalid_parameter(
            "threshold",
            &threshold,
            &"must be finite",
        ));
    }

    let binary = mask.mapv(|v| v > threshold);
    let components = Components::label(&binary);

    let mut findings: Vec<Finding> = components
        .regions()
        .iter()
        .filter_map(|pixels| {
            let bounds = BoundingBox::enclosing(pixels)?;
            let values: Vec<f64> = pixels
                .iter()
                .filter_map(|&[row, col]| mask.get([row, col]).copied())
                .collect();

            let area = values.len();
            let confidence = values.iter().sum::<f64>() / area as f64;
            let peak = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

            Some(Finding::new(confidence, peak, area, bounds))
        })
        .collect();

    findings.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(Ordering::Equal)
    });

    log::debug!(
        "Extracted {} findings above threshold {threshold:.3}",
        findings.len()
    );

    Ok(findings)
}

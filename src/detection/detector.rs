//! Detector abstraction shared by the statistical and learned backends

use crate::io::error::{Result, validation_error};
use ndarray::Array2;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Analysis requested by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    /// Statistical intensity-deviation analysis
    #[default]
    Anomaly,
    /// Learned segmentation when a model is available, statistical otherwise
    Segmentation,
}

impl AnalysisMode {
    /// Wire name of the mode
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anomaly => "anomaly",
            Self::Segmentation => "segmentation",
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = crate::io::error::DetectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anomaly" => Ok(Self::Anomaly),
            "segmentation" => Ok(Self::Segmentation),
            _ => Err(crate::io::error::invalid_parameter(
                "analysis_type",
                &s,
                &"expected 'anomaly' or 'segmentation'",
            )),
        }
    }
}

/// Produces a per-pixel anomaly probability field from a normalized slice
pub trait Detector: Send + Sync {
    /// Short backend name used in logs
    fn name(&self) -> &'static str;

    /// Compute a probability mask with the same shape as `image`, values in [0, 1]
    ///
    /// # Errors
    ///
    /// Returns an error if `sensitivity` is out of range or the backend fails
    fn detect(&self, image: &Array2<f64>, sensitivity: f64) -> Result<Array2<f64>>;
}

/// Verify a mask matches its source image and stays inside [0, 1]
///
/// # Errors
///
/// Returns a validation error describing the first violation found
pub fn check_mask_contract(image: &Array2<f64>, mask: &Array2<f64>) -> Result<()> {
    if image.dim() != mask.dim() {
        return Err(validation_error(&format!(
            "mask shape {:?} does not match image shape {:?}",
            mask.dim(),
            image.dim()
        )));
    }

    if let Some(bad) = mask.iter().find(|v| !(0.0..=1.0).contains(*v)) {
        return Err(validation_error(&format!(
            "mask value {bad} outside [0, 1]"
        )));
    }

    Ok(())
}

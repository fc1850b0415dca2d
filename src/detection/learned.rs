//! Learned segmentation backend behind the detector contract

use crate::detection::detector::Detector;
use crate::io::error::{Result, inference_error};
use ndarray::Array2;
use std::sync::Arc;

/// A trained predictor mapping a normalized slice to a probability mask
pub trait SegmentationModel: Send + Sync {
    /// Human-readable model identifier
    fn name(&self) -> &str;

    /// Predict per-pixel probabilities for `image`
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails
    fn predict(&self, image: &Array2<f64>) -> Result<Array2<f64>>;
}

/// Detector that delegates to a [`SegmentationModel`]
///
/// The model output must match the input shape and be finite; values are
/// clamped into [0, 1]. Sensitivity does not influence a trained model.
#[derive(Clone)]
pub struct LearnedModelDetector {
    model: Arc<dyn SegmentationModel>,
}

impl LearnedModelDetector {
    /// Wrap a loaded model
    pub fn new(model: Arc<dyn SegmentationModel>) -> Self {
        Self { model }
    }

    /// Identifier of the wrapped model
    pub fn model_name(&self) -> &str {
        self.model.name()
    }
}

impl Detector for LearnedModelDetector {
    fn name(&self) -> &'static str {
        "segmentation"
    }

    fn detect(&self, image: &Array2<f64>, _sensitivity: f64) -> Result<Array2<f64>> {
        let prediction = self.model.predict(image)?;

        if prediction.dim() != image.dim() {
            return Err(inference_error(&format!(
                "model '{}' returned shape {:?} for input {:?}",
                self.model.name(),
                prediction.dim(),
                image.dim()
            )));
        }
        if prediction.iter().any(|v| !v.is_finite()) {
            return Err(inference_error(&format!(
                "model '{}' returned non-finite probabilities",
                self.model.name()
            )));
        }

        Ok(prediction.mapv(|v| v.clamp(0.0, 1.0)))
    }
}

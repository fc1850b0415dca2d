//! Tests for the learned segmentation detector

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use slicescan::detection::{Detector, LearnedModelDetector, SegmentationModel};
    use slicescan::{DetectionError, Result};
    use std::sync::Arc;

    struct FixedModel {
        output: Array2<f64>,
    }

    impl SegmentationModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        fn predict(&self, _image: &Array2<f64>) -> Result<Array2<f64>> {
            Ok(self.output.clone())
        }
    }

    fn detector_returning(output: Array2<f64>) -> LearnedModelDetector {
        LearnedModelDetector::new(Arc::new(FixedModel { output }))
    }

    // Tests model output is clamped into [0, 1]
    // Verified by passing raw predictions through
    #[test]
    fn test_prediction_clamped() {
        let detector = detector_returning(array![[-0.5, 0.3], [1.7, 1.0]]);
        let mask = detector.detect(&Array2::zeros((2, 2)), 0.5).unwrap();

        assert_eq!(mask, array![[0.0, 0.3], [1.0, 1.0]]);
        assert_eq!(detector.name(), "segmentation");
        assert_eq!(detector.model_name(), "fixed");
    }

    // Tests predictions with the wrong shape are inference errors
    // Verified by skipping the shape check
    #[test]
    fn test_shape_mismatch_rejected() {
        let detector = detector_returning(Array2::zeros((3, 3)));
        let error = detector.detect(&Array2::zeros((2, 2)), 0.5).unwrap_err();

        assert!(matches!(error, DetectionError::ModelInference { .. }));
        assert!(error.to_string().contains("fixed"));
    }

    // Tests non-finite predictions are inference errors
    // Verified by clamping NaN silently
    #[test]
    fn test_non_finite_rejected() {
        let detector = detector_returning(array![[f64::NAN, 0.0], [0.0, 0.0]]);
        let result = detector.detect(&Array2::zeros((2, 2)), 0.5);

        assert!(matches!(result, Err(DetectionError::ModelInference { .. })));
    }
}

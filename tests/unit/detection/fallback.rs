//! Tests for fallback chaining between detectors

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use slicescan::Result;
    use slicescan::detection::{Detector, FallbackDetector};
    use slicescan::io::error::inference_error;

    struct Failing;

    impl Detector for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn detect(&self, _image: &Array2<f64>, _sensitivity: f64) -> Result<Array2<f64>> {
            Err(inference_error(&"no device"))
        }
    }

    struct Constant(f64);

    impl Detector for Constant {
        fn name(&self) -> &'static str {
            "constant"
        }

        fn detect(&self, image: &Array2<f64>, _sensitivity: f64) -> Result<Array2<f64>> {
            Ok(Array2::from_elem(image.dim(), self.0))
        }
    }

    struct WrongShape;

    impl Detector for WrongShape {
        fn name(&self) -> &'static str {
            "wrong-shape"
        }

        fn detect(&self, _image: &Array2<f64>, _sensitivity: f64) -> Result<Array2<f64>> {
            Ok(Array2::zeros((1, 1)))
        }
    }

    // Tests a failing primary is replaced by the fallback result
    // Verified by propagating the primary error
    #[test]
    fn test_primary_error_falls_back() {
        let detector = FallbackDetector::new(Failing, Constant(0.25));
        let mask = detector.detect(&Array2::zeros((3, 3)), 0.5).unwrap();

        assert!(mask.iter().all(|&v| v == 0.25));
        assert_eq!(detector.name(), "failing");
    }

    // Tests a successful primary result is returned unchanged
    // Verified by always running the fallback
    #[test]
    fn test_primary_success_used() {
        let detector = FallbackDetector::new(Constant(0.75), Constant(0.25));
        let mask = detector.detect(&Array2::zeros((3, 3)), 0.5).unwrap();

        assert!(mask.iter().all(|&v| v == 0.75));
    }

    // Tests contract violations from the primary count as failures
    // Verified by skipping the contract check
    #[test]
    fn test_contract_violation_falls_back() {
        let out_of_range = FallbackDetector::new(Constant(1.5), Constant(0.25));
        let mask = out_of_range.detect(&Array2::zeros((2, 2)), 0.5).unwrap();
        assert!(mask.iter().all(|&v| v == 0.25));

        let wrong_shape = FallbackDetector::new(WrongShape, Constant(0.25));
        let mask = wrong_shape.detect(&Array2::zeros((2, 2)), 0.5).unwrap();
        assert_eq!(mask.dim(), (2, 2));
    }

    // Tests fallback errors still surface
    // Verified by swallowing every error
    #[test]
    fn test_fallback_error_propagates() {
        let detector = FallbackDetector::new(Failing, Failing);
        assert!(detector.detect(&Array2::zeros((2, 2)), 0.5).is_err());
    }
}

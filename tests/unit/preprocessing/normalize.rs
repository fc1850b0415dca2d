//! Tests for numeric conversion and min-max normalization

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};
    use slicescan::DetectionError;
    use slicescan::preprocessing::normalize::{min_max_normalize, to_f64_grid};

    // Tests integer samples convert exactly
    // Verified by truncating to u8 during conversion
    #[test]
    fn test_integer_conversion() {
        let raw: Array2<u16> = array![[0, 1000], [65535, 7]];
        let converted = to_f64_grid(raw.view()).unwrap();

        assert_eq!(converted, array![[0.0, 1000.0], [65535.0, 7.0]]);
    }

    // Tests non-finite samples are rejected with their position
    // Verified by skipping the finiteness filter
    #[test]
    fn test_non_finite_rejected() {
        let raw = array![[0.0, 1.0], [f64::NAN, 2.0]];
        let error = to_f64_grid(raw.view()).unwrap_err();

        assert!(matches!(error, DetectionError::Validation { .. }));
        assert!(error.to_string().contains("(1, 0)"));

        let infinite = array![[f32::INFINITY]];
        assert!(to_f64_grid(infinite.view()).is_err());
    }

    // Tests the darkest pixel maps to 0 and the brightest to 1
    // Verified by dividing by max instead of range
    #[test]
    fn test_min_max_range() {
        let image = array![[10.0, 20.0], [30.0, 50.0]];
        let normalized = min_max_normalize(&image);

        assert_eq!(normalized[[0, 0]], 0.0);
        assert_eq!(normalized[[1, 1]], 1.0);
        assert!((normalized[[0, 1]] - 0.25).abs() < 1e-12);
        assert!((normalized[[1, 0]] - 0.5).abs() < 1e-12);
    }

    // Tests a constant grid becomes all zeros rather than NaN
    // Verified by removing the zero-range guard
    #[test]
    fn test_constant_grid_is_zero() {
        let image = Array2::from_elem((4, 5), 123.0);
        let normalized = min_max_normalize(&image);

        assert!(normalized.iter().all(|&v| v == 0.0));
        assert_eq!(normalized.dim(), (4, 5));
    }
}

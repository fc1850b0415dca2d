//! Tests for pipeline configuration and backend selection

#[cfg(test)]
mod tests {
    use ndarray::{Array1, Array2};
    use slicescan::detection::{AnalysisMode, ModelFactory, ModelLoader, SegmentationModel};
    use slicescan::io::error::inference_error;
    use slicescan::{AnomalyPipeline, DetectionError, PipelineConfig, Result};
    use std::sync::Arc;

    struct ConstantModel(f64);

    impl SegmentationModel for ConstantModel {
        fn name(&self) -> &str {
            "constant"
        }

        fn predict(&self, image: &Array2<f64>) -> Result<Array2<f64>> {
            Ok(Array2::from_elem(image.dim(), self.0))
        }
    }

    struct BrokenModel;

    impl SegmentationModel for BrokenModel {
        fn name(&self) -> &str {
            "broken"
        }

        fn predict(&self, _image: &Array2<f64>) -> Result<Array2<f64>> {
            Err(inference_error(&"out of memory"))
        }
    }

    struct Provide(Arc<dyn SegmentationModel>);

    impl ModelLoader for Provide {
        fn load(&self) -> Result<Option<Arc<dyn SegmentationModel>>> {
            Ok(Some(Arc::clone(&self.0)))
        }
    }

    fn pipeline_with(model: Arc<dyn SegmentationModel>, target_size: u32) -> AnomalyPipeline {
        AnomalyPipeline::new(PipelineConfig {
            target_size,
            model_factory: ModelFactory::new(Provide(model)),
            ..PipelineConfig::default()
        })
        .unwrap()
    }

    fn bright_square(size: usize) -> Array2<u16> {
        let band = size / 4..3 * size / 4;
        Array2::from_shape_fn((size, size), |(r, c)| {
            if band.contains(&r) && band.contains(&c) {
                3000
            } else {
                0
            }
        })
    }

    // Tests configuration validation catches each out-of-range parameter
    // Verified by skipping validation in the constructor
    #[test]
    fn test_config_validation() {
        assert!(PipelineConfig::default().validate().is_ok());

        let zero_size = PipelineConfig {
            target_size: 0,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            AnomalyPipeline::new(zero_size),
            Err(DetectionError::InvalidParameter {
                parameter: "target_size",
                ..
            })
        ));

        let opaque = PipelineConfig {
            alpha_scale: 1.2,
            ..PipelineConfig::default()
        };
        assert!(AnomalyPipeline::new(opaque).is_err());

        let sensitivity = PipelineConfig {
            default_sensitivity: -0.5,
            ..PipelineConfig::default()
        };
        assert!(sensitivity.validate().is_err());
    }

    // Tests analysis of a raw slice produces a complete result at the target size
    // Verified by skipping the resize stage
    #[test]
    fn test_analyze_raw_slice() {
        let pipeline = AnomalyPipeline::new(PipelineConfig {
            target_size: 64,
            model_factory: ModelFactory::disabled(),
            ..PipelineConfig::default()
        })
        .unwrap();
        let raw = bright_square(100);

        let result = pipeline
            .analyze(raw.view().into_dyn(), 0.5, AnalysisMode::Anomaly)
            .unwrap();

        assert_eq!(result.status, "completed");
        assert_eq!(result.analysis_type, AnalysisMode::Anomaly);
        assert_eq!((result.overlay.width, result.overlay.height), (64, 64));
        assert_eq!(result.overlay.mask.dim(), (64, 64));
        assert_eq!(result.summary.regions_analyzed, 1);
        assert_eq!(result.summary.total_findings, result.findings.len());
    }

    // Tests invalid sensitivity and malformed input are rejected
    // Verified by clamping sensitivity
    #[test]
    fn test_analyze_rejects_invalid_requests() {
        let pipeline = AnomalyPipeline::default();
        let raw = bright_square(32);

        assert!(matches!(
            pipeline.analyze(raw.view().into_dyn(), 1.01, AnalysisMode::Anomaly),
            Err(DetectionError::InvalidParameter { .. })
        ));
        assert!(pipeline.analyze_synthetic(-0.2, AnalysisMode::Anomaly).is_err());

        let line = Array1::from_elem(16, 1.0f32);
        assert!(matches!(
            pipeline.analyze(line.view().into_dyn(), 0.5, AnalysisMode::Anomaly),
            Err(DetectionError::Validation { .. })
        ));
    }

    // Tests the configured default sensitivity drives default analysis
    // Verified by ignoring the configured default
    #[test]
    fn test_analyze_default_uses_configured_sensitivity() {
        let pipeline_at = |default_sensitivity: f64| {
            AnomalyPipeline::new(PipelineConfig {
                target_size: 64,
                default_sensitivity,
                model_factory: ModelFactory::disabled(),
                ..PipelineConfig::default()
            })
            .unwrap()
        };
        let raw = bright_square(64);

        for sensitivity in [0.0, 1.0] {
            let pipeline = pipeline_at(sensitivity);
            let by_default = pipeline
                .analyze_default(raw.view().into_dyn(), AnalysisMode::Anomaly)
                .unwrap();
            let explicit = pipeline
                .analyze(raw.view().into_dyn(), sensitivity, AnalysisMode::Anomaly)
                .unwrap();

            assert_eq!(by_default.overlay.mask, explicit.overlay.mask);
            assert_eq!(by_default.findings.len(), explicit.findings.len());
        }
    }

    // Tests sensitivity is validated even when the model ignores it
    // Verified by validating only inside the statistical detector
    #[test]
    fn test_detect_rejects_sensitivity_for_model() {
        let pipeline = pipeline_with(Arc::new(ConstantModel(0.3)), 32);
        let image = Array2::from_elem((32, 32), 0.5);

        assert!(matches!(
            pipeline.detect(&image, 7.0, AnalysisMode::Segmentation),
            Err(DetectionError::InvalidParameter { .. })
        ));
        assert!(
            pipeline
                .detect(&image, f64::NAN, AnalysisMode::Segmentation)
                .is_err()
        );
    }

    // Tests segmentation requests use an available model
    // Verified by always choosing the statistical backend
    #[test]
    fn test_segmentation_uses_model() {
        let pipeline = pipeline_with(Arc::new(ConstantModel(0.3)), 32);
        let image = Array2::from_elem((32, 32), 0.5);

        let mask = pipeline
            .detect(&image, 0.5, AnalysisMode::Segmentation)
            .unwrap();

        assert!(mask.iter().all(|&v| (v - 0.3).abs() < 1e-12));
        assert!(pipeline.config().model_factory.is_initialized());
    }

    // Tests anomaly requests never consult the model factory
    // Verified by loading the model for every mode
    #[test]
    fn test_anomaly_skips_model() {
        let pipeline = pipeline_with(Arc::new(ConstantModel(0.3)), 32);
        let image = Array2::from_elem((32, 32), 0.5);

        let mask = pipeline.detect(&image, 0.5, AnalysisMode::Anomaly).unwrap();

        assert!(mask.iter().all(|&v| v == 0.0));
        assert!(!pipeline.config().model_factory.is_initialized());
    }

    // Tests a failing model degrades to statistical results for the same request
    // Verified by propagating the model error
    #[test]
    fn test_broken_model_falls_back() {
        let broken = pipeline_with(Arc::new(BrokenModel), 256);
        let reference = AnomalyPipeline::new(PipelineConfig {
            model_factory: ModelFactory::disabled(),
            ..PipelineConfig::default()
        })
        .unwrap();

        let degraded = broken
            .analyze_synthetic(0.5, AnalysisMode::Segmentation)
            .unwrap();
        let statistical = reference
            .analyze_synthetic(0.5, AnalysisMode::Segmentation)
            .unwrap();

        assert_eq!(degraded.analysis_type, AnalysisMode::Segmentation);
        assert_eq!(degraded.overlay.mask, statistical.overlay.mask);
        assert_eq!(degraded.findings.len(), statistical.findings.len());
    }
}

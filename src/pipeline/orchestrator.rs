//! End-to-end sequencing of preprocessing, detection, extraction and rendering

use crate::detection::{
    AnalysisMode, Detector, FallbackDetector, LearnedModelDetector, ModelFactory,
    StatisticalDetector,
};
use crate::findings::{extract_findings, finding_threshold, summarize};
use crate::io::configuration::{
    DEFAULT_ALPHA_SCALE, DEFAULT_SENSITIVITY, DEFAULT_TARGET_SIZE, REGIONS_ANALYZED,
    SYNTHETIC_SEED, SYNTHETIC_SIZE,
};
use crate::io::error::{Result, ensure_unit_interval, invalid_parameter};
use crate::pipeline::result::{DetectionResult, STATUS_COMPLETED};
use crate::pipeline::synthetic::synthetic_phantom;
use crate::preprocessing::preprocess;
use crate::visualization::HeatmapRenderer;
use ndarray::{Array2, ArrayViewD};
use num_traits::ToPrimitive;
use std::time::Instant;

/// Pipeline parameters and collaborators
#[derive(Debug)]
pub struct PipelineConfig {
    /// Square resolution slices are resampled to
    pub target_size: u32,
    /// Maximum heatmap opacity
    pub alpha_scale: f64,
    /// Sensitivity used by callers that do not choose one
    pub default_sensitivity: f64,
    /// Provider of the optional segmentation model
    pub model_factory: ModelFactory,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            alpha_scale: DEFAULT_ALPHA_SCALE,
            default_sensitivity: DEFAULT_SENSITIVITY,
            model_factory: ModelFactory::default(),
        }
    }
}

impl PipelineConfig {
    /// Check every parameter range
    ///
    /// # Errors
    ///
    /// Returns an error naming the first out-of-range parameter
    pub fn validate(&self) -> Result<()> {
        if self.target_size == 0 {
            return Err(invalid_parameter(
                "target_size",
                &self.target_size,
                &"must be at least 1",
            ));
        }
        ensure_unit_interval("alpha_scale", self.alpha_scale)?;
        ensure_unit_interval("default_sensitivity", self.default_sensitivity)?;
        Ok(())
    }
}

/// Single-slice anomaly detection pipeline
///
/// Requests are independent; the pipeline can be shared across threads.
#[derive(Debug)]
pub struct AnomalyPipeline {
    config: PipelineConfig,
    statistical: StatisticalDetector,
    renderer: HeatmapRenderer,
}

impl Default for AnomalyPipeline {
    fn default() -> Self {
        Self {
            config: PipelineConfig::default(),
            statistical: StatisticalDetector::new(),
            renderer: HeatmapRenderer::default(),
        }
    }
}

impl AnomalyPipeline {
    /// Build a pipeline from validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configured parameter is out of range
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            statistical: StatisticalDetector::new(),
            renderer: HeatmapRenderer::default(),
        })
    }

    /// Active configuration
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Analyze a raw 2D slice, or the first frame of a 3D stack
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed, `sensitivity` is outside
    /// [0, 1], or the heatmap cannot be encoded
    pub fn analyze<T>(
        &self,
        raw: ArrayViewD<'_, T>,
        sensitivity: f64,
        mode: AnalysisMode,
    ) -> Result<DetectionResult>
    where
        T: ToPrimitive,
    {
        let start = Instant::now();
        let sensitivity = ensure_unit_interval("sensitivity", sensitivity)?;
        let image = preprocess(raw, self.config.target_size)?;
        self.run_detection(&image, sensitivity, mode, start)
    }

    /// Analyze a raw slice at the configured default sensitivity
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed or the heatmap cannot be
    /// encoded
    pub fn analyze_default<T>(
        &self,
        raw: ArrayViewD<'_, T>,
        mode: AnalysisMode,
    ) -> Result<DetectionResult>
    where
        T: ToPrimitive,
    {
        self.analyze(raw, self.config.default_sensitivity, mode)
    }

    /// Analyze the built-in synthetic phantom
    ///
    /// The phantom is already normalized and square, so preprocessing is
    /// skipped; detection onwards is identical to [`Self::analyze`].
    ///
    /// # Errors
    ///
    /// Returns an error if `sensitivity` is outside [0, 1] or the heatmap
    /// cannot be encoded
    pub fn analyze_synthetic(&self, sensitivity: f64, mode: AnalysisMode) -> Result<DetectionResult> {
        let start = Instant::now();
        let sensitivity = ensure_unit_interval("sensitivity", sensitivity)?;
        let phantom = synthetic_phantom(SYNTHETIC_SIZE, SYNTHETIC_SEED);
        self.run_detection(&phantom.image, sensitivity, mode, start)
    }

    /// Probability mask for an already-preprocessed slice
    ///
    /// Selects the learned backend (with statistical fallback) only for
    /// segmentation requests when a model is available.
    ///
    /// # Errors
    ///
    /// Returns an error if `sensitivity` is outside [0, 1]
    pub fn detect(
        &self,
        image: &Array2<f64>,
        sensitivity: f64,
        mode: AnalysisMode,
    ) -> Result<Array2<f64>> {
        let sensitivity = ensure_unit_interval("sensitivity", sensitivity)?;
        let learned;
        let detector: &dyn Detector = match mode {
            AnalysisMode::Segmentation => {
                if let Some(model) = self.config.model_factory.get() {
                    learned =
                        FallbackDetector::new(LearnedModelDetector::new(model), self.statistical);
                    &learned
                } else {
                    &self.statistical
                }
            }
            AnalysisMode::Anomaly => &self.statistical,
        };

        log::debug!("Running {} detector", detector.name());
        detector.detect(image, sensitivity)
    }

    fn run_detection(
        &self,
        image: &Array2<f64>,
        sensitivity: f64,
        mode: AnalysisMode,
        start: Instant,
    ) -> Result<DetectionResult> {
        let mask = self.detect(image, sensitivity, mode)?;
        let findings = extract_findings(&mask, finding_threshold(sensitivity))?;
        let overlay = self.renderer.overlay(&mask, self.config.alpha_scale)?;
        let summary = summarize(&findings, REGIONS_ANALYZED);

        let processing_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        log::info!(
            "Analysis ({mode}, sensitivity {sensitivity:.2}) finished in {processing_time_ms} ms with {} findings",
            findings.len()
        );

        Ok(DetectionResult {
            status: STATUS_COMPLETED,
            analysis_type: mode,
            processing_time_ms,
            findings,
            overlay,
            summary,
        })
    }
}

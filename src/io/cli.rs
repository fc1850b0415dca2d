//! Command-line interface for batch analysis of slice images

use crate::detection::{AnalysisMode, ModelFactory, WeightsFileLoader};
use crate::io::configuration::{
    DEFAULT_ALPHA_SCALE, DEFAULT_MODEL_WEIGHTS, DEFAULT_SENSITIVITY, DEFAULT_TARGET_SIZE,
    ENV_MODEL_WEIGHTS, ENV_SENSITIVITY, ENV_TARGET_SIZE, HEATMAP_SUFFIX, REPORT_SUFFIX,
    SUPPORTED_EXTENSIONS, SYNTHETIC_STEM,
};
use crate::io::error::{DetectionError, Result, validation_error};
use crate::io::image::{load_grayscale, save_overlay};
use crate::io::progress::{ProgressManager, Stage};
use crate::io::report::write_report;
use crate::pipeline::{AnomalyPipeline, DetectionResult, PipelineConfig};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "slicescan")]
#[command(
    author,
    version,
    about = "Detect intensity anomalies in grayscale image slices"
)]
/// Command-line arguments for slice analysis
pub struct Cli {
    /// Image file or directory of images; omit to analyze the synthetic phantom
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Detection sensitivity between 0 (conservative) and 1 (permissive)
    #[arg(short, long, default_value_t = DEFAULT_SENSITIVITY, env = ENV_SENSITIVITY, value_parser = parse_unit_interval)]
    pub sensitivity: f64,

    /// Analysis mode
    #[arg(short, long, value_enum, default_value_t = AnalysisMode::Anomaly)]
    pub mode: AnalysisMode,

    /// Square resolution slices are resampled to
    #[arg(short, long, default_value_t = DEFAULT_TARGET_SIZE, env = ENV_TARGET_SIZE)]
    pub target_size: u32,

    /// Maximum heatmap opacity between 0 and 1
    #[arg(short, long, default_value_t = DEFAULT_ALPHA_SCALE, value_parser = parse_unit_interval)]
    pub alpha: f64,

    /// Location of segmentation model weights
    #[arg(long, default_value = DEFAULT_MODEL_WEIGHTS, env = ENV_MODEL_WEIGHTS)]
    pub model_weights: PathBuf,

    /// Directory for reports and heatmaps (defaults to next to each input)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Pipeline configuration described by these arguments
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            target_size: self.target_size,
            alpha_scale: self.alpha,
            default_sensitivity: self.sensitivity,
            model_factory: ModelFactory::new(WeightsFileLoader::new(self.model_weights.clone())),
        }
    }
}

fn parse_unit_interval(value: &str) -> std::result::Result<f64, String> {
    let parsed: f64 = value
        .parse()
        .map_err(|error| format!("'{value}' is not a number: {error}"))?;
    if parsed.is_finite() && (0.0..=1.0).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!("{parsed} is outside [0, 1]"))
    }
}

/// Whether `path` has an extension the loader understands
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
}

/// Orchestrates batch analysis of slice images with progress tracking
pub struct FileProcessor {
    cli: Cli,
    pipeline: AnomalyPipeline,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments describe an invalid pipeline
    pub fn new(cli: Cli) -> Result<Self> {
        let pipeline = AnomalyPipeline::new(cli.pipeline_config())?;
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Ok(Self {
            cli,
            pipeline,
            progress_manager,
        })
    }

    /// Analyze the target (or the synthetic phantom) and write outputs
    ///
    /// Returns the paths of the JSON reports written.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, analysis, or output fails
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_none() {
            return self.process_synthetic().map(|report| vec![report]);
        }

        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut reports = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            reports.push(self.process_file(file, index)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(reports)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let Some(target) = self.cli.target.as_deref() else {
            return Ok(Vec::new());
        };

        if target.is_file() {
            if !is_supported_image(target) {
                return Err(validation_error(&format!(
                    "'{}' is not a supported image ({})",
                    target.display(),
                    SUPPORTED_EXTENSIONS.join(", ")
                )));
            }
            Ok(if self.should_process_file(target) {
                vec![target.to_path_buf()]
            } else {
                Vec::new()
            })
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|source| DetectionError::FileSystem {
                path: target.to_path_buf(),
                operation: "read directory",
                source,
            })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if path.is_file() && is_supported_image(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(validation_error(&format!(
                "target '{}' is neither an image file nor a directory",
                target.display()
            )))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let (report, _) = self.output_paths(input_path);
        if report.exists() {
            log::info!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<PathBuf> {
        let start_time = Instant::now();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path);
        }
        let pixels = load_grayscale(input_path)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, Stage::Analyzing);
        }
        let result = self
            .pipeline
            .analyze_default(pixels.view().into_dyn(), self.cli.mode)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, Stage::Writing);
        }
        let report = self.write_outputs(input_path, &result)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, result.summary.total_findings, start_time.elapsed());
        }

        Ok(report)
    }

    fn process_synthetic(&self) -> Result<PathBuf> {
        log::info!("No target given; analyzing the synthetic phantom");
        let sensitivity = self.pipeline.config().default_sensitivity;
        let result = self.pipeline.analyze_synthetic(sensitivity, self.cli.mode)?;

        let dir = self
            .cli
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let virtual_input = dir.join(format!("{SYNTHETIC_STEM}.png"));
        self.write_outputs(&virtual_input, &result)
    }

    fn write_outputs(&self, input_path: &Path, result: &DetectionResult) -> Result<PathBuf> {
        let (report_path, heatmap_path) = self.output_paths(input_path);
        write_report(result, &report_path)?;
        save_overlay(&result.overlay, &heatmap_path)?;

        log::info!(
            "{}: {} findings (max confidence {:.3}) - {}",
            input_path.display(),
            result.summary.total_findings,
            result.summary.max_confidence,
            result.summary.recommendation
        );

        Ok(report_path)
    }

    /// Report and heatmap locations for `input_path`
    pub fn output_paths(&self, input_path: &Path) -> (PathBuf, PathBuf) {
        let stem = input_path.file_stem().unwrap_or_default().to_string_lossy();
        let dir = self.cli.output_dir.clone().unwrap_or_else(|| {
            input_path
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        });

        (
            dir.join(format!("{stem}{REPORT_SUFFIX}.json")),
            dir.join(format!("{stem}{HEATMAP_SUFFIX}.png")),
        )
    }
}

//! Tissue-aware intensity deviation detector
//!
//! The probability field is built in discrete stages, each returning a new
//! grid: tissue isolation, tissue statistics, outlier flagging, morphological
//! cleanup, small-region pruning, and the smoothed z-score field.

use crate::detection::detector::Detector;
use crate::io::configuration::{
    BASE_DEVIATION_THRESHOLD, CLOSING_ITERATIONS, DEVIATION_THRESHOLD_SLOPE,
    MIN_DEVIATION_THRESHOLD, MIN_REGION_PIXELS, MIN_TISSUE_PIXELS, MIN_TISSUE_STD,
    OPENING_ITERATIONS, REGION_PIXELS_PER_SENSITIVITY, SMOOTHING_SIGMA,
    TISSUE_EROSION_ITERATIONS, TISSUE_INTENSITY_THRESHOLD,
};
use crate::io::error::{Result, ensure_unit_interval};
use crate::morphology::binary::{close, count, erode, open};
use crate::morphology::labeling::Components;
use crate::morphology::smoothing::gaussian_filter;
use ndarray::{Array2, Zip};

/// Mean and spread of intensities inside the tissue mask
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TissueStatistics {
    /// Mean tissue intensity
    pub mean: f64,
    /// Population standard deviation of tissue intensity
    pub std: f64,
    /// Number of tissue pixels measured
    pub pixels: usize,
}

impl TissueStatistics {
    /// Measure `image` over the pixels selected by `tissue`
    ///
    /// Returns `None` when the mask selects nothing.
    pub fn measure(image: &Array2<f64>, tissue: &Array2<bool>) -> Option<Self> {
        let values: Vec<f64> = Zip::from(image)
            .and(tissue)
            .fold(Vec::new(), |mut acc, &value, &inside| {
                if inside {
                    acc.push(value);
                }
                acc
            });

        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            mean,
            std: variance.sqrt(),
            pixels: values.len(),
        })
    }
}

/// Foreground pixels above the tissue threshold, eroded to drop edge artifacts
pub fn tissue_mask(image: &Array2<f64>) -> Array2<bool> {
    let foreground = image.mapv(|v| v > TISSUE_INTENSITY_THRESHOLD);
    erode(&foreground, TISSUE_EROSION_ITERATIONS)
}

/// Deviation threshold in standard deviations for a sensitivity in [0, 1]
pub fn deviation_threshold(sensitivity: f64) -> f64 {
    DEVIATION_THRESHOLD_SLOPE
        .mul_add(-sensitivity, BASE_DEVIATION_THRESHOLD)
        .max(MIN_DEVIATION_THRESHOLD)
}

/// Smallest region that survives pruning at the given sensitivity
pub fn min_region_size(sensitivity: f64) -> usize {
    let scaled = (REGION_PIXELS_PER_SENSITIVITY * sensitivity).round().max(0.0) as usize;
    scaled.max(MIN_REGION_PIXELS)
}

/// Tissue pixels that are hyperintense or hypointense beyond `threshold` sigmas
pub fn flag_outliers(
    image: &Array2<f64>,
    tissue: &Array2<bool>,
    stats: &TissueStatistics,
    threshold: f64,
) -> Array2<bool> {
    let upper = threshold.mul_add(stats.std, stats.mean);
    let lower = (-threshold).mul_add(stats.std, stats.mean);

    Zip::from(image)
        .and(tissue)
        .map_collect(|&value, &inside| inside && (value > upper || value < lower))
}

/// Opening to remove speckle, then closing to fill small gaps
pub fn clean_mask(mask: &Array2<bool>) -> Array2<bool> {
    close(&open(mask, OPENING_ITERATIONS), CLOSING_ITERATIONS)
}

/// Drop connected regions smaller than `min_size` pixels
pub fn prune_small_regions(mask: &Array2<bool>, min_size: usize) -> Array2<bool> {
    Components::label(mask).retain_min_size(min_size)
}

/// Absolute z-score inside tissue, scaled by its own maximum to [0, 1]
pub fn zscore_field(
    image: &Array2<f64>,
    tissue: &Array2<bool>,
    stats: &TissueStatistics,
) -> Array2<f64> {
    let scores = Zip::from(image).and(tissue).map_collect(|&value, &inside| {
        if inside {
            (value - stats.mean).abs() / stats.std
        } else {
            0.0
        }
    });
    normalize_by_max(&scores)
}

/// Divide by the grid maximum; all zeros when the maximum is not positive
pub fn normalize_by_max(field: &Array2<f64>) -> Array2<f64> {
    let max = field.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 {
        field.mapv(|v| (v / max).clamp(0.0, 1.0))
    } else {
        Array2::zeros(field.dim())
    }
}

/// Intermediate products of the region stages
#[derive(Debug, Clone)]
pub struct RegionAnalysis {
    /// Eroded tissue mask
    pub tissue: Array2<bool>,
    /// Statistics measured over `tissue`
    pub stats: TissueStatistics,
    /// Cleaned, pruned anomaly regions
    pub regions: Array2<bool>,
}

/// Primary detector based on tissue intensity statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticalDetector;

impl StatisticalDetector {
    /// Create the detector
    pub const fn new() -> Self {
        Self
    }

    /// Run every stage up to pruned anomaly regions
    ///
    /// Returns `None` when the slice carries no usable signal: too little
    /// tissue, or tissue of uniform intensity.
    ///
    /// # Errors
    ///
    /// Returns an error if `sensitivity` is outside [0, 1]
    pub fn analyze_regions(
        &self,
        image: &Array2<f64>,
        sensitivity: f64,
    ) -> Result<Option<RegionAnalysis>> {
        let sensitivity = ensure_unit_interval("sensitivity", sensitivity)?;

        let tissue = tissue_mask(image);
        let tissue_pixels = count(&tissue);
        if tissue_pixels < MIN_TISSUE_PIXELS {
            log::warn!(
                "Insufficient tissue for analysis: {tissue_pixels} pixels (need {MIN_TISSUE_PIXELS})"
            );
            return Ok(None);
        }

        let Some(stats) = TissueStatistics::measure(image, &tissue) else {
            return Ok(None);
        };
        if stats.std < MIN_TISSUE_STD {
            log::debug!("Tissue intensity is uniform (std {:.3e})", stats.std);
            return Ok(None);
        }

        let threshold = deviation_threshold(sensitivity);
        let outliers = flag_outliers(image, &tissue, &stats, threshold);
        let cleaned = clean_mask(&outliers);
        let regions = prune_small_regions(&cleaned, min_region_size(sensitivity));

        log::debug!(
            "Tissue mean {:.4} std {:.4} over {} px; threshold {threshold:.2} sigma; {} outlier px, {} kept",
            stats.mean,
            stats.std,
            stats.pixels,
            count(&outliers),
            count(&regions)
        );

        Ok(Some(RegionAnalysis {
            tissue,
            stats,
            regions,
        }))
    }
}

impl Detector for StatisticalDetector {
    fn name(&self) -> &'static str {
        "statistical"
    }

    fn detect(&self, image: &Array2<f64>, sensitivity: f64) -> Result<Array2<f64>> {
        let Some(analysis) = self.analyze_regions(image, sensitivity)? else {
            return Ok(Array2::zeros(image.dim()));
        };

        let field = zscore_field(image, &analysis.tissue, &analysis.stats);
        let masked = Zip::from(&field)
            .and(&analysis.regions)
            .map_collect(|&p, &kept| if kept { p } else { 0.0 });
        let smoothed = gaussian_filter(&masked, SMOOTHING_SIGMA);

        Ok(normalize_by_max(&smoothed))
    }
}

//! Detection constants and runtime configuration defaults

// Tissue isolation
/// Intensity above which a normalized pixel counts as tissue
pub const TISSUE_INTENSITY_THRESHOLD: f64 = 0.1;
/// Erosion passes applied to the raw tissue mask
pub const TISSUE_EROSION_ITERATIONS: usize = 3;
/// Minimum eroded tissue pixels needed to compute statistics
pub const MIN_TISSUE_PIXELS: usize = 100;
/// Standard deviation below which the tissue is treated as uniform
pub const MIN_TISSUE_STD: f64 = 1e-6;

// Sensitivity mapping, in standard deviations
/// Deviation threshold at zero sensitivity
pub const BASE_DEVIATION_THRESHOLD: f64 = 3.0;
/// Threshold reduction per unit of sensitivity
pub const DEVIATION_THRESHOLD_SLOPE: f64 = 2.0;
/// Floor for the deviation threshold
pub const MIN_DEVIATION_THRESHOLD: f64 = 0.5;

// Morphological cleanup
/// Opening passes used to remove speckle noise
pub const OPENING_ITERATIONS: usize = 2;
/// Closing passes used to fill small gaps
pub const CLOSING_ITERATIONS: usize = 2;
/// Smallest surviving region regardless of sensitivity
pub const MIN_REGION_PIXELS: usize = 10;
/// Region size floor added per unit of sensitivity
pub const REGION_PIXELS_PER_SENSITIVITY: f64 = 20.0;

// Probability field smoothing
/// Gaussian sigma applied to the masked z-score field
pub const SMOOTHING_SIGMA: f64 = 2.0;

// Finding extraction
/// Binarization threshold at zero sensitivity
pub const BASE_FINDING_THRESHOLD: f64 = 0.5;
/// Binarization threshold reduction per unit of sensitivity
pub const FINDING_THRESHOLD_SLOPE: f64 = 0.4;
/// Floor for the binarization threshold
pub const MIN_FINDING_THRESHOLD: f64 = 0.1;
/// Peak probability above which a large region is rated high
pub const HIGH_SEVERITY_PEAK: f64 = 0.8;
/// Area above which a strong region is rated high
pub const HIGH_SEVERITY_AREA: usize = 100;
/// Peak probability above which a region is at least moderate
pub const MODERATE_SEVERITY_PEAK: f64 = 0.5;
/// Area above which a region is at least moderate
pub const MODERATE_SEVERITY_AREA: usize = 50;
/// Slices contributing to one request
pub const REGIONS_ANALYZED: usize = 1;

// Default values for configurable parameters
/// Detection sensitivity when none is supplied
pub const DEFAULT_SENSITIVITY: f64 = 0.5;
/// Square resolution every slice is resampled to
pub const DEFAULT_TARGET_SIZE: u32 = 256;
/// Maximum heatmap opacity
pub const DEFAULT_ALPHA_SCALE: f64 = 0.7;
/// Location of optional segmentation weights
pub const DEFAULT_MODEL_WEIGHTS: &str = "weights/unet_brain_mri.pt";

// Synthetic phantom
/// Fixed seed for reproducible phantom texture
pub const SYNTHETIC_SEED: u64 = 42;
/// Phantom edge length in pixels
pub const SYNTHETIC_SIZE: usize = 256;

// Output settings
/// Suffix added to rendered heatmap filenames
pub const HEATMAP_SUFFIX: &str = "_heatmap";
/// Suffix added to JSON report filenames
pub const REPORT_SUFFIX: &str = "_findings";
/// Stem used for outputs of the synthetic demo
pub const SYNTHETIC_STEM: &str = "synthetic";
/// Image extensions picked up when scanning a directory
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "tif", "tiff", "bmp"];

// Environment overrides read by the CLI
/// Overrides the default sensitivity
pub const ENV_SENSITIVITY: &str = "SLICESCAN_SENSITIVITY";
/// Overrides the default target size
pub const ENV_TARGET_SIZE: &str = "SLICESCAN_TARGET_SIZE";
/// Overrides the model weights location
pub const ENV_MODEL_WEIGHTS: &str = "SLICESCAN_MODEL_WEIGHTS";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Steps shown on a per-file progress bar
pub const STAGES_PER_FILE: u64 = 3;

//! Error types shared by the detection pipeline and its file surface

use std::fmt;
use std::path::PathBuf;

/// Main error type for all detection operations
#[derive(Debug)]
pub enum DetectionError {
    /// Input grid cannot be interpreted as a single 2D slice
    Validation {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// Tunable parameter outside its accepted range
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Alternate segmentation backend failed or produced an unusable mask
    ///
    /// Never escapes the fallback detector; surfaced only when a learned
    /// backend is driven directly.
    ModelInference {
        /// Description of the failure
        reason: String,
    },

    /// Heatmap could not be encoded as PNG
    Encoding {
        /// Underlying encoder error
        source: image::ImageError,
    },

    /// Failed to load a source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Detection report could not be serialized
    Serialization {
        /// Underlying serializer error
        source: serde_json::Error,
    },
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { reason } => write!(f, "Invalid input image: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ModelInference { reason } => {
                write!(f, "Segmentation model inference failed: {reason}")
            }
            Self::Encoding { source } => write!(f, "Failed to encode heatmap: {source}"),
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { source } => {
                write!(f, "Failed to serialize detection report: {source}")
            }
        }
    }
}

impl std::error::Error for DetectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Encoding { source } | Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source } => Some(source),
            Self::Validation { .. } | Self::InvalidParameter { .. } | Self::ModelInference { .. } => {
                None
            }
        }
    }
}

/// Convenience type alias for detection results
pub type Result<T> = std::result::Result<T, DetectionError>;

impl From<std::io::Error> for DetectionError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for DetectionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> DetectionError {
    DetectionError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an input validation error
pub fn validation_error(reason: &impl ToString) -> DetectionError {
    DetectionError::Validation {
        reason: reason.to_string(),
    }
}

/// Create a model inference error
pub fn inference_error(reason: &impl ToString) -> DetectionError {
    DetectionError::ModelInference {
        reason: reason.to_string(),
    }
}

/// Reject values outside the closed unit interval
///
/// # Errors
///
/// Returns `InvalidParameter` if `value` is not finite or lies outside [0, 1]
pub fn ensure_unit_interval(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(invalid_parameter(
            parameter,
            &value,
            &"must be a finite value in [0, 1]",
        ))
    }
}

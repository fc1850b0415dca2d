//! Detected regions and their severity classification

use crate::io::configuration::{
    HIGH_SEVERITY_AREA, HIGH_SEVERITY_PEAK, MODERATE_SEVERITY_AREA, MODERATE_SEVERITY_PEAK,
};
use serde::{Serialize, Serializer};
use std::fmt;

/// Default type tag for intensity findings
pub const ANOMALY_TYPE: &str = "anomaly";

/// Coarse classification of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Weak or small deviation
    Low,
    /// Clear deviation or sizeable region
    Moderate,
    /// Strong deviation over a large region
    High,
}

impl Severity {
    /// Classify a region from its peak probability and pixel area
    pub fn classify(peak: f64, area: usize) -> Self {
        if peak > HIGH_SEVERITY_PEAK && area > HIGH_SEVERITY_AREA {
            Self::High
        } else if peak > MODERATE_SEVERITY_PEAK || area > MODERATE_SEVERITY_AREA {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Fixed description for findings of this tier
    pub const fn description(self) -> &'static str {
        match self {
            Self::High => {
                "Hyperintense region detected with significant deviation from normal tissue"
            }
            Self::Moderate => "Hyperintense region detected",
            Self::Low => "Subtle intensity variation detected",
        }
    }

    /// Wire name of the tier
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pixel rectangle in image coordinates (x = column, y = row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    /// Leftmost column
    pub x: usize,
    /// Topmost row
    pub y: usize,
    /// Width in pixels, at least 1
    pub width: usize,
    /// Height in pixels, at least 1
    pub height: usize,
}

impl BoundingBox {
    /// Tight box around `[row, col]` pixels; `None` for an empty set
    pub fn enclosing(pixels: &[[usize; 2]]) -> Option<Self> {
        let first = pixels.first()?;
        let (mut min_row, mut max_row, mut min_col, mut max_col) =
            (first[0], first[0], first[1], first[1]);

        for &[row, col] in pixels {
            min_row = min_row.min(row);
            max_row = max_row.max(row);
            min_col = min_col.min(col);
            max_col = max_col.max(col);
        }

        Some(Self {
            x: min_col,
            y: min_row,
            width: max_col - min_col + 1,
            height: max_row - min_row + 1,
        })
    }

    /// Whether two boxes share at least one pixel
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// One detected region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    /// Unique identifier (`finding-` followed by 8 hex digits)
    pub id: String,
    /// Type tag
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable description
    pub description: String,
    /// Mean probability inside the region
    #[serde(serialize_with = "serialize_rounded")]
    pub confidence: f64,
    /// Enclosing rectangle
    #[serde(rename = "location")]
    pub bounds: BoundingBox,
    /// Severity tier
    pub severity: Severity,
    /// Maximum probability inside the region
    #[serde(skip)]
    pub peak: f64,
    /// Region size in pixels
    #[serde(skip)]
    pub area: usize,
}

impl Finding {
    /// Build an anomaly finding with a fresh identifier
    pub fn new(confidence: f64, peak: f64, area: usize, bounds: BoundingBox) -> Self {
        let severity = Severity::classify(peak, area);
        let simple = uuid::Uuid::new_v4().simple().to_string();
        let short: String = simple.chars().take(8).collect();

        Self {
            id: format!("finding-{short}"),
            kind: ANOMALY_TYPE.to_string(),
            description: severity.description().to_string(),
            confidence,
            bounds,
            severity,
            peak,
            area,
        }
    }
}

/// Round to three decimals for transport
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Serialize an `f64` rounded to three decimals
///
/// # Errors
///
/// Propagates serializer errors
pub fn serialize_rounded<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round3(*value))
}

//! Anomaly probability estimation
//!
//! Backends implement [`Detector`]. The statistical backend always works; a
//! learned backend can be chained in front of it with [`FallbackDetector`].

/// Detector trait, analysis modes and the mask contract
pub mod detector;
/// Fallback chaining wrapper
pub mod fallback;
/// Learned segmentation backend
pub mod learned;
/// Memoized model provisioning
pub mod model;
/// Tissue-statistics backend and its stages
pub mod statistical;

pub use detector::{AnalysisMode, Detector};
pub use fallback::FallbackDetector;
pub use learned::{LearnedModelDetector, SegmentationModel};
pub use model::{ModelFactory, ModelLoader, WeightsFileLoader};
pub use statistical::StatisticalDetector;

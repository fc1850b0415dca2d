//! Request orchestration from raw pixels to a serializable result

/// Pipeline configuration and sequencing
pub mod orchestrator;
/// Result record returned to callers
pub mod result;
/// Synthetic phantom used for demos and tests
pub mod synthetic;

pub use orchestrator::{AnomalyPipeline, PipelineConfig};
pub use result::DetectionResult;
pub use synthetic::{Phantom, synthetic_phantom};

//! JSON export of detection results

use crate::io::error::{DetectionError, Result};
use crate::io::image::create_parent_dir;
use crate::pipeline::DetectionResult;
use std::path::Path;

/// Write `result` as indented JSON to `path`
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written
pub fn write_report(result: &DetectionResult, path: &Path) -> Result<()> {
    let json = result.to_json_pretty()?;
    create_parent_dir(path)?;
    std::fs::write(path, json).map_err(|source| DetectionError::FileSystem {
        path: path.to_path_buf(),
        operation: "write report",
        source,
    })
}

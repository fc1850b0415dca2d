//! Loading grayscale slices from image files and writing rendered overlays

use crate::io::error::{DetectionError, Result};
use crate::visualization::Overlay;
use ndarray::Array2;
use std::path::Path;

/// Load an image file as a 16-bit grayscale grid (rows x columns)
///
/// Color images are converted to luminance; 8-bit sources are widened so
/// their relative intensities are preserved.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_grayscale(path: &Path) -> Result<Array2<u16>> {
    let img = image::open(path).map_err(|source| DetectionError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let gray = img.to_luma16();
    let (width, height) = gray.dimensions();

    log::debug!("Loaded {} ({width}x{height})", path.display());

    Ok(Array2::from_shape_fn(
        (height as usize, width as usize),
        |(row, col)| gray.get_pixel(col as u32, row as u32).0[0],
    ))
}

/// Write an overlay's PNG bytes to `path`, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written
pub fn save_overlay(overlay: &Overlay, path: &Path) -> Result<()> {
    create_parent_dir(path)?;
    std::fs::write(path, &overlay.png).map_err(|source| DetectionError::FileSystem {
        path: path.to_path_buf(),
        operation: "write heatmap",
        source,
    })
}

/// Decode an overlay back into an RGBA image
///
/// # Errors
///
/// Returns an error if the stored bytes are not a valid PNG
pub fn decode_overlay(overlay: &Overlay) -> Result<image::RgbaImage> {
    image::load_from_memory_with_format(&overlay.png, image::ImageFormat::Png)
        .map(|decoded| decoded.to_rgba8())
        .map_err(|source| DetectionError::Encoding { source })
}

pub(crate) fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| DetectionError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source,
        })?;
    }
    Ok(())
}

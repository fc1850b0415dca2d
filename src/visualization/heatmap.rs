//! Alpha-blended heatmap rendering and transport encoding

use crate::io::error::{DetectionError, Result, ensure_unit_interval};
use crate::visualization::colormap::Colormap;
use base64::{Engine as _, engine::general_purpose};
use image::{ImageFormat, Rgba, RgbaImage};
use ndarray::Array2;
use serde::{Serialize, Serializer};
use std::io::Cursor;

/// Overlay kind reported to clients
pub const OVERLAY_TYPE: &str = "heatmap";

/// Rendered heatmap paired with the mask it was derived from
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// PNG-encoded RGBA image
    pub png: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Name of the colormap used
    pub colormap: &'static str,
    /// Source probability mask
    pub mask: Array2<f64>,
}

impl Overlay {
    /// PNG bytes as standard base64 text
    pub fn base64(&self) -> String {
        to_base64(&self.png)
    }
}

impl Serialize for Overlay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Overlay", 5)?;
        state.serialize_field("type", OVERLAY_TYPE)?;
        state.serialize_field("data", &self.base64())?;
        state.serialize_field("width", &self.width)?;
        state.serialize_field("height", &self.height)?;
        state.serialize_field("colormap", self.colormap)?;
        state.end()
    }
}

/// Renders probability masks through a fixed colormap
#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    colormap: Colormap,
}

impl Default for HeatmapRenderer {
    fn default() -> Self {
        Self::new(Colormap::jet())
    }
}

impl HeatmapRenderer {
    /// Renderer using `colormap`
    pub const fn new(colormap: Colormap) -> Self {
        Self { colormap }
    }

    /// Colorize `mask` into an RGBA image
    ///
    /// Alpha is `clamp(value, 0, 1) * alpha_scale * 255`, so zero probability
    /// is fully transparent.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha_scale` is outside [0, 1]
    pub fn colorize(&self, mask: &Array2<f64>, alpha_scale: f64) -> Result<RgbaImage> {
        let alpha_scale = ensure_unit_interval("alpha_scale", alpha_scale)?;
        let (rows, cols) = mask.dim();

        Ok(RgbaImage::from_fn(cols as u32, rows as u32, |x, y| {
            let value = mask.get([y as usize, x as usize]).copied().unwrap_or(0.0);
            let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
            let [r, g, b] = self.colormap.color(value);
            let alpha = (value * alpha_scale * 255.0) as u8;
            Rgba([r, g, b, alpha])
        }))
    }

    /// Colorize `mask` and encode it as PNG
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha_scale` is invalid or PNG encoding fails
    pub fn render(&self, mask: &Array2<f64>, alpha_scale: f64) -> Result<Vec<u8>> {
        let image = self.colorize(mask, alpha_scale)?;
        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|source| DetectionError::Encoding { source })?;
        Ok(buffer.into_inner())
    }

    /// Render `mask` and bundle it with its metadata
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha_scale` is invalid or PNG encoding fails
    pub fn overlay(&self, mask: &Array2<f64>, alpha_scale: f64) -> Result<Overlay> {
        let png = self.render(mask, alpha_scale)?;
        Ok(Overlay {
            png,
            width: mask.ncols() as u32,
            height: mask.nrows() as u32,
            colormap: self.colormap.name(),
            mask: mask.clone(),
        })
    }
}

/// Standard base64 text for embedding binary payloads
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

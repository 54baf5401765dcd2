//! The rasterizer seam: turn a [`VisualTree`] into pixels.

use crate::assets::color::Color;
use crate::assets::decode::{encode_png, png_data_uri};
use crate::foundation::error::{SparkleError, SparkleResult};
use crate::scene::tree::VisualTree;

/// Capture options, mirroring what a DOM-to-canvas capture accepts.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureOpts {
    /// Canvas clear color; `None` keeps the canvas transparent.
    pub background_color: Option<Color>,
    /// Device pixels per CSS pixel.
    pub scale: f64,
    /// Load cross-origin images with CORS. In-memory images are always same-origin.
    pub use_cors: bool,
    /// Allow images that would taint the canvas. In-memory images never taint.
    pub allow_taint: bool,
}

impl Default for CaptureOpts {
    fn default() -> Self {
        Self {
            background_color: Some(Color::WHITE),
            scale: 1.0,
            use_cors: true,
            allow_taint: true,
        }
    }
}

impl CaptureOpts {
    /// Supersampling factor of exported files.
    pub const EXPORT_SCALE: f64 = 2.0;

    /// Options used for the PNG export: 2x, white canvas unless the background is transparent.
    pub fn for_export(transparent_background: bool) -> Self {
        Self {
            background_color: if transparent_background {
                None
            } else {
                Some(Color::WHITE)
            },
            scale: Self::EXPORT_SCALE,
            ..Self::default()
        }
    }
}

/// A rasterized composite as premultiplied RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    /// Width in device pixels.
    pub width: u32,
    /// Height in device pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> SparkleResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| SparkleError::render("bitmap size overflow"))?;
        if data.len() != expected {
            return Err(SparkleError::render(format!(
                "bitmap data has {} bytes, expected {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn to_png(&self) -> SparkleResult<Vec<u8>> {
        encode_png(self.width, self.height, &self.data)
    }

    /// `data:image/png;base64,...` of the PNG encoding.
    pub fn to_data_uri(&self) -> SparkleResult<String> {
        Ok(png_data_uri(&self.to_png()?))
    }
}

/// Renders a visual tree to a bitmap.
///
/// The export path holds one as `Option<Box<dyn Rasterizer>>`; a missing rasterizer is reported to
/// the user rather than treated as a crash.
pub trait Rasterizer {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Capture `tree` at `opts.scale`.
    fn capture(&mut self, tree: &VisualTree, opts: &CaptureOpts) -> SparkleResult<Bitmap>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;

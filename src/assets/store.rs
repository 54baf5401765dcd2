use std::fmt;
use std::sync::Arc;

use crate::foundation::core::Size;
use crate::foundation::error::{SparkleError, SparkleResult};
use crate::foundation::math::Fnv1a64;

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Debug)]
struct PreparedImage {
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
    content_id: u64,
}

/// Opaque, cheaply clonable reference to a decoded image.
///
/// Used for the source screenshot, the logo and the background image. The store owns handles;
/// renderers clone them to read pixels.
#[derive(Clone)]
pub struct ImageHandle(Arc<PreparedImage>);

impl ImageHandle {
    /// Wrap premultiplied RGBA8 pixels.
    pub fn from_premul_rgba8(width: u32, height: u32, rgba8_premul: Vec<u8>) -> SparkleResult<Self> {
        if width == 0 || height == 0 {
            return Err(SparkleError::validation("image dimensions must be non-zero"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| SparkleError::validation("image buffer size overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(SparkleError::validation(
                "image byte length must equal width*height*4",
            ));
        }

        let mut h = Fnv1a64::new_default();
        h.write_u32(width);
        h.write_u32(height);
        h.write_bytes(&rgba8_premul);

        Ok(Self(Arc::new(PreparedImage {
            width,
            height,
            rgba8_premul,
            content_id: h.finish(),
        })))
    }

    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> SparkleResult<Self> {
        crate::foundation::core::premultiply_rgba8_in_place(&mut rgba8);
        Self::from_premul_rgba8(width, height, rgba8)
    }

    /// A single-color image, handy for fixtures and placeholders.
    pub fn solid(width: u32, height: u32, straight_rgba: [u8; 4]) -> SparkleResult<Self> {
        let px = straight_rgba.repeat((width as usize).saturating_mul(height as usize));
        Self::from_straight_rgba8(width, height, px)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.0.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.0.height
    }

    /// Intrinsic size as a `kurbo::Size`.
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.0.width), f64::from(self.0.height))
    }

    /// Pixel bytes in row-major premultiplied RGBA8.
    pub fn rgba8_premul(&self) -> &[u8] {
        &self.0.rgba8_premul
    }

    /// Content hash of dimensions and pixels.
    pub fn content_id(&self) -> u64 {
        self.0.content_id
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.content_id == other.0.content_id
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("width", &self.0.width)
            .field("height", &self.0.height)
            .field("content_id", &format_args!("{:016x}", self.0.content_id))
            .finish()
    }
}

/// Normalize and validate session-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> SparkleResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SparkleError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(SparkleError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SparkleError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SparkleError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;

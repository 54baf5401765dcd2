use std::io::Cursor;

use anyhow::Context;
use base64::Engine as _;

use crate::assets::store::ImageHandle;
use crate::foundation::core::unpremultiply_rgba8_in_place;
use crate::foundation::error::{SparkleError, SparkleResult};

const BASE64: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Decode encoded image bytes (PNG, JPEG, ...) into a premultiplied [`ImageHandle`].
pub fn decode_image(bytes: &[u8]) -> SparkleResult<ImageHandle> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| SparkleError::decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    ImageHandle::from_straight_rgba8(width, height, rgba.into_raw())
}

/// Decode a `data:image/...;base64,` URI.
pub fn decode_data_uri(uri: &str) -> SparkleResult<ImageHandle> {
    let rest = uri
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| SparkleError::decode("data URI must start with 'data:'"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| SparkleError::decode("data URI is missing its ',' separator"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| SparkleError::decode("only base64 data URIs are supported"))?;
    if !mime.starts_with("image/") {
        return Err(SparkleError::decode(format!(
            "data URI mime type '{mime}' is not an image"
        )));
    }
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| SparkleError::decode(format!("invalid base64 payload: {e}")))?;
    decode_image(&bytes)
}

/// Encode premultiplied RGBA8 pixels as a PNG file.
pub fn encode_png(width: u32, height: u32, rgba8_premul: &[u8]) -> SparkleResult<Vec<u8>> {
    let mut straight = rgba8_premul.to_vec();
    unpremultiply_rgba8_in_place(&mut straight);
    let img = image::RgbaImage::from_raw(width, height, straight)
        .ok_or_else(|| SparkleError::render("png encode expects width*height*4 bytes"))?;

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .context("encode png")?;
    Ok(out.into_inner())
}

/// Wrap PNG bytes in a `data:image/png;base64,` URI.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(png))
}

impl ImageHandle {
    /// Re-encode the handle as a PNG data URI.
    pub fn to_data_uri(&self) -> SparkleResult<String> {
        let png = encode_png(self.width(), self.height(), self.rgba8_premul())?;
        Ok(png_data_uri(&png))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;

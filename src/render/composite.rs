//! Premultiplied RGBA8 pixel operations used to stack raster layers.

use crate::foundation::error::{SparkleError, SparkleResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(sa);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> SparkleResult<()> {
    check_len("over_in_place", dst.len(), src.len())?;
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Scale every pixel of `dst` by the alpha of `mask` (or its complement when `inverted`).
pub fn mask_in_place(dst: &mut [u8], mask: &[u8], inverted: bool) -> SparkleResult<()> {
    check_len("mask_in_place", dst.len(), mask.len())?;
    for (d, m) in dst.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let w = if inverted { 255 - m[3] } else { m[3] };
        if w == 255 {
            continue;
        }
        let w16 = u16::from(w);
        for c in d.iter_mut() {
            *c = mul_div255_u8(u16::from(*c), w16);
        }
    }
    Ok(())
}

/// A black layer of opacity `alpha` shaped by the coverage in `mask`.
pub fn shadow_from_mask(mask: &[u8], alpha: f64, inverted: bool) -> Vec<u8> {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u16;
    let mut out = vec![0u8; mask.len()];
    for (d, m) in out.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let cov = if inverted { 255 - m[3] } else { m[3] };
        d[3] = mul_div255_u8(u16::from(cov), a);
    }
    out
}

/// Fill every pixel with one premultiplied color.
pub fn fill(dst: &mut [u8], px: PremulRgba8) {
    for d in dst.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
}

fn check_len(op: &str, a: usize, b: usize) -> SparkleResult<()> {
    if a != b || !a.is_multiple_of(4) {
        return Err(SparkleError::render(format!(
            "{op} expects equal-length rgba8 buffers"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;

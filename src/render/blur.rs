//! Separable gaussian blur over premultiplied RGBA8, in Q16 fixed point.

use rayon::prelude::*;

use crate::foundation::error::{SparkleError, SparkleResult};

/// Pixel bounds `[x0, y0, x1)` x `[y0, y1)` of a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl PixelBounds {
    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    /// Grow by `pad` on every side, clamped to a `width` x `height` buffer.
    pub fn expand_within(self, pad: u32, width: u32, height: u32) -> Self {
        Self {
            x0: self.x0.saturating_sub(pad),
            y0: self.y0.saturating_sub(pad),
            x1: self.x1.saturating_add(pad).min(width),
            y1: self.y1.saturating_add(pad).min(height),
        }
    }
}

/// Kernel radius covering three standard deviations.
pub fn radius_for_sigma(sigma: f64) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil().min(1024.0) as u32
}

pub fn blur_rgba8_premul(src: &[u8], width: u32, height: u32, sigma: f64) -> SparkleResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| SparkleError::render("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(SparkleError::render(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    let radius = radius_for_sigma(sigma);
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Blur only `bounds` (grown by the kernel radius) of a full buffer, in place.
pub fn blur_region_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    bounds: PixelBounds,
    sigma: f64,
) -> SparkleResult<()> {
    let radius = radius_for_sigma(sigma);
    if radius == 0 {
        return Ok(());
    }
    let region = bounds.expand_within(radius, width, height);
    let (rw, rh) = (region.width(), region.height());
    if rw == 0 || rh == 0 {
        return Ok(());
    }

    let stride = width as usize * 4;
    let row_len = rw as usize * 4;
    let mut crop = Vec::with_capacity(row_len * rh as usize);
    for y in region.y0..region.y1 {
        let start = y as usize * stride + region.x0 as usize * 4;
        crop.extend_from_slice(&buf[start..start + row_len]);
    }

    let blurred = blur_rgba8_premul(&crop, rw, rh, sigma)?;
    for (i, y) in (region.y0..region.y1).enumerate() {
        let start = y as usize * stride + region.x0 as usize * 4;
        buf[start..start + row_len].copy_from_slice(&blurred[i * row_len..(i + 1) * row_len]);
    }
    Ok(())
}

fn gaussian_kernel_q16(radius: u32, sigma: f64) -> SparkleResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(SparkleError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(SparkleError::render("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let stride = width as usize * 4;
    dst.par_chunks_mut(stride)
        .zip(src.par_chunks(stride))
        .for_each(|(out_row, row)| {
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                    let idx = sx as usize * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(row[idx + c]);
                    }
                }
                let o = x as usize * 4;
                for c in 0..4 {
                    out_row[o + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let h = height as i32;
    let stride = width as usize * 4;
    dst.par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, out_row)| {
            for x in 0..width as usize {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y as i32 + ki as i32 - radius).clamp(0, h - 1);
                    let idx = sy as usize * stride + x * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                for c in 0..4 {
                    out_row[x * 4 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;

use kurbo::Shape;

use crate::assets::store::ImageHandle;
use crate::background::resolve::Paint;
use crate::foundation::core::{Affine, Rect, RoundedRect, Rgba8Premul, Size};
use crate::foundation::error::{SparkleError, SparkleResult};
use crate::foundation::math::device_px;
use crate::render::blur::{PixelBounds, blur_region_in_place};
use crate::render::composite::{fill, mask_in_place, over_in_place, shadow_from_mask};
use crate::render::raster::{Bitmap, CaptureOpts, Rasterizer};
use crate::scene::tree::{ImageNode, LogoNode, VisualTree};

const IMAGE_CACHE_MAX: usize = 8;

/// Software rasterizer built on `vello_cpu`.
///
/// Each element is drawn into its own premultiplied layer and stacked with source-over, in the
/// order a browser paints the same tree: background, outer shadow, image, inset shadow, logo.
#[derive(Default)]
pub struct CpuRasterizer {
    ctx: Option<vello_cpu::RenderContext>,
    images: HashMap<u64, vello_cpu::Image>,
}

impl CpuRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> SparkleResult<R>,
    ) -> SparkleResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn draw_layer(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> SparkleResult<()>,
    ) -> SparkleResult<Vec<u8>> {
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        self.with_ctx_mut(width, height, |ctx| {
            ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            f(ctx)?;
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;
        Ok(pixmap.data_as_u8_slice().to_vec())
    }

    fn image_paint(&mut self, handle: &ImageHandle) -> SparkleResult<vello_cpu::Image> {
        if let Some(img) = self.images.get(&handle.content_id()) {
            return Ok(img.clone());
        }
        if self.images.len() >= IMAGE_CACHE_MAX {
            self.images.clear();
        }
        let pixmap = pixmap_from_premul_bytes(handle.rgba8_premul(), handle.width(), handle.height())?;
        let img = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.images.insert(handle.content_id(), img.clone());
        Ok(img)
    }

    fn background_layer(
        &mut self,
        paint: &Paint,
        width: u16,
        height: u16,
    ) -> SparkleResult<Option<Vec<u8>>> {
        let (w, h) = (u32::from(width), u32::from(height));
        match paint {
            Paint::None => Ok(None),
            Paint::Solid(c) => {
                let mut bytes = vec![0u8; (w as usize) * (h as usize) * 4];
                fill(&mut bytes, c.to_rgba8_premul().to_array());
                Ok(Some(bytes))
            }
            Paint::LinearGradient { from, to } => Ok(Some(gradient_layer(
                from.to_rgba8_premul(),
                to.to_rgba8_premul(),
                w,
                h,
            ))),
            Paint::CoverImage(handle) => {
                let img = self.image_paint(handle)?;
                let (iw, ih) = (f64::from(handle.width()), f64::from(handle.height()));
                let k = (f64::from(w) / iw).max(f64::from(h) / ih);
                let tr = Affine::translate(((f64::from(w) - iw * k) / 2.0, (f64::from(h) - ih * k) / 2.0))
                    * Affine::scale(k);
                let layer = self.draw_layer(width, height, |ctx| {
                    ctx.set_transform(affine_to_cpu(tr));
                    ctx.set_paint(img);
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
                    Ok(())
                })?;
                Ok(Some(layer))
            }
        }
    }

    fn shape_mask(
        &mut self,
        shape: &RoundedRect,
        tr: Affine,
        width: u16,
        height: u16,
    ) -> SparkleResult<Vec<u8>> {
        let path = bezpath_to_cpu(&shape.to_path(0.1));
        self.draw_layer(width, height, |ctx| {
            ctx.set_transform(affine_to_cpu(tr));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
            ctx.fill_path(&path);
            Ok(())
        })
    }

    fn draw_image(
        &mut self,
        node: &ImageNode,
        scale: f64,
        width: u16,
        height: u16,
        canvas: &mut [u8],
    ) -> SparkleResult<()> {
        let tr = Affine::scale(scale) * node.transform;
        let zoom = node.transform.determinant().abs().sqrt();
        let local = Rect::from_origin_size((0.0, 0.0), node.rect.size());
        let shape = RoundedRect::from_rect(local, node.border_radius);
        let mask = self.shape_mask(&shape, tr, width, height)?;
        let (w, h) = (u32::from(width), u32::from(height));

        if let Some(shadow) = node.shadow.filter(|s| !s.inset) {
            let offset = Affine::translate((0.0, shadow.offset_y));
            let cast = self.shape_mask(&shape, tr * offset, width, height)?;
            let mut layer = shadow_from_mask(&cast, shadow.alpha, false);
            let bounds = pixel_bounds((tr * offset).transform_rect_bbox(local), w, h);
            blur_region_in_place(&mut layer, w, h, bounds, shadow.sigma() * zoom * scale)?;
            mask_in_place(&mut layer, &mask, true)?;
            over_in_place(canvas, &layer)?;
        }

        let img = self.image_paint(&node.image)?;
        let crop = node.source_crop;
        let cover = Affine::scale_non_uniform(
            local.width() / crop.width().max(f64::EPSILON),
            local.height() / crop.height().max(f64::EPSILON),
        ) * Affine::translate((-crop.x0, -crop.y0));
        let mut layer = self.draw_layer(width, height, |ctx| {
            ctx.set_transform(affine_to_cpu(tr * cover));
            ctx.set_paint(img);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(crop.x0, crop.y0, crop.x1, crop.y1));
            Ok(())
        })?;
        mask_in_place(&mut layer, &mask, false)?;
        over_in_place(canvas, &layer)?;

        if let Some(shadow) = node.shadow.filter(|s| s.inset) {
            let offset = Affine::translate((0.0, shadow.offset_y));
            let cast = self.shape_mask(&shape, tr * offset, width, height)?;
            let mut layer = shadow_from_mask(&cast, shadow.alpha, true);
            let bounds = pixel_bounds(tr.transform_rect_bbox(local), w, h);
            blur_region_in_place(&mut layer, w, h, bounds, shadow.sigma() * zoom * scale)?;
            mask_in_place(&mut layer, &mask, false)?;
            over_in_place(canvas, &layer)?;
        }
        Ok(())
    }

    fn draw_logo(
        &mut self,
        node: &LogoNode,
        scale: f64,
        width: u16,
        height: u16,
        canvas: &mut [u8],
    ) -> SparkleResult<()> {
        let img = self.image_paint(&node.image)?;
        let (iw, ih) = (f64::from(node.image.width()), f64::from(node.image.height()));
        let tr = Affine::scale(scale)
            * Affine::translate(node.content.origin().to_vec2())
            * Affine::scale_non_uniform(node.content.width() / iw, node.content.height() / ih);
        let layer = self.draw_layer(width, height, |ctx| {
            ctx.set_transform(affine_to_cpu(tr));
            ctx.set_paint(img);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
            Ok(())
        })?;
        over_in_place(canvas, &layer)
    }
}

impl Rasterizer for CpuRasterizer {
    fn name(&self) -> &'static str {
        "cpu"
    }

    #[tracing::instrument(level = "debug", skip(self, tree), fields(scale = opts.scale))]
    fn capture(&mut self, tree: &VisualTree, opts: &CaptureOpts) -> SparkleResult<Bitmap> {
        if !opts.scale.is_finite() || opts.scale <= 0.0 {
            return Err(SparkleError::validation("capture scale must be finite and > 0"));
        }
        let (width, height) = canvas_size(tree.size(), opts.scale)?;
        let (w, h) = (u32::from(width), u32::from(height));
        tracing::debug!(width = w, height = h, "rasterizing composite");

        let mut canvas = vec![0u8; (w as usize) * (h as usize) * 4];
        if let Some(c) = opts.background_color {
            fill(&mut canvas, c.to_rgba8_premul().to_array());
        }

        if let Some(layer) = self.background_layer(&tree.root().paint, width, height)? {
            over_in_place(&mut canvas, &layer)?;
        }

        if let Some(node) = tree.image_node() {
            self.draw_image(node, opts.scale, width, height, &mut canvas)?;
        }
        if let Some(node) = tree.logo_node() {
            self.draw_logo(node, opts.scale, width, height, &mut canvas)?;
        }

        Bitmap::new(w, h, canvas)
    }
}

fn canvas_size(size: Size, scale: f64) -> SparkleResult<(u16, u16)> {
    let w = device_px(size.width, scale);
    let h = device_px(size.height, scale);
    let w: u16 = w
        .try_into()
        .map_err(|_| SparkleError::render(format!("canvas width {w} exceeds u16")))?;
    let h: u16 = h
        .try_into()
        .map_err(|_| SparkleError::render(format!("canvas height {h} exceeds u16")))?;
    Ok((w, h))
}

fn pixel_bounds(r: Rect, width: u32, height: u32) -> PixelBounds {
    let clamp = |v: f64, max: u32| v.clamp(0.0, f64::from(max)) as u32;
    PixelBounds {
        x0: clamp(r.x0.floor(), width),
        y0: clamp(r.y0.floor(), height),
        x1: clamp(r.x1.ceil(), width),
        y1: clamp(r.y1.ceil(), height),
    }
}

/// Horizontal ("to right") gradient, interpolated in premultiplied space.
fn gradient_layer(start: Rgba8Premul, end: Rgba8Premul, w: u32, h: u32) -> Vec<u8> {
    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    let w1 = (w.max(1) - 1) as f32;
    let mut row = Vec::with_capacity(w as usize * 4);
    for x in 0..w {
        let t = if w1 <= 0.0 { 0.0 } else { (x as f32) / w1 };
        let lerp = |a: u8, b: u8| -> u8 {
            let af = a as f32;
            let bf = b as f32;
            (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
        };
        row.extend_from_slice(&[
            lerp(start.r, end.r),
            lerp(start.g, end.g),
            lerp(start.b, end.b),
            lerp(start.a, end.a),
        ]);
    }
    for dst in bytes.chunks_exact_mut(row.len().max(1)) {
        dst.copy_from_slice(&row);
    }
    bytes
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &crate::foundation::core::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> SparkleResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SparkleError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SparkleError::render("image height exceeds u16"))?;
    if bytes.len() != (width as usize).saturating_mul(height as usize).saturating_mul(4) {
        return Err(SparkleError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

//! Pure layout of a composite: one function shared by the live preview and the export path.
//!
//! All lengths are CSS pixels with the outer (padding) box origin at `(0, 0)`. Renderers
//! multiply by their device scale.

use serde::{Deserialize, Serialize};

use crate::background::resolve::{BackgroundSpec, Paint, resolve_background};
use crate::foundation::core::{Affine, Rect, Size, Vec2};
use crate::params::model::{CompositionParams, LogoPosition};
use crate::params::store::Snapshot;

/// Space available to the displayed composite.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Maximum outer width; `None` lets the image keep its natural width.
    pub max_width: Option<f64>,
}

impl Viewport {
    /// No width constraint.
    pub fn unbounded() -> Self {
        Self { max_width: None }
    }

    /// Cap the outer box at `width` pixels.
    pub fn with_max_width(width: f64) -> Self {
        Self {
            max_width: Some(width),
        }
    }
}

/// CSS-equivalent `box-shadow` of the image box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxShadow {
    /// Vertical offset (`intensity / 3`).
    pub offset_y: f64,
    /// Blur radius (`intensity`).
    pub blur: f64,
    /// Black shadow alpha (`intensity / 100`).
    pub alpha: f64,
    /// Drawn inside the box instead of outside.
    pub inset: bool,
}

impl BoxShadow {
    /// Shadow for an intensity; zero intensity has no shadow at all.
    pub fn from_intensity(intensity: u32, inset: bool) -> Option<Self> {
        if intensity == 0 {
            return None;
        }
        let i = f64::from(intensity);
        Some(Self {
            offset_y: i / 3.0,
            blur: i,
            alpha: i / 100.0,
            inset,
        })
    }

    /// Gaussian standard deviation for the blur radius (CSS blur radius is `2σ`).
    pub fn sigma(&self) -> f64 {
        self.blur / 2.0
    }

    /// The `box-shadow` declaration value.
    pub fn to_css(&self) -> String {
        let prefix = if self.inset { "inset " } else { "" };
        format!(
            "{prefix}0 {}px {}px rgba(0,0,0,{})",
            self.offset_y, self.blur, self.alpha
        )
    }
}

/// The framed screenshot.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageBox {
    /// Layout box inside the outer box (unaffected by `scale`).
    pub rect: Rect,
    /// Region of the source image shown in the box, in source pixels (cover-fit crop).
    pub source_crop: Rect,
    /// Uniform zoom about the box center.
    pub scale: f64,
    /// Corner radius, in box-local pixels.
    pub border_radius: f64,
    /// Shadow, if any.
    pub shadow: Option<BoxShadow>,
}

impl ImageBox {
    /// Box-local coordinates (`0..w`, `0..h`) to outer-box coordinates, zoom included.
    pub fn transform(&self) -> Affine {
        let half = Vec2::new(self.rect.width() / 2.0, self.rect.height() / 2.0);
        Affine::translate(self.rect.origin().to_vec2() + half)
            * Affine::scale(self.scale)
            * Affine::translate(-half)
    }

    /// Where the zoomed box lands in the outer box.
    pub fn visual_rect(&self) -> Rect {
        self.transform()
            .transform_rect_bbox(Rect::from_origin_size((0.0, 0.0), self.rect.size()))
    }
}

/// Resolved CSS offsets of the logo's absolutely positioned box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LogoAnchor {
    /// Distance from the top edge.
    pub top: Option<f64>,
    /// Distance from the left edge.
    pub left: Option<f64>,
    /// Distance from the right edge.
    pub right: Option<f64>,
    /// Distance from the bottom edge.
    pub bottom: Option<f64>,
    /// Horizontal self-translation in percent of the logo width.
    pub translate_x_percent: f64,
}

/// Placement of the logo overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoBox {
    /// Logo box in outer-box coordinates.
    pub rect: Rect,
    /// Where the logo pixels land inside `rect` (object-fit contain).
    pub content: Rect,
    /// The CSS offsets that produce `rect`.
    pub anchor: LogoAnchor,
}

/// Everything a renderer needs to draw one composite.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeLayout {
    /// Outer (padding) box size.
    pub outer: Size,
    /// Applied padding.
    pub padding: f64,
    /// Paint of the outer box.
    pub background: Paint,
    /// The framed screenshot.
    pub image: ImageBox,
    /// Logo overlay, only when padding is enabled.
    pub logo: Option<LogoBox>,
}

/// Derived geometry and style of a composite.
#[derive(Clone, Debug, PartialEq)]
pub enum Arrangement {
    /// No source image: hosts show a placeholder.
    Empty,
    /// A drawable composite.
    Composite(CompositeLayout),
}

impl Arrangement {
    /// Lay out a store snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        compute_arrangement(
            &snapshot.params,
            &snapshot.background,
            snapshot.source.as_ref().map(|s| s.size()),
            snapshot.viewport,
        )
    }

    /// The composite, if there is one.
    pub fn composite(&self) -> Option<&CompositeLayout> {
        match self {
            Self::Empty => None,
            Self::Composite(c) => Some(c),
        }
    }
}

/// Lay out a composite.
///
/// `source` is the intrinsic size of the screenshot; the logo size comes from the logo handle in
/// `params`.
#[tracing::instrument(level = "debug", skip(params, background))]
pub fn compute_arrangement(
    params: &CompositionParams,
    background: &BackgroundSpec,
    source: Option<Size>,
    viewport: Viewport,
) -> Arrangement {
    let Some(natural) = source.filter(|s| s.width > 0.0 && s.height > 0.0) else {
        return Arrangement::Empty;
    };

    let padding = f64::from(params.effective_padding());

    let mut width = natural.width;
    if let Some(max) = viewport.max_width.filter(|w| w.is_finite()) {
        width = width.min((max - 2.0 * padding).max(1.0));
    }
    let height = match params.aspect_ratio.value() {
        Some(ratio) => width / ratio,
        None => width * natural.height / natural.width,
    };

    let box_size = Size::new(width, height);
    let image = ImageBox {
        rect: Rect::from_origin_size((padding, padding), box_size),
        source_crop: cover_crop(natural, box_size),
        scale: f64::from(params.image_scale_percent) / 100.0,
        border_radius: f64::from(params.border_radius),
        shadow: BoxShadow::from_intensity(params.shadow_intensity, params.shadow_inset),
    };

    let outer = Size::new(width + 2.0 * padding, height + 2.0 * padding);

    let logo = if params.padding_enabled {
        params
            .logo
            .resource
            .as_ref()
            .map(|l| place_logo(l.size(), f64::from(params.logo.size_px), params.logo.position, outer))
    } else {
        None
    };

    Arrangement::Composite(CompositeLayout {
        outer,
        padding,
        background: resolve_background(background),
        image,
        logo,
    })
}

/// Centered sub-rect of `natural` with the ratio of `target`.
fn cover_crop(natural: Size, target: Size) -> Rect {
    let target_ratio = target.width / target.height;
    let natural_ratio = natural.width / natural.height;
    if natural_ratio > target_ratio {
        let w = natural.height * target_ratio;
        let x0 = (natural.width - w) / 2.0;
        Rect::new(x0, 0.0, x0 + w, natural.height)
    } else {
        let h = natural.width / target_ratio;
        let y0 = (natural.height - h) / 2.0;
        Rect::new(0.0, y0, natural.width, y0 + h)
    }
}

fn place_logo(natural: Size, height: f64, position: LogoPosition, outer: Size) -> LogoBox {
    let wanted_w = if natural.height > 0.0 {
        natural.width * height / natural.height
    } else {
        0.0
    };
    let width = wanted_w.min(outer.width * 0.5);

    // object-fit: contain inside the (possibly narrowed) box
    let fit = (width / natural.width).min(height / natural.height);
    let content_size = Size::new(natural.width * fit, natural.height * fit);

    let mut anchor = LogoAnchor::default();
    let (x, y) = match position {
        LogoPosition::TopLeft => {
            anchor.top = Some(0.0);
            anchor.left = Some(0.0);
            (0.0, 0.0)
        }
        LogoPosition::TopRight => {
            anchor.top = Some(0.0);
            anchor.right = Some(0.0);
            (outer.width - width, 0.0)
        }
        LogoPosition::BottomLeft => {
            anchor.bottom = Some(0.0);
            anchor.left = Some(0.0);
            (0.0, outer.height - height)
        }
        LogoPosition::BottomRight => {
            anchor.bottom = Some(0.0);
            anchor.right = Some(0.0);
            (outer.width - width, outer.height - height)
        }
        LogoPosition::CenterBottom => {
            anchor.bottom = Some(0.0);
            anchor.left = Some(outer.width * 0.5);
            anchor.translate_x_percent = -50.0;
            (outer.width * 0.5 - width * 0.5, outer.height - height)
        }
    };

    let rect = Rect::from_origin_size((x, y), Size::new(width, height));
    let content = Rect::from_origin_size(
        (
            x + (width - content_size.width) / 2.0,
            y + (height - content_size.height) / 2.0,
        ),
        content_size,
    );
    LogoBox {
        rect,
        content,
        anchor,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/arrangement.rs"]
mod tests;

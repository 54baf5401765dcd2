use serde::{Deserialize, Serialize};

use crate::assets::color::Color;
use crate::assets::store::ImageHandle;
use crate::background::swatch::Swatch;

/// How the selected swatch or image paints the composite background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundMode {
    /// One solid color.
    Plain,
    /// Two-stop linear gradient.
    #[default]
    Gradient,
    /// Cover-fit background image.
    Image,
}

/// The user's background selection.
///
/// Replaced wholesale on every selection; see [`crate::ParamStore::set_background`].
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundSpec {
    /// Paint mode.
    pub mode: BackgroundMode,
    /// Selected swatch colors.
    pub swatch: Swatch,
    /// Uploaded background image, if any.
    pub image: Option<ImageHandle>,
}

impl Default for BackgroundSpec {
    fn default() -> Self {
        Self {
            mode: BackgroundMode::Gradient,
            swatch: Swatch::parse("#00d2ff,#3a7bd5"),
            image: None,
        }
    }
}

impl BackgroundSpec {
    /// First swatch color.
    pub fn primary_color(&self) -> Color {
        self.swatch.primary()
    }

    /// Second swatch color, present only for gradient swatches.
    pub fn secondary_color(&self) -> Option<Color> {
        self.swatch.secondary()
    }

    /// Whether the export should leave the canvas unfilled behind the composite.
    pub fn wants_transparent_export(&self) -> bool {
        self.swatch.is_transparent()
    }
}

/// Concrete paint consumed by both renderers.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    /// Nothing is painted.
    None,
    /// Solid fill.
    Solid(Color),
    /// Left-to-right linear gradient with stops at 0 and 1.
    LinearGradient {
        /// Stop 0 (left edge).
        from: Color,
        /// Stop 1 (right edge).
        to: Color,
    },
    /// Image scaled to cover the box, centered.
    CoverImage(ImageHandle),
}

impl Paint {
    /// CSS `background` equivalent, `None` when nothing is painted.
    pub fn to_css(&self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Solid(c) => Some(c.to_string()),
            Self::LinearGradient { from, to } => {
                Some(format!("linear-gradient(to right, {from}, {to})"))
            }
            Self::CoverImage(_) => Some("url(<image>) center / cover".to_owned()),
        }
    }

    /// Return `true` for [`Paint::None`].
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Derive the paint for a background selection.
///
/// Never fails: missing or unusable data resolves to [`Paint::None`].
pub fn resolve_background(spec: &BackgroundSpec) -> Paint {
    match spec.mode {
        BackgroundMode::Image => match &spec.image {
            Some(img) => Paint::CoverImage(img.clone()),
            None => Paint::None,
        },
        BackgroundMode::Plain => match spec.swatch {
            Swatch::Transparent => Paint::None,
            _ => Paint::Solid(spec.primary_color()),
        },
        BackgroundMode::Gradient => match spec.swatch {
            Swatch::Transparent => Paint::None,
            Swatch::Solid(c) => Paint::Solid(c),
            Swatch::Gradient(from, to) => Paint::LinearGradient { from, to },
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/background/resolve.rs"]
mod tests;

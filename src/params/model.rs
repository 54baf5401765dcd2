use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assets::store::ImageHandle;

/// Smallest image scale, in percent.
pub const IMAGE_SCALE_MIN: u32 = 30;
/// Largest image scale, in percent.
pub const IMAGE_SCALE_MAX: u32 = 150;
/// Largest shadow intensity; keeps the shadow alpha at or below 0.5.
pub const SHADOW_MAX: u32 = 50;
/// Smallest logo height, in pixels.
pub const LOGO_SIZE_MIN: u32 = 20;
/// Largest logo height, in pixels.
pub const LOGO_SIZE_MAX: u32 = 200;

/// Upper bound of the padding slider offered by hosts (the store itself accepts any `>= 0`).
pub const PADDING_SLIDER_MAX: u32 = 120;
/// Step of the padding slider.
pub const PADDING_SLIDER_STEP: u32 = 4;
/// Upper bound of the border radius slider offered by hosts.
pub const BORDER_RADIUS_SLIDER_MAX: u32 = 60;

/// Where the logo is pinned inside the padding box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogoPosition {
    /// Top and left edges.
    TopLeft,
    /// Top and right edges.
    TopRight,
    /// Bottom and left edges.
    BottomLeft,
    /// Bottom and right edges.
    #[default]
    BottomRight,
    /// Bottom edge, horizontally centered.
    CenterBottom,
}

impl LogoPosition {
    /// All anchors in the order hosts list them.
    pub const ALL: [Self; 5] = [
        Self::TopLeft,
        Self::TopRight,
        Self::CenterBottom,
        Self::BottomLeft,
        Self::BottomRight,
    ];
}

/// Logo overlay settings.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoParams {
    /// Decoded logo, if one was supplied.
    pub resource: Option<ImageHandle>,
    /// Logo height in pixels.
    pub size_px: u32,
    /// Anchor.
    pub position: LogoPosition,
}

impl Default for LogoParams {
    fn default() -> Self {
        Self {
            resource: None,
            size_px: 50,
            position: LogoPosition::BottomRight,
        }
    }
}

/// Named width:height ratios offered by the editor.
pub const NAMED_RATIOS: &[(&str, Option<f64>)] = &[
    ("Original", None),
    ("16:9", Some(16.0 / 9.0)),
    ("4:3", Some(4.0 / 3.0)),
    ("1:1", Some(1.0)),
    ("3:4", Some(3.0 / 4.0)),
    ("9:16", Some(9.0 / 16.0)),
];

const RATIO_EPSILON: f64 = 1e-6;

/// Aspect ratio selection: a label plus an optional width/height value.
#[derive(Clone, Debug, PartialEq)]
pub struct AspectRatio {
    label: String,
    value: Option<f64>,
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::original()
    }
}

impl AspectRatio {
    /// The source image's own ratio.
    pub fn original() -> Self {
        Self {
            label: "Original".to_owned(),
            value: None,
        }
    }

    /// Resolve a raw ratio to the named ratio with the same value, or a synthesized
    /// `Custom (w:h)` label.
    ///
    /// Non-finite and non-positive values resolve to [`AspectRatio::original`].
    pub fn resolve(value: Option<f64>) -> Self {
        let Some(v) = value.filter(|v| v.is_finite() && *v > 0.0) else {
            return Self::original();
        };
        if let Some((name, _)) = NAMED_RATIOS
            .iter()
            .find(|(_, r)| r.is_some_and(|r| (r - v).abs() < RATIO_EPSILON))
        {
            return Self {
                label: (*name).to_owned(),
                value: Some(v),
            };
        }
        Self {
            label: format!("Custom ({})", ratio_label(v)),
            value: Some(v),
        }
    }

    /// Look up a named ratio by its label (`"16:9"`, `"original"`, ...).
    pub fn named(label: &str) -> Option<Self> {
        NAMED_RATIOS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(label))
            .map(|(name, value)| Self {
                label: (*name).to_owned(),
                value: *value,
            })
    }

    /// Display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Width divided by height, `None` for the source ratio.
    pub fn value(&self) -> Option<f64> {
        self.value
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn ratio_label(v: f64) -> String {
    for den in 1u32..=32 {
        let num = (v * f64::from(den)).round();
        if num >= 1.0 && (num / f64::from(den) - v).abs() < RATIO_EPSILON {
            return format!("{}:{den}", num as u64);
        }
    }
    format!("{v:.2}:1")
}

/// Every composition parameter the editor exposes, except the background.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositionParams {
    /// Padding around the image, in pixels.
    pub padding: u32,
    /// When false, padding is treated as zero (the stored value is kept).
    pub padding_enabled: bool,
    /// Image corner radius, in pixels.
    pub border_radius: u32,
    /// Shadow strength in `0..=50`.
    pub shadow_intensity: u32,
    /// Render the shadow inward.
    pub shadow_inset: bool,
    /// Image zoom in percent, `30..=150`.
    pub image_scale_percent: u32,
    /// Image box ratio.
    pub aspect_ratio: AspectRatio,
    /// Logo overlay.
    pub logo: LogoParams,
}

impl Default for CompositionParams {
    fn default() -> Self {
        Self {
            padding: 48,
            padding_enabled: true,
            border_radius: 20,
            shadow_intensity: 27,
            shadow_inset: false,
            image_scale_percent: 100,
            aspect_ratio: AspectRatio::original(),
            logo: LogoParams::default(),
        }
    }
}

impl CompositionParams {
    /// Padding actually applied to the layout.
    pub fn effective_padding(&self) -> u32 {
        if self.padding_enabled { self.padding } else { 0 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/model.rs"]
mod tests;

//! JSON session files: which images to load and how to frame them.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::assets::store::normalize_rel_path;
use crate::background::resolve::BackgroundMode;
use crate::background::swatch::Swatch;
use crate::foundation::error::{SparkleError, SparkleResult};
use crate::layout::arrangement::Viewport;
use crate::params::model::{AspectRatio, LogoPosition};
use crate::session::editor::{Editor, IngestSlot};
use crate::session::notify::Notifier;
use crate::templates::catalog::Template;

/// Background selection in a session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackgroundConfig {
    /// Unset keeps the mode chosen by the loaded assets.
    #[serde(default)]
    pub mode: Option<BackgroundMode>,
    /// A catalog swatch name (`"Sunset"`) or an encoded value (`"#fff,#000"`).
    #[serde(default)]
    pub value: Option<String>,
}

/// A session file.
///
/// Asset paths are relative to the file's directory. Every framing field is optional; a
/// `template` is applied first and explicit fields override it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    pub image: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    #[serde(default)]
    pub background: Option<BackgroundConfig>,
    #[serde(default)]
    pub padding: Option<i64>,
    #[serde(default)]
    pub padding_enabled: Option<bool>,
    #[serde(default)]
    pub border_radius: Option<i64>,
    #[serde(default)]
    pub shadow: Option<i64>,
    #[serde(default)]
    pub inset: Option<bool>,
    #[serde(default)]
    pub image_scale: Option<i64>,
    /// `"16:9"`, `"original"`, `"3:2"` or a plain number.
    #[serde(default)]
    pub aspect_ratio: Option<String>,
    #[serde(default)]
    pub logo_size: Option<i64>,
    #[serde(default)]
    pub logo_position: Option<LogoPosition>,
    #[serde(default)]
    pub template: Option<String>,
    /// Width of the preview area; exports are twice the displayed size.
    #[serde(default)]
    pub viewport_width: Option<f64>,
}

impl SessionConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> SparkleResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SparkleError::serde(format!("parse session JSON: {e}")))
    }

    pub fn from_json_str(s: &str) -> SparkleResult<Self> {
        serde_json::from_str(s).map_err(|e| SparkleError::serde(format!("parse session JSON: {e}")))
    }

    /// Read a session file; its directory becomes the asset root.
    pub fn from_path(path: impl AsRef<Path>) -> SparkleResult<(Self, PathBuf)> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SparkleError::validation(format!("open session JSON '{}': {e}", path.display()))
        })?;
        let cfg = Self::from_reader(BufReader::new(f))?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok((cfg, root))
    }

    /// Check paths, names and ranges that cannot be clamped.
    pub fn validate(&self) -> SparkleResult<()> {
        normalize_rel_path(&self.image)?;
        for p in [&self.logo, &self.background_image].into_iter().flatten() {
            normalize_rel_path(p)?;
        }
        if let Some(name) = &self.template {
            Template::find(name)
                .ok_or_else(|| SparkleError::validation(format!("unknown template '{name}'")))?;
        }
        if let Some(r) = &self.aspect_ratio {
            parse_aspect_ratio(r)?;
        }
        if let Some(w) = self.viewport_width
            && (!w.is_finite() || w <= 0.0)
        {
            return Err(SparkleError::validation("viewport_width must be finite and > 0"));
        }
        Ok(())
    }

    /// Load the referenced images into `editor` and apply every setting.
    pub fn apply<N: Notifier>(&self, editor: &mut Editor<N>, root: &Path) -> SparkleResult<()> {
        self.validate()?;

        if let Some(w) = self.viewport_width {
            editor.set_viewport(Viewport::with_max_width(w));
        }

        load_into(editor, root, &self.image, IngestSlot::Source)?;
        if let Some(p) = &self.logo {
            load_into(editor, root, p, IngestSlot::Logo)?;
        }
        if let Some(p) = &self.background_image {
            load_into(editor, root, p, IngestSlot::BackgroundImage)?;
        }

        if let Some(t) = self.template.as_deref().and_then(Template::find) {
            editor.apply_template(t);
        }

        let swatch = match &self.background {
            Some(BackgroundConfig {
                value: Some(v), ..
            }) => Some(
                editor
                    .swatches()
                    .find(v)
                    .map(|s| s.swatch)
                    .unwrap_or_else(|| Swatch::parse(v)),
            ),
            _ => None,
        };
        let ratio = self.aspect_ratio.as_deref().map(parse_aspect_ratio).transpose()?;

        editor.update(|store| {
            if let Some(mode) = self.background.as_ref().and_then(|bg| bg.mode) {
                store.set_background_mode(mode);
            }
            if let Some(s) = swatch {
                store.set_background_swatch(s);
            }
            if let Some(v) = self.padding {
                store.set_padding(v);
            }
            if let Some(v) = self.padding_enabled {
                store.set_padding_enabled(v);
            }
            if let Some(v) = self.border_radius {
                store.set_border_radius(v);
            }
            if let Some(v) = self.shadow {
                store.set_shadow_intensity(v);
            }
            if let Some(v) = self.inset {
                store.set_shadow_inset(v);
            }
            if let Some(v) = self.image_scale {
                store.set_image_scale_percent(v);
            }
            if let Some(r) = ratio {
                store.set_aspect_ratio(r);
            }
            if let Some(v) = self.logo_size {
                store.set_logo_size(v);
            }
            if let Some(p) = self.logo_position {
                store.set_logo_position(p);
            }
        });
        Ok(())
    }
}

/// Parse `"original"`, a named ratio, `"w:h"` or a plain number.
pub fn parse_aspect_ratio(s: &str) -> SparkleResult<AspectRatio> {
    let s = s.trim();
    if let Some(named) = AspectRatio::named(s) {
        return Ok(named);
    }
    let value = match s.split_once(':') {
        Some((w, h)) => {
            let w: f64 = w.trim().parse().ok().filter(|v: &f64| *v > 0.0).ok_or_else(|| {
                SparkleError::validation(format!("invalid aspect ratio '{s}'"))
            })?;
            let h: f64 = h.trim().parse().ok().filter(|v: &f64| *v > 0.0).ok_or_else(|| {
                SparkleError::validation(format!("invalid aspect ratio '{s}'"))
            })?;
            w / h
        }
        None => s
            .parse::<f64>()
            .map_err(|_| SparkleError::validation(format!("invalid aspect ratio '{s}'")))?,
    };
    if !value.is_finite() || value <= 0.0 {
        return Err(SparkleError::validation(format!("invalid aspect ratio '{s}'")));
    }
    Ok(AspectRatio::resolve(Some(value)))
}

fn load_into<N: Notifier>(
    editor: &mut Editor<N>,
    root: &Path,
    rel: &str,
    slot: IngestSlot,
) -> SparkleResult<()> {
    let path = root.join(normalize_rel_path(rel)?);
    let bytes =
        std::fs::read(&path).with_context(|| format!("read image '{}'", path.display()))?;
    if !editor.ingest(slot, &bytes) {
        return Err(SparkleError::decode(format!(
            "'{}' is not a supported image",
            path.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/config/session.rs"]
mod tests;

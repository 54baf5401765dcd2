use crate::assets::store::ImageHandle;
use crate::background::resolve::{BackgroundMode, BackgroundSpec};
use crate::background::swatch::Swatch;
use crate::layout::arrangement::Viewport;
use crate::params::model::{
    AspectRatio, CompositionParams, IMAGE_SCALE_MAX, IMAGE_SCALE_MIN, LOGO_SIZE_MAX,
    LOGO_SIZE_MIN, LogoPosition, SHADOW_MAX,
};

/// Owner of the current composition state.
///
/// Setters never fail: numeric inputs are clamped into their documented ranges. Every setter bumps
/// [`ParamStore::revision`]. Hosts mutate the store through [`crate::Editor::update`], which
/// re-renders once per batch.
#[derive(Clone, Debug, Default)]
pub struct ParamStore {
    params: CompositionParams,
    background: BackgroundSpec,
    source: Option<ImageHandle>,
    revision: u64,
}

/// A consistent read of the store, as consumed by both renderers.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Composition parameters.
    pub params: CompositionParams,
    /// Background selection.
    pub background: BackgroundSpec,
    /// Source screenshot.
    pub source: Option<ImageHandle>,
    /// Width available to the displayed composite.
    pub viewport: Viewport,
    /// Store revision the snapshot was taken at.
    pub revision: u64,
}

fn clamp_u32(v: i64, min: u32, max: u32) -> u32 {
    v.clamp(i64::from(min), i64::from(max)) as u32
}

impl ParamStore {
    /// A store holding the startup defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Composition parameters.
    pub fn params(&self) -> &CompositionParams {
        &self.params
    }

    /// Background selection.
    pub fn background(&self) -> &BackgroundSpec {
        &self.background
    }

    /// Source screenshot.
    pub fn source(&self) -> Option<&ImageHandle> {
        self.source.as_ref()
    }

    /// Monotonic mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Copy the current state for rendering.
    pub fn snapshot(&self, viewport: Viewport) -> Snapshot {
        Snapshot {
            params: self.params.clone(),
            background: self.background.clone(),
            source: self.source.clone(),
            viewport,
            revision: self.revision,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    /// Replace the source screenshot.
    pub fn set_source(&mut self, image: Option<ImageHandle>) {
        self.source = image;
        self.touch();
    }

    /// Padding in pixels, clamped at zero.
    pub fn set_padding(&mut self, padding: i64) {
        self.params.padding = clamp_u32(padding, 0, u32::MAX);
        self.touch();
    }

    /// Toggle padding without losing the stored value.
    pub fn set_padding_enabled(&mut self, enabled: bool) {
        self.params.padding_enabled = enabled;
        self.touch();
    }

    /// Corner radius in pixels, clamped at zero.
    pub fn set_border_radius(&mut self, radius: i64) {
        self.params.border_radius = clamp_u32(radius, 0, u32::MAX);
        self.touch();
    }

    /// Shadow intensity, clamped to `0..=50`.
    pub fn set_shadow_intensity(&mut self, intensity: i64) {
        self.params.shadow_intensity = clamp_u32(intensity, 0, SHADOW_MAX);
        self.touch();
    }

    /// Inward or outward shadow.
    pub fn set_shadow_inset(&mut self, inset: bool) {
        self.params.shadow_inset = inset;
        self.touch();
    }

    /// Image scale, clamped to `30..=150` percent.
    pub fn set_image_scale_percent(&mut self, percent: i64) {
        self.params.image_scale_percent = clamp_u32(percent, IMAGE_SCALE_MIN, IMAGE_SCALE_MAX);
        self.touch();
    }

    /// Select an aspect ratio.
    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.params.aspect_ratio = ratio;
        self.touch();
    }

    /// Replace the logo image.
    pub fn set_logo(&mut self, logo: Option<ImageHandle>) {
        self.params.logo.resource = logo;
        self.touch();
    }

    /// Logo height, clamped to `20..=200` pixels.
    pub fn set_logo_size(&mut self, size_px: i64) {
        self.params.logo.size_px = clamp_u32(size_px, LOGO_SIZE_MIN, LOGO_SIZE_MAX);
        self.touch();
    }

    /// Logo anchor.
    pub fn set_logo_position(&mut self, position: LogoPosition) {
        self.params.logo.position = position;
        self.touch();
    }

    /// Replace the background selection wholesale.
    pub fn set_background(&mut self, background: BackgroundSpec) {
        self.background = background;
        self.touch();
    }

    /// Switch the background mode, keeping swatch and image.
    pub fn set_background_mode(&mut self, mode: BackgroundMode) {
        let next = BackgroundSpec {
            mode,
            ..self.background.clone()
        };
        self.set_background(next);
    }

    /// Select a swatch, keeping mode and image.
    pub fn set_background_swatch(&mut self, swatch: Swatch) {
        let next = BackgroundSpec {
            swatch,
            ..self.background.clone()
        };
        self.set_background(next);
    }

    /// Attach a background image; a new image also switches to image mode.
    pub fn set_background_image(&mut self, image: Option<ImageHandle>) {
        let mode = if image.is_some() {
            BackgroundMode::Image
        } else {
            self.background.mode
        };
        let next = BackgroundSpec {
            mode,
            swatch: self.background.swatch,
            image,
        };
        self.set_background(next);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/store.rs"]
mod tests;

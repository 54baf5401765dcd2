//! The continuously refreshed on-screen composite.

use crate::foundation::error::SparkleResult;
use crate::layout::arrangement::Viewport;
use crate::params::model::{IMAGE_SCALE_MAX, IMAGE_SCALE_MIN};
use crate::params::store::Snapshot;
use crate::render::raster::{Bitmap, CaptureOpts, Rasterizer};
use crate::scene::tree::{TreeGeometry, VisualTree};

/// Step of the increase/decrease scale affordances, in percent.
pub const SCALE_STEP: u32 = 10;

/// What the preview currently shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LiveView {
    /// No source image: an upload affordance instead of a composite.
    #[default]
    Placeholder,
    /// The bound composite.
    Composite(VisualTree),
}

/// Direct-manipulation actions on the rendered image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleAction {
    /// Back to 100%.
    Reset,
    /// `+10`, capped at the maximum.
    Increase,
    /// `-10`, floored at the minimum.
    Decrease,
}

impl ScaleAction {
    /// New `image_scale_percent` after the action.
    pub fn apply(self, current: u32) -> u32 {
        match self {
            Self::Reset => 100,
            Self::Increase => current.saturating_add(SCALE_STEP).min(IMAGE_SCALE_MAX),
            Self::Decrease => current.saturating_sub(SCALE_STEP).max(IMAGE_SCALE_MIN),
        }
    }
}

/// Live renderer state: the viewport it lays out into and the last built view.
#[derive(Clone, Debug, Default)]
pub struct LivePreview {
    viewport: Viewport,
    view: LiveView,
    revision: Option<u64>,
}

impl LivePreview {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            view: LiveView::Placeholder,
            revision: None,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Change the available width; takes effect at the next refresh.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn view(&self) -> &LiveView {
        &self.view
    }

    /// Store revision of the last refresh.
    pub fn revision(&self) -> Option<u64> {
        self.revision
    }

    /// Rebuild the view from a snapshot.
    pub fn refresh(&mut self, snapshot: &Snapshot) {
        self.view = match VisualTree::from_snapshot(snapshot) {
            Some(tree) => LiveView::Composite(tree),
            None => LiveView::Placeholder,
        };
        self.revision = Some(snapshot.revision);
        tracing::trace!(revision = snapshot.revision, "live preview refreshed");
    }

    pub fn tree(&self) -> Option<&VisualTree> {
        match &self.view {
            LiveView::Composite(tree) => Some(tree),
            LiveView::Placeholder => None,
        }
    }

    /// Geometry of the displayed composite, in CSS pixels.
    pub fn geometry(&self) -> Option<TreeGeometry> {
        self.tree().map(VisualTree::geometry)
    }

    /// Render the displayed composite at 1x; `None` while showing the placeholder.
    pub fn rasterize(&self, rasterizer: &mut dyn Rasterizer) -> SparkleResult<Option<Bitmap>> {
        let Some(tree) = self.tree() else {
            return Ok(None);
        };
        let opts = CaptureOpts {
            background_color: None,
            ..CaptureOpts::default()
        };
        rasterizer.capture(tree, &opts).map(Some)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/live/preview.rs"]
mod tests;

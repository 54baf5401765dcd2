//! The editing session: one store, one live preview, one exporter.

use crate::assets::color::Color;
use crate::assets::decode::{decode_data_uri, decode_image};
use crate::assets::store::ImageHandle;
use crate::background::resolve::BackgroundMode;
use crate::background::swatch::{NamedSwatch, SwatchCatalog};
use crate::export::download::DownloadSink;
use crate::export::exporter::{ExportError, ExportOutcome, ExportRenderer};
use crate::export::host::OffscreenHost;
use crate::foundation::error::SparkleResult;
use crate::layout::arrangement::Viewport;
use crate::live::preview::{LivePreview, ScaleAction};
use crate::params::store::{ParamStore, Snapshot};
use crate::session::notify::{Notice, Notifier, TracingNotifier};
use crate::templates::apply::apply_template;
use crate::templates::catalog::Template;

/// Image slots that accept user files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IngestSlot {
    /// Source screenshot from a file picker or drop.
    Source,
    /// Source screenshot from the clipboard.
    PastedSource,
    Logo,
    BackgroundImage,
}

impl IngestSlot {
    fn success_message(self) -> &'static str {
        match self {
            Self::Source => "Image uploaded successfully!",
            Self::PastedSource => "Image pasted successfully!",
            Self::Logo => "Logo uploaded successfully!",
            Self::BackgroundImage => "Background image uploaded successfully!",
        }
    }
}

/// A single-user editing session.
///
/// Every mutation goes through [`Editor::update`], which applies the whole batch and refreshes
/// the live preview once, so the preview never observes a half-applied change.
pub struct Editor<N: Notifier = TracingNotifier> {
    store: ParamStore,
    live: LivePreview,
    exporter: ExportRenderer,
    host: OffscreenHost,
    swatches: SwatchCatalog,
    notifier: N,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(Viewport::unbounded())
    }
}

impl Editor {
    /// Session with the CPU rasterizer, logging notices through `tracing`.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_parts(viewport, ExportRenderer::with_cpu(), TracingNotifier)
    }
}

impl<N: Notifier> Editor<N> {
    pub fn with_parts(viewport: Viewport, exporter: ExportRenderer, notifier: N) -> Self {
        let store = ParamStore::new();
        let mut live = LivePreview::new(viewport);
        live.refresh(&store.snapshot(viewport));
        Self {
            store,
            live,
            exporter,
            host: OffscreenHost::new(),
            swatches: SwatchCatalog::builtin(),
            notifier,
        }
    }

    pub fn store(&self) -> &ParamStore {
        &self.store
    }

    pub fn live(&self) -> &LivePreview {
        &self.live
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn exporter_mut(&mut self) -> &mut ExportRenderer {
        &mut self.exporter
    }

    pub fn host(&self) -> &OffscreenHost {
        &self.host
    }

    pub fn swatches(&self) -> &SwatchCatalog {
        &self.swatches
    }

    /// Current state with the live viewport.
    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot(self.live.viewport())
    }

    /// Apply a batch of store mutations, then refresh the preview once if anything changed.
    pub fn update<R>(&mut self, f: impl FnOnce(&mut ParamStore) -> R) -> R {
        let before = self.store.revision();
        let out = f(&mut self.store);
        if self.store.revision() != before {
            self.refresh();
        }
        out
    }

    /// Resize the preview area.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.live.set_viewport(viewport);
        self.refresh();
    }

    /// Decode `bytes` into `slot`.
    ///
    /// Undecodable input is ignored: nothing changes, nothing is shown, and `false` is returned.
    pub fn ingest(&mut self, slot: IngestSlot, bytes: &[u8]) -> bool {
        self.ingest_with(slot, decode_image(bytes))
    }

    /// Like [`Editor::ingest`], for a `data:` URI.
    pub fn ingest_data_uri(&mut self, slot: IngestSlot, uri: &str) -> bool {
        self.ingest_with(slot, decode_data_uri(uri))
    }

    fn ingest_with(&mut self, slot: IngestSlot, decoded: SparkleResult<ImageHandle>) -> bool {
        let image = match decoded {
            Ok(image) => image,
            Err(e) => {
                tracing::debug!(?slot, error = %e, "ignoring undecodable image");
                return false;
            }
        };
        tracing::debug!(?slot, width = image.width(), height = image.height(), "image ingested");
        self.update(|store| match slot {
            IngestSlot::Source | IngestSlot::PastedSource => store.set_source(Some(image)),
            IngestSlot::Logo => store.set_logo(Some(image)),
            IngestSlot::BackgroundImage => store.set_background_image(Some(image)),
        });
        self.notifier.notify(Notice::success(slot.success_message()));
        true
    }

    /// Reset, increase or decrease the image zoom.
    pub fn scale_action(&mut self, action: ScaleAction) {
        self.update(|store| {
            let next = action.apply(store.params().image_scale_percent);
            store.set_image_scale_percent(i64::from(next));
        });
    }

    pub fn apply_template(&mut self, template: &Template) {
        self.update(|store| apply_template(store, template));
    }

    /// Select a catalog swatch by name. Returns `false` for an unknown name.
    pub fn select_swatch(&mut self, name: &str) -> bool {
        let Some(swatch) = self.swatches.find(name).map(|s| s.swatch) else {
            return false;
        };
        self.update(|store| store.set_background_swatch(swatch));
        true
    }

    /// Add a two-stop gradient to the catalog and select it in gradient mode.
    pub fn add_custom_gradient(&mut self, from: Color, to: Color) -> NamedSwatch {
        let added = self.swatches.add_custom_gradient(from, to).clone();
        let swatch = added.swatch;
        self.update(|store| {
            store.set_background_mode(BackgroundMode::Gradient);
            store.set_background_swatch(swatch);
        });
        added
    }

    /// Export the current state to `downloads`.
    pub fn export(&mut self, downloads: &mut dyn DownloadSink) -> Result<ExportOutcome, ExportError> {
        let snapshot = self.snapshot();
        self.exporter
            .export(&snapshot, &mut self.host, &mut self.notifier, downloads)
    }

    fn refresh(&mut self) {
        let snapshot = self.snapshot();
        self.live.refresh(&snapshot);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;

//! Snapshot → isolated tree → 2x bitmap → PNG download.

use crate::foundation::error::{SparkleError, SparkleResult};
use crate::params::store::Snapshot;
use crate::render::cpu::CpuRasterizer;
use crate::render::raster::{Bitmap, CaptureOpts, Rasterizer};
use crate::scene::tree::VisualTree;
use crate::session::notify::{Notice, Notifier};

use super::download::{Download, DownloadSink, EXPORT_FILENAME};
use super::host::OffscreenHost;

pub const MSG_NO_IMAGE: &str = "No image to export";
pub const MSG_UNAVAILABLE: &str = "Export functionality is not available. Please try again later.";
pub const MSG_FAILED: &str = "Failed to export image";
pub const MSG_EXPORTED: &str = "Image exported successfully!";

/// Why an export produced nothing. The user has already been notified.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("no image to export")]
    NoImage,

    #[error("no rasterizer available")]
    RasterizerUnavailable,

    #[error("capture failed: {0}")]
    Capture(#[source] SparkleError),
}

impl From<ExportError> for SparkleError {
    fn from(e: ExportError) -> Self {
        SparkleError::export(e.to_string())
    }
}

/// Result of a successful export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportOutcome {
    pub width: u32,
    pub height: u32,
    pub png_len: usize,
}

/// Rebuilds the composite off-screen from a snapshot and rasterizes it for download.
///
/// The tree is never shared with the live preview. The rasterizer is optional: without one,
/// exports are refused with a notice.
pub struct ExportRenderer {
    rasterizer: Option<Box<dyn Rasterizer>>,
}

impl Default for ExportRenderer {
    fn default() -> Self {
        Self::with_cpu()
    }
}

impl std::fmt::Debug for ExportRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportRenderer")
            .field("rasterizer", &self.rasterizer.as_ref().map(|r| r.name()))
            .finish()
    }
}

impl ExportRenderer {
    pub fn new(rasterizer: Option<Box<dyn Rasterizer>>) -> Self {
        Self { rasterizer }
    }

    /// Exporter backed by [`CpuRasterizer`].
    pub fn with_cpu() -> Self {
        Self::new(Some(Box::new(CpuRasterizer::new())))
    }

    /// Exporter with no rasterizer; every export is refused.
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    pub fn set_rasterizer(&mut self, rasterizer: Option<Box<dyn Rasterizer>>) {
        self.rasterizer = rasterizer;
    }

    pub fn has_rasterizer(&self) -> bool {
        self.rasterizer.is_some()
    }

    /// Export the snapshot as `screenshot-sparkle.png`.
    ///
    /// Every outcome produces exactly one notice. The off-screen tree is detached before this
    /// returns, on success and on failure.
    #[tracing::instrument(level = "debug", skip_all, fields(revision = snapshot.revision))]
    pub fn export(
        &mut self,
        snapshot: &Snapshot,
        host: &mut OffscreenHost,
        notifier: &mut dyn Notifier,
        downloads: &mut dyn DownloadSink,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(tree) = VisualTree::from_snapshot(snapshot) else {
            notifier.notify(Notice::error(MSG_NO_IMAGE));
            return Err(ExportError::NoImage);
        };
        let Some(rasterizer) = self.rasterizer.as_deref_mut() else {
            tracing::warn!("export requested without a rasterizer");
            notifier.notify(Notice::error(MSG_UNAVAILABLE));
            return Err(ExportError::RasterizerUnavailable);
        };

        let opts = CaptureOpts::for_export(snapshot.background.wants_transparent_export());
        let captured = {
            let attached = host.attach(tree);
            match attached.tree() {
                Some(t) => rasterizer.capture(t, &opts),
                None => Err(SparkleError::export("off-screen tree was detached early")),
            }
        };

        match captured.and_then(|bitmap| deliver(bitmap, downloads)) {
            Ok(outcome) => {
                tracing::debug!(width = outcome.width, height = outcome.height, "export finished");
                notifier.notify(Notice::success(MSG_EXPORTED));
                Ok(outcome)
            }
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                notifier.notify(Notice::error(MSG_FAILED));
                Err(ExportError::Capture(e))
            }
        }
    }
}

fn deliver(bitmap: Bitmap, downloads: &mut dyn DownloadSink) -> SparkleResult<ExportOutcome> {
    let png = bitmap.to_png()?;
    let data_uri = crate::assets::decode::png_data_uri(&png);
    let outcome = ExportOutcome {
        width: bitmap.width,
        height: bitmap.height,
        png_len: png.len(),
    };
    downloads.deliver(Download {
        filename: EXPORT_FILENAME.to_owned(),
        png,
        data_uri,
        width: bitmap.width,
        height: bitmap.height,
    })?;
    Ok(outcome)
}

#[cfg(test)]
#[path = "../../tests/unit/export/exporter.rs"]
mod tests;

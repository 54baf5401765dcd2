//! Sparkle turns a screenshot into a framed composite: background paint, padding, rounded
//! corners, shadow, zoom, aspect-ratio crop and a logo overlay, exported as a PNG at twice the
//! displayed size.
//!
//! The API is session-oriented:
//!
//! - Create an [`Editor`] and feed it images with [`Editor::ingest`]
//! - Change parameters in batches with [`Editor::update`] (the [`LivePreview`] follows)
//! - Export through [`Editor::export`] into a [`DownloadSink`]
//!
//! Both the preview and the export call [`compute_arrangement`], so their geometry cannot drift.
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub mod background;
pub mod config;
pub mod export;
pub mod layout;
pub mod live;
pub mod params;
pub mod render;
pub mod scene;
pub mod session;
pub mod templates;

pub use crate::assets::color::Color;
pub use crate::assets::decode::{decode_data_uri, decode_image, encode_png, png_data_uri};
pub use crate::assets::store::ImageHandle;
pub use crate::foundation::core::{Affine, Point, Rect, Rgba8Premul, Size, Vec2};
pub use crate::foundation::error::{SparkleError, SparkleResult};

pub use crate::background::resolve::{BackgroundMode, BackgroundSpec, Paint, resolve_background};
pub use crate::background::swatch::{NamedSwatch, SWATCH_ENCODING_VERSION, Swatch, SwatchCatalog};
pub use crate::config::session::{BackgroundConfig, SessionConfig, parse_aspect_ratio};
pub use crate::export::download::{
    Download, DownloadSink, EXPORT_FILENAME, FileDownloads, InMemoryDownloads,
};
pub use crate::export::exporter::{ExportError, ExportOutcome, ExportRenderer};
pub use crate::export::host::OffscreenHost;
pub use crate::layout::arrangement::{
    Arrangement, BoxShadow, CompositeLayout, ImageBox, LogoAnchor, LogoBox, Viewport,
    compute_arrangement,
};
pub use crate::live::preview::{LivePreview, LiveView, ScaleAction};
pub use crate::params::model::{AspectRatio, CompositionParams, LogoParams, LogoPosition};
pub use crate::params::store::{ParamStore, Snapshot};
pub use crate::render::cpu::CpuRasterizer;
pub use crate::render::raster::{Bitmap, CaptureOpts, Rasterizer};
pub use crate::scene::tree::{TreeGeometry, VisualTree};
pub use crate::session::editor::{Editor, IngestSlot};
pub use crate::session::notify::{Notice, NoticeKind, Notifier, RecordingNotifier, TracingNotifier};
pub use crate::templates::apply::apply_template;
pub use crate::templates::catalog::{TEMPLATES, Template};

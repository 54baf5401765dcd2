use super::*;
use crate::assets::decode::decode_image;
use crate::assets::store::ImageHandle;
use crate::background::swatch::Swatch;
use crate::export::download::InMemoryDownloads;
use crate::layout::arrangement::Viewport;
use crate::params::store::ParamStore;
use crate::session::notify::{NoticeKind, RecordingNotifier};

struct FailingRasterizer;

impl Rasterizer for FailingRasterizer {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn capture(&mut self, _tree: &VisualTree, _opts: &CaptureOpts) -> SparkleResult<Bitmap> {
        Err(SparkleError::render("boom"))
    }
}

fn store() -> ParamStore {
    let mut s = ParamStore::new();
    s.set_source(Some(ImageHandle::solid(30, 20, [200, 10, 10, 255]).unwrap()));
    s.set_padding(8);
    s.set_shadow_intensity(0);
    s
}

#[test]
fn exports_at_twice_the_displayed_size() {
    let s = store();
    let mut host = OffscreenHost::new();
    let mut notes = RecordingNotifier::new();
    let mut sink = InMemoryDownloads::new();
    let out = ExportRenderer::with_cpu()
        .export(&s.snapshot(Viewport::unbounded()), &mut host, &mut notes, &mut sink)
        .unwrap();

    assert_eq!((out.width, out.height), (92, 72));
    let dl = sink.last().unwrap();
    assert_eq!(dl.filename, "screenshot-sparkle.png");
    assert!(dl.data_uri.starts_with("data:image/png;base64,"));
    let img = decode_image(&dl.png).unwrap();
    assert_eq!((img.width(), img.height()), (92, 72));
    assert_eq!(notes.messages(NoticeKind::Success), vec![MSG_EXPORTED]);
    assert!(host.is_empty());
}

#[test]
fn no_image_is_reported() {
    let s = ParamStore::new();
    let mut host = OffscreenHost::new();
    let mut notes = RecordingNotifier::new();
    let mut sink = InMemoryDownloads::new();
    let err = ExportRenderer::with_cpu()
        .export(&s.snapshot(Viewport::unbounded()), &mut host, &mut notes, &mut sink)
        .unwrap_err();
    assert!(matches!(err, ExportError::NoImage));
    assert_eq!(notes.messages(NoticeKind::Error), vec![MSG_NO_IMAGE]);
    assert_eq!(host.attach_count(), 0);
}

#[test]
fn missing_rasterizer_produces_nothing() {
    let s = store();
    let mut host = OffscreenHost::new();
    let mut notes = RecordingNotifier::new();
    let mut sink = InMemoryDownloads::new();
    let mut exporter = ExportRenderer::unavailable();
    assert!(!exporter.has_rasterizer());
    let err = exporter
        .export(&s.snapshot(Viewport::unbounded()), &mut host, &mut notes, &mut sink)
        .unwrap_err();
    assert!(matches!(err, ExportError::RasterizerUnavailable));
    assert_eq!(notes.notices().len(), 1);
    assert_eq!(notes.messages(NoticeKind::Error), vec![MSG_UNAVAILABLE]);
    assert!(sink.downloads().is_empty());
    assert_eq!(host.attach_count(), 0);
}

#[test]
fn capture_failure_cleans_up_and_notifies_once() {
    let s = store();
    let mut host = OffscreenHost::new();
    let mut notes = RecordingNotifier::new();
    let mut sink = InMemoryDownloads::new();
    let mut exporter = ExportRenderer::new(Some(Box::new(FailingRasterizer)));
    let err = exporter
        .export(&s.snapshot(Viewport::unbounded()), &mut host, &mut notes, &mut sink)
        .unwrap_err();
    assert!(matches!(err, ExportError::Capture(_)));
    assert_eq!(notes.notices(), &[Notice::error(MSG_FAILED)]);
    assert_eq!(host.attach_count(), 1);
    assert!(host.is_empty());
    assert!(sink.downloads().is_empty());

    let as_sparkle: SparkleError = err.into();
    assert!(as_sparkle.to_string().starts_with("export error:"));
}

#[test]
fn transparent_swatch_exports_without_fill() {
    let mut s = store();
    s.set_background_swatch(Swatch::Transparent);
    let mut host = OffscreenHost::new();
    let mut notes = RecordingNotifier::new();
    let mut sink = InMemoryDownloads::new();
    ExportRenderer::with_cpu()
        .export(&s.snapshot(Viewport::unbounded()), &mut host, &mut notes, &mut sink)
        .unwrap();
    let img = decode_image(&sink.last().unwrap().png).unwrap();
    assert_eq!(img.rgba8_premul()[3], 0);
}

#[test]
fn opaque_swatch_exports_opaque_corners() {
    let s = store();
    let mut host = OffscreenHost::new();
    let mut notes = RecordingNotifier::new();
    let mut sink = InMemoryDownloads::new();
    ExportRenderer::with_cpu()
        .export(&s.snapshot(Viewport::unbounded()), &mut host, &mut notes, &mut sink)
        .unwrap();
    let img = decode_image(&sink.last().unwrap().png).unwrap();
    assert_eq!(img.rgba8_premul()[3], 255);
}

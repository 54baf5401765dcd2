use super::*;
use crate::assets::color::Color;
use crate::background::resolve::BackgroundMode;
use crate::background::swatch::Swatch;
use crate::layout::arrangement::Viewport;
use crate::params::model::LogoPosition;
use crate::params::store::ParamStore;

fn store(w: u32, h: u32, padding: i64) -> ParamStore {
    let mut s = ParamStore::new();
    s.set_source(Some(ImageHandle::solid(w, h, [255, 0, 0, 255]).unwrap()));
    s.set_padding(padding);
    s.set_shadow_intensity(0);
    s.set_border_radius(0);
    s.set_background_mode(BackgroundMode::Plain);
    s.set_background_swatch(Swatch::Solid(Color::rgb8(0, 0, 255)));
    s
}

fn render(s: &ParamStore, opts: &CaptureOpts) -> Bitmap {
    let tree = VisualTree::from_snapshot(&s.snapshot(Viewport::unbounded())).unwrap();
    CpuRasterizer::new().capture(&tree, opts).unwrap()
}

#[test]
fn solid_background_and_image() {
    let bmp = render(&store(20, 10, 12), &CaptureOpts::default());
    assert_eq!((bmp.width, bmp.height), (44, 34));
    assert_eq!(bmp.pixel(2, 2), Some([0, 0, 255, 255]));
    assert_eq!(bmp.pixel(22, 17), Some([255, 0, 0, 255]));
}

#[test]
fn scale_multiplies_canvas() {
    let opts = CaptureOpts {
        scale: 2.0,
        ..CaptureOpts::default()
    };
    let bmp = render(&store(20, 10, 12), &opts);
    assert_eq!((bmp.width, bmp.height), (88, 68));
    assert_eq!(bmp.pixel(44, 34), Some([255, 0, 0, 255]));
}

#[test]
fn transparent_background_keeps_alpha() {
    let mut s = store(20, 10, 12);
    s.set_background_swatch(Swatch::Transparent);
    let bmp = render(&s, &CaptureOpts::for_export(true));
    assert_eq!(bmp.pixel(1, 1).unwrap()[3], 0);
    assert_eq!(bmp.pixel(44, 34).unwrap()[3], 255);

    let white = render(&s, &CaptureOpts::default());
    assert_eq!(white.pixel(1, 1), Some([255, 255, 255, 255]));
}

#[test]
fn rounded_corners_are_clipped() {
    let mut s = store(40, 40, 10);
    s.set_border_radius(12);
    let bmp = render(&s, &CaptureOpts::default());
    assert_eq!(bmp.pixel(10, 10), Some([0, 0, 255, 255]));
    assert_eq!(bmp.pixel(30, 30), Some([255, 0, 0, 255]));
    assert_eq!(bmp.pixel(30, 10), Some([255, 0, 0, 255]));
}

#[test]
fn outer_shadow_darkens_below_the_image() {
    let mut s = store(100, 60, 40);
    s.set_background_swatch(Swatch::Solid(Color::WHITE));
    s.set_shadow_intensity(30);
    let bmp = render(&s, &CaptureOpts::default());
    let below = bmp.pixel(90, 105).unwrap();
    let corner = bmp.pixel(2, 2).unwrap();
    assert!(below[0] < 240, "below={below:?}");
    assert!(corner[0] > 250, "corner={corner:?}");
    assert_eq!(bmp.pixel(90, 70), Some([255, 0, 0, 255]));
}

#[test]
fn inset_shadow_darkens_the_top_edge() {
    let mut s = store(100, 60, 40);
    s.set_shadow_intensity(30);
    s.set_shadow_inset(true);
    let bmp = render(&s, &CaptureOpts::default());
    let top = bmp.pixel(90, 41).unwrap();
    let bottom = bmp.pixel(90, 98).unwrap();
    assert!(top[0] < bottom[0], "top={top:?} bottom={bottom:?}");
    assert_eq!(bmp.pixel(2, 2), Some([0, 0, 255, 255]));
}

#[test]
fn gradient_runs_left_to_right() {
    let mut s = store(20, 10, 30);
    s.set_background_mode(BackgroundMode::Gradient);
    s.set_background_swatch(Swatch::Gradient(Color::BLACK, Color::WHITE));
    let bmp = render(&s, &CaptureOpts::default());
    let left = bmp.pixel(0, 2).unwrap();
    let right = bmp.pixel(bmp.width - 1, 2).unwrap();
    assert_eq!(left, [0, 0, 0, 255]);
    assert_eq!(right, [255, 255, 255, 255]);
}

#[test]
fn cover_image_background_fills_canvas() {
    let mut s = store(20, 10, 12);
    s.set_background_image(Some(ImageHandle::solid(5, 5, [0, 255, 0, 255]).unwrap()));
    let bmp = render(&s, &CaptureOpts::default());
    assert_eq!(bmp.pixel(1, 1), Some([0, 255, 0, 255]));
    assert_eq!(bmp.pixel(42, 32), Some([0, 255, 0, 255]));
}

#[test]
fn logo_is_drawn_in_its_content_box() {
    let mut s = store(60, 40, 40);
    s.set_logo(Some(ImageHandle::solid(10, 10, [0, 255, 0, 255]).unwrap()));
    s.set_logo_size(20);
    s.set_logo_position(LogoPosition::TopLeft);
    let tree = VisualTree::from_snapshot(&s.snapshot(Viewport::unbounded())).unwrap();
    let c = tree.logo_node().unwrap().content.center();
    let bmp = CpuRasterizer::new()
        .capture(&tree, &CaptureOpts::default())
        .unwrap();
    assert_eq!(bmp.pixel(c.x as u32, c.y as u32), Some([0, 255, 0, 255]));
}

#[test]
fn invalid_scale_is_rejected() {
    let s = store(20, 10, 12);
    let tree = VisualTree::from_snapshot(&s.snapshot(Viewport::unbounded())).unwrap();
    let opts = CaptureOpts {
        scale: 0.0,
        ..CaptureOpts::default()
    };
    assert!(CpuRasterizer::new().capture(&tree, &opts).is_err());
}

#[test]
fn gradient_layer_endpoints() {
    let a = Rgba8Premul::from_straight_rgba(0, 0, 0, 255);
    let b = Rgba8Premul::WHITE;
    let bytes = gradient_layer(a, b, 3, 2);
    assert_eq!(&bytes[0..4], &[0, 0, 0, 255]);
    assert_eq!(&bytes[4..8], &[128, 128, 128, 255]);
    assert_eq!(&bytes[20..24], &[255, 255, 255, 255]);
}

use super::*;
use crate::assets::decode::decode_image;

#[test]
fn export_options_follow_background_transparency() {
    let opaque = CaptureOpts::for_export(false);
    assert_eq!(opaque.background_color, Some(Color::WHITE));
    assert_eq!(opaque.scale, 2.0);
    assert!(opaque.use_cors);
    assert!(opaque.allow_taint);

    let clear = CaptureOpts::for_export(true);
    assert_eq!(clear.background_color, None);
    assert_eq!(clear.scale, 2.0);
}

#[test]
fn bitmap_rejects_wrong_length() {
    assert!(Bitmap::new(2, 2, vec![0; 15]).is_err());
    assert!(Bitmap::new(2, 2, vec![0; 16]).is_ok());
}

#[test]
fn bitmap_pixel_lookup() {
    let mut data = vec![0u8; 2 * 2 * 4];
    data[12..16].copy_from_slice(&[1, 2, 3, 255]);
    let bmp = Bitmap::new(2, 2, data).unwrap();
    assert_eq!(bmp.pixel(1, 1), Some([1, 2, 3, 255]));
    assert_eq!(bmp.pixel(2, 0), None);
}

#[test]
fn bitmap_png_decodes_back_to_same_size() {
    let bmp = Bitmap::new(3, 2, [10u8, 20, 30, 255].repeat(6)).unwrap();
    let png = bmp.to_png().unwrap();
    assert_eq!(&png[1..4], b"PNG");
    let back = decode_image(&png).unwrap();
    assert_eq!((back.width(), back.height()), (3, 2));
    assert!(bmp.to_data_uri().unwrap().starts_with("data:image/png;base64,"));
}

use super::*;

#[test]
fn zero_sigma_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn constant_image_is_unchanged() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn single_pixel_energy_spreads_but_is_kept() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = blur_rgba8_premul(&src, w, h, 0.8).unwrap();

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);
    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 8);
}

#[test]
fn length_mismatch_is_an_error() {
    assert!(blur_rgba8_premul(&[0u8; 12], 2, 2, 1.0).is_err());
}

#[test]
fn region_blur_leaves_far_pixels_alone() {
    let (w, h) = (32u32, 8u32);
    let mut buf = vec![0u8; (w * h * 4) as usize];
    let at = |x: u32, y: u32| ((y * w + x) * 4) as usize;
    buf[at(2, 4) + 3] = 255;
    buf[at(30, 4) + 3] = 255;

    let bounds = PixelBounds {
        x0: 2,
        y0: 4,
        x1: 3,
        y1: 5,
    };
    blur_region_in_place(&mut buf, w, h, bounds, 1.0).unwrap();

    assert!(buf[at(2, 4) + 3] < 255);
    assert!(buf[at(3, 4) + 3] > 0);
    assert_eq!(buf[at(30, 4) + 3], 255);
}

#[test]
fn bounds_expand_is_clamped() {
    let b = PixelBounds {
        x0: 1,
        y0: 1,
        x1: 5,
        y1: 5,
    }
    .expand_within(3, 6, 10);
    assert_eq!(
        b,
        PixelBounds {
            x0: 0,
            y0: 0,
            x1: 6,
            y1: 8
        }
    );
    assert_eq!(radius_for_sigma(1.5), 5);
    assert_eq!(radius_for_sigma(0.0), 0);
}

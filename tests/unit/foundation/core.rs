use super::*;

#[test]
fn premul_from_straight_scales_channels() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.a, 128);
    assert_eq!(c.r, 128);
    assert_eq!(c.g, 64);
    assert_eq!(c.b, 0);
}

#[test]
fn premultiply_zero_alpha_clears_color() {
    let mut px = vec![200u8, 100, 50, 0, 10, 20, 30, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0, 10, 20, 30, 255]);
}

#[test]
fn unpremultiply_inverts_premultiply_for_opaque_and_half_alpha() {
    let mut px = vec![255u8, 0, 0, 128, 1, 2, 3, 255];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[4..], &[1, 2, 3, 255]);
    assert_eq!(px[3], 128);
    assert!(px[0] >= 254);
    assert_eq!(px[1], 0);
}

use super::*;

#[test]
fn defaults_match_editor_startup_state() {
    let p = CompositionParams::default();
    assert_eq!(p.padding, 48);
    assert!(p.padding_enabled);
    assert_eq!(p.border_radius, 20);
    assert_eq!(p.shadow_intensity, 27);
    assert!(!p.shadow_inset);
    assert_eq!(p.image_scale_percent, 100);
    assert_eq!(p.aspect_ratio, AspectRatio::original());
    assert_eq!(p.logo.size_px, 50);
    assert_eq!(p.logo.position, LogoPosition::BottomRight);
}

#[test]
fn effective_padding_respects_toggle() {
    let mut p = CompositionParams::default();
    p.padding_enabled = false;
    assert_eq!(p.effective_padding(), 0);
    assert_eq!(p.padding, 48);
}

#[test]
fn resolve_matches_named_ratios() {
    assert_eq!(AspectRatio::resolve(Some(16.0 / 9.0)).label(), "16:9");
    assert_eq!(AspectRatio::resolve(Some(1.0)).label(), "1:1");
    assert_eq!(AspectRatio::resolve(None).label(), "Original");
}

#[test]
fn resolve_synthesizes_custom_labels() {
    let r = AspectRatio::resolve(Some(2.0 / 3.0));
    assert_eq!(r.label(), "Custom (2:3)");
    assert_eq!(r.value(), Some(2.0 / 3.0));

    let r = AspectRatio::resolve(Some(std::f64::consts::PI));
    assert_eq!(r.label(), "Custom (3.14:1)");
}

#[test]
fn resolve_rejects_degenerate_values() {
    assert_eq!(AspectRatio::resolve(Some(0.0)), AspectRatio::original());
    assert_eq!(AspectRatio::resolve(Some(-1.0)), AspectRatio::original());
    assert_eq!(AspectRatio::resolve(Some(f64::NAN)), AspectRatio::original());
}

#[test]
fn named_lookup_is_case_insensitive() {
    assert_eq!(AspectRatio::named("original"), Some(AspectRatio::original()));
    assert_eq!(AspectRatio::named("9:16").unwrap().value(), Some(9.0 / 16.0));
    assert!(AspectRatio::named("5:4").is_none());
}

#[test]
fn logo_position_uses_kebab_case_names() {
    let p: LogoPosition = serde_json::from_str("\"center-bottom\"").unwrap();
    assert_eq!(p, LogoPosition::CenterBottom);
    assert_eq!(
        serde_json::to_string(&LogoPosition::TopLeft).unwrap(),
        "\"top-left\""
    );
}

use super::*;
use crate::assets::decode::encode_png;
use crate::session::notify::RecordingNotifier;
use crate::export::exporter::ExportRenderer;
use serde_json::json;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sparkle-cfg-{tag}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(dir: &Path, name: &str, w: u32, h: u32) {
    let png = encode_png(w, h, &[0, 128, 0, 255].repeat((w * h) as usize)).unwrap();
    std::fs::write(dir.join(name), png).unwrap();
}

fn editor() -> Editor<RecordingNotifier> {
    Editor::with_parts(
        Viewport::unbounded(),
        ExportRenderer::with_cpu(),
        RecordingNotifier::new(),
    )
}

#[test]
fn parses_minimal_and_full_files() {
    let min = SessionConfig::from_json_str(r#"{"image": "shot.png"}"#).unwrap();
    assert_eq!(min.image, "shot.png");
    assert!(min.template.is_none());

    let full: SessionConfig = serde_json::from_value(json!({
        "image": "a/shot.png",
        "logo": "logo.png",
        "background": {"mode": "plain", "value": "Sunset"},
        "padding": 16,
        "shadow": 60,
        "aspect_ratio": "16:9",
        "logo_position": "center-bottom",
        "template": "Reddit",
        "viewport_width": 800.0
    }))
    .unwrap();
    assert_eq!(full.logo_position, Some(LogoPosition::CenterBottom));
    assert_eq!(full.background.as_ref().unwrap().mode, Some(BackgroundMode::Plain));
    full.validate().unwrap();
}

#[test]
fn unknown_fields_are_rejected() {
    let err = SessionConfig::from_json_str(r#"{"image": "a.png", "zoom": 3}"#).unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));
}

#[test]
fn validation_catches_bad_paths_and_names() {
    let mut cfg = SessionConfig {
        image: "../escape.png".to_owned(),
        ..SessionConfig::default()
    };
    assert!(cfg.validate().is_err());
    cfg.image = "/abs.png".to_owned();
    assert!(cfg.validate().is_err());
    cfg.image = "ok.png".to_owned();
    cfg.template = Some("myspace".to_owned());
    assert!(cfg.validate().is_err());
    cfg.template = None;
    cfg.aspect_ratio = Some("wide".to_owned());
    assert!(cfg.validate().is_err());
    cfg.aspect_ratio = None;
    cfg.viewport_width = Some(0.0);
    assert!(cfg.validate().is_err());
}

#[test]
fn aspect_ratio_forms() {
    assert_eq!(parse_aspect_ratio("original").unwrap().value(), None);
    assert_eq!(parse_aspect_ratio("16:9").unwrap().label(), "16:9");
    assert_eq!(parse_aspect_ratio("8:6").unwrap().label(), "4:3");
    assert_eq!(parse_aspect_ratio("1.5").unwrap().label(), "Custom (3:2)");
    assert!(parse_aspect_ratio("0:1").is_err());
    assert!(parse_aspect_ratio("-2").is_err());
}

#[test]
fn apply_loads_images_and_lets_fields_override_template() {
    let dir = temp_dir("apply");
    write_png(&dir, "shot.png", 40, 20);
    write_png(&dir, "logo.png", 8, 8);
    let cfg: SessionConfig = serde_json::from_value(json!({
        "image": "shot.png",
        "logo": "./logo.png",
        "template": "Instagram",
        "padding": 10,
        "background": {"mode": "plain", "value": "Black"},
        "viewport_width": 500.0
    }))
    .unwrap();

    let mut ed = editor();
    cfg.apply(&mut ed, &dir).unwrap();

    let p = ed.store().params();
    assert_eq!(p.padding, 10);
    assert_eq!(p.border_radius, 16);
    assert_eq!(p.aspect_ratio.label(), "1:1");
    assert!(p.logo.resource.is_some());
    assert_eq!(ed.store().background().mode, BackgroundMode::Plain);
    assert_eq!(ed.store().background().swatch, Swatch::parse("#000000"));
    assert_eq!(ed.live().viewport().max_width, Some(500.0));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn encoded_swatch_values_are_accepted() {
    let dir = temp_dir("swatch");
    write_png(&dir, "shot.png", 4, 4);
    let cfg: SessionConfig = serde_json::from_value(json!({
        "image": "shot.png",
        "background": {"mode": "gradient", "value": "#ffffff,#000000"}
    }))
    .unwrap();
    let mut ed = editor();
    cfg.apply(&mut ed, &dir).unwrap();
    assert!(matches!(ed.store().background().swatch, Swatch::Gradient(_, _)));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn background_value_without_mode_keeps_loaded_background_image() {
    let dir = temp_dir("bgimage");
    write_png(&dir, "shot.png", 4, 4);
    write_png(&dir, "bg.png", 8, 8);
    let cfg = SessionConfig::from_json_str(
        r#"{"image": "shot.png", "background_image": "bg.png", "background": {"value": "Sunset"}}"#,
    )
    .unwrap();
    assert_eq!(cfg.background.as_ref().unwrap().mode, None);

    let mut ed = editor();
    cfg.apply(&mut ed, &dir).unwrap();
    let bg = ed.store().background();
    assert_eq!(bg.mode, BackgroundMode::Image);
    assert!(bg.image.is_some());
    assert!(matches!(bg.swatch, Swatch::Gradient(_, _)));

    let cfg: SessionConfig = serde_json::from_value(json!({
        "image": "shot.png",
        "background_image": "bg.png",
        "background": {"mode": "plain"}
    }))
    .unwrap();
    let mut ed = editor();
    cfg.apply(&mut ed, &dir).unwrap();
    assert_eq!(ed.store().background().mode, BackgroundMode::Plain);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn missing_or_corrupt_images_fail() {
    let dir = temp_dir("missing");
    std::fs::write(dir.join("bad.png"), b"nope").unwrap();
    let mut ed = editor();

    let missing = SessionConfig {
        image: "absent.png".to_owned(),
        ..SessionConfig::default()
    };
    assert!(missing.apply(&mut ed, &dir).is_err());

    let corrupt = SessionConfig {
        image: "bad.png".to_owned(),
        ..SessionConfig::default()
    };
    let err = corrupt.apply(&mut ed, &dir).unwrap_err();
    assert!(err.to_string().starts_with("decode error:"));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn from_path_uses_parent_as_root() {
    let dir = temp_dir("path");
    let file = dir.join("session.json");
    std::fs::write(&file, r#"{"image": "shot.png"}"#).unwrap();
    let (cfg, root) = SessionConfig::from_path(&file).unwrap();
    assert_eq!(cfg.image, "shot.png");
    assert_eq!(root, dir);
    let _ = std::fs::remove_dir_all(&dir);
}

use super::*;

#[test]
fn two_color_value_splits_on_first_comma() {
    let s = Swatch::parse("#ff0000,#00ff00");
    assert_eq!(
        s,
        Swatch::Gradient(Color::rgb8(255, 0, 0), Color::rgb8(0, 255, 0))
    );
    assert_eq!(s.primary(), Color::rgb8(255, 0, 0));
    assert_eq!(s.secondary(), Some(Color::rgb8(0, 255, 0)));
}

#[test]
fn whitespace_around_stops_is_tolerated() {
    let s = Swatch::parse(" #ff0000 , #00ff00 ");
    assert!(matches!(s, Swatch::Gradient(_, _)));
}

#[test]
fn single_and_transparent_values() {
    assert_eq!(Swatch::parse("#ffffff"), Swatch::Solid(Color::WHITE));
    assert_eq!(Swatch::parse("transparent"), Swatch::Transparent);
    assert_eq!(Swatch::parse("#00000000"), Swatch::Transparent);
}

#[test]
fn invalid_or_three_stop_values_fall_back_to_transparent() {
    assert_eq!(Swatch::parse("#ff0000,#00ff00,#0000ff"), Swatch::Transparent);
    assert_eq!(Swatch::parse("#ff0000,nope"), Swatch::Transparent);
    assert_eq!(Swatch::parse(""), Swatch::Transparent);
}

#[test]
fn encode_is_inverse_of_parse() {
    for v in ["#00d2ff,#3a7bd5", "#000000", "transparent"] {
        assert_eq!(Swatch::parse(v).encode(), v);
    }
}

#[test]
fn builtin_catalog_has_beach_first_and_none_last() {
    let cat = SwatchCatalog::builtin();
    assert_eq!(cat.entries().len(), 14);
    assert_eq!(cat.entries()[0].name, "Beach");
    assert!(cat.entries().last().unwrap().swatch.is_transparent());
    assert!(cat.find("sky").is_some());
}

#[test]
fn custom_gradients_are_numbered() {
    let mut cat = SwatchCatalog::builtin();
    let first = cat
        .add_custom_gradient(Color::rgb8(255, 117, 140), Color::rgb8(255, 126, 179))
        .name
        .clone();
    let second = cat.add_custom_gradient(Color::BLACK, Color::WHITE).name.clone();
    assert_eq!(first, "Custom 1");
    assert_eq!(second, "Custom 2");
    assert_eq!(cat.entries().len(), 16);
}

use super::*;

#[test]
fn six_platforms_in_order() {
    let names: Vec<_> = Template::all().iter().map(|t| t.name).collect();
    assert_eq!(
        names,
        ["LinkedIn", "Instagram", "Twitter/X", "Facebook", "Pinterest", "Reddit"]
    );
}

#[test]
fn only_reddit_uses_inset() {
    let inset: Vec<_> = TEMPLATES.iter().filter(|t| t.shadow_inset).map(|t| t.name).collect();
    assert_eq!(inset, ["Reddit"]);
}

#[test]
fn lookup_is_forgiving() {
    assert_eq!(Template::find("instagram").unwrap().padding, 24);
    assert_eq!(Template::find("X").unwrap().name, "Twitter/X");
    assert_eq!(Template::find(" twitter ").unwrap().shadow_intensity, 18);
    assert!(Template::find("myspace").is_none());
}

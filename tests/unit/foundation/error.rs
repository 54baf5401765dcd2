use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SparkleError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SparkleError::decode("x").to_string().contains("decode error:"));
    assert!(SparkleError::render("x").to_string().contains("render error:"));
    assert!(SparkleError::export("x").to_string().contains("export error:"));
    assert!(
        SparkleError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SparkleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

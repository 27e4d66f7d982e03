use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TsgError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(TsgError::config("x").to_string().contains("config error:"));
    assert!(
        TsgError::geometry("x")
            .to_string()
            .contains("geometry error:")
    );
    assert!(
        TsgError::registration("x")
            .to_string()
            .contains("registration error:")
    );
    assert!(TsgError::render("x").to_string().contains("render error:"));
    assert!(
        TsgError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TsgError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_convert_to_serde_variant() {
    let err: TsgError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, TsgError::Serde(_)));
}

use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CounterError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        CounterError::font_load("x")
            .to_string()
            .contains("font load error:")
    );
    assert!(
        CounterError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(CounterError::encode("x").to_string().contains("encode error:"));
}

#[test]
fn only_invalid_input_is_a_bad_request() {
    assert!(CounterError::invalid_input("fps").is_invalid_input());
    assert!(!CounterError::font_load("missing").is_invalid_input());
    assert!(!CounterError::encode("gif").is_invalid_input());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CounterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

use super::*;

#[test]
fn empty_form_uses_defaults() {
    let req = RenderRequest::from_form_fields(std::iter::empty::<(&str, &str)>()).unwrap();
    assert_eq!(req, RenderRequest::default());
    assert_eq!(req.annual_amount, 50_000_000.0);
    assert_eq!(req.duration_seconds, 10.0);
    assert_eq!(req.fps, 30.0);
    assert_eq!(req.font_path, PathBuf::from("Meghana.ttf"));
    assert_eq!(req.output_directory, PathBuf::from("output_frames"));
}

#[test]
fn form_fields_override_defaults() {
    let req = RenderRequest::from_form_fields([
        ("annual_salary", "120000"),
        ("duration_sec", " 2.5 "),
        ("fps", "24"),
        ("font_path", "fonts/Inter.ttf"),
        ("output_dir", "frames"),
        ("submit", "Generate"),
    ])
    .unwrap();
    assert_eq!(req.annual_amount, 120_000.0);
    assert_eq!(req.duration_seconds, 2.5);
    assert_eq!(req.fps, 24.0);
    assert_eq!(req.font_path, PathBuf::from("fonts/Inter.ttf"));
    assert_eq!(req.output_directory, PathBuf::from("frames"));
}

#[test]
fn non_numeric_fields_are_invalid_input() {
    for (key, value) in [
        ("annual_salary", "lots"),
        ("duration_sec", ""),
        ("fps", "thirty"),
    ] {
        let err = RenderRequest::from_form_fields([(key, value)]).unwrap_err();
        assert!(err.is_invalid_input(), "{key}={value:?} should be rejected");
    }
}

#[test]
fn negative_amount_is_accepted() {
    let req = RenderRequest::from_form_fields([("annualAmount", "-5000")]).unwrap();
    assert_eq!(req.annual_amount, -5000.0);
}

#[test]
fn empty_paths_fall_back_to_defaults() {
    let req = RenderRequest::from_form_fields([("font_path", ""), ("output_dir", "  ")]).unwrap();
    assert_eq!(req.font_path, PathBuf::from(DEFAULT_FONT_PATH));
    assert_eq!(req.output_directory, PathBuf::from(DEFAULT_OUTPUT_DIRECTORY));
}

#[test]
fn key_value_pairs_require_equals_sign() {
    let req = RenderRequest::from_key_value_pairs(&["fps=12", "duration_sec=1"]).unwrap();
    assert_eq!(req.fps, 12.0);
    assert_eq!(req.schedule().total_frames(), 12);

    let err = RenderRequest::from_key_value_pairs(&["fps"]).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn json_request_fills_missing_fields() {
    let req = RenderRequest::from_json_reader(
        br#"{ "annualAmount": 31536000, "durationSeconds": 2, "fps": 1 }"#.as_slice(),
    )
    .unwrap();
    assert_eq!(req.annual_amount, 31_536_000.0);
    assert_eq!(req.schedule().total_frames(), 2);
    assert_eq!(req.output_directory, PathBuf::from(DEFAULT_OUTPUT_DIRECTORY));

    let err = RenderRequest::from_json_reader(br#"{ "fps": "fast" }"#.as_slice()).unwrap_err();
    assert!(err.is_invalid_input());
}

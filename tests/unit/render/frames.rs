use super::*;

fn temp_dir(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "salary_counter_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn zero_frames_touch_nothing() {
    let out = temp_dir("zero_frames");
    let request = RenderRequest {
        annual_amount: 100.0,
        duration_seconds: 0.1,
        fps: 3.0,
        font_path: out.join("no_font_needed.ttf"),
        output_directory: out.clone(),
    };
    assert_eq!(render_frames(&request).unwrap(), 0);
    assert!(!out.exists());
}

#[test]
fn non_positive_fps_is_not_an_error() {
    let out = temp_dir("negative_fps");
    let request = RenderRequest {
        fps: -30.0,
        output_directory: out.clone(),
        ..RenderRequest::new(1_000.0)
    };
    assert_eq!(render_frames(&request).unwrap(), 0);
    assert!(!out.exists());
}

#[test]
fn font_failure_aborts_before_directory_is_created() {
    let out = temp_dir("font_failure");
    let request = RenderRequest {
        annual_amount: 100.0,
        duration_seconds: 1.0,
        fps: 2.0,
        font_path: out.join("missing.ttf"),
        output_directory: out.join("frames"),
    };
    let err = render_frames(&request).unwrap_err();
    assert!(matches!(err, crate::CounterError::FontLoad(_)));
    assert!(!out.join("frames").exists());
}

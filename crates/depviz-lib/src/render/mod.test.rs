use super::*;
use std::fs;
use tempfile::TempDir;

const SAMPLE: &str = "digraph dependencies {\n    \"A\" -> \"B\";\n}\n";

#[test]
fn test_output_format_from_extension() {
    assert_eq!(OutputFormat::from_path(Path::new("g.svg")), Some(OutputFormat::Svg));
    assert_eq!(OutputFormat::from_path(Path::new("g.png")), Some(OutputFormat::Png));
    assert_eq!(OutputFormat::from_path(Path::new("g.PNG")), None);
    assert_eq!(OutputFormat::from_path(Path::new("g.Svg")), None);
    assert_eq!(OutputFormat::from_path(Path::new("g.jpeg")), Some(OutputFormat::Jpg));
    assert_eq!(OutputFormat::from_path(Path::new("out/g.pdf")), Some(OutputFormat::Pdf));
    assert_eq!(OutputFormat::from_path(Path::new("g.gif")), None);
    assert_eq!(OutputFormat::from_path(Path::new("graph")), None);
}

#[test]
fn test_missing_renderer_saves_dot_source() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("graph.svg");
    let renderer = DiagramRenderer::new("depviz-test-no-such-binary");

    let outcome = renderer.render(SAMPLE, &target, OutputFormat::Svg).unwrap();

    let saved = temp_dir.path().join("graph.dot");
    match outcome {
        RenderOutcome::SourceSaved { path, reason } => {
            assert_eq!(path, saved);
            assert!(reason.contains("depviz-test-no-such-binary"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(fs::read_to_string(saved).unwrap(), SAMPLE);
    assert!(!target.exists());
}

#[test]
fn test_fallback_write_failure_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("missing-dir").join("graph.svg");
    let renderer = DiagramRenderer::new("depviz-test-no-such-binary");

    let err = renderer.render(SAMPLE, &target, OutputFormat::Svg).unwrap_err();
    assert!(matches!(err, RenderError::SourceWriteFailed { .. }));
}

#[cfg(unix)]
fn fake_dot(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-dot");
    fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    script
}

#[cfg(unix)]
#[test]
fn test_renderer_receives_format_target_and_stdin() {
    let temp_dir = TempDir::new().unwrap();
    // Copy stdin to the -o target, prefixed with the -T argument
    let script = fake_dot(
        temp_dir.path(),
        r#"fmt="$1"; out="$3"; { echo "$fmt"; cat; } > "$out""#,
    );
    let target = temp_dir.path().join("graph.png");

    let outcome = DiagramRenderer::new(script.to_string_lossy())
        .render(SAMPLE, &target, OutputFormat::Png)
        .unwrap();

    assert_eq!(outcome, RenderOutcome::Rendered { path: target.clone() });
    assert_eq!(fs::read_to_string(&target).unwrap(), format!("-Tpng\n{}", SAMPLE));
}

#[cfg(unix)]
#[test]
fn test_failing_renderer_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    let script = fake_dot(temp_dir.path(), "cat > /dev/null; echo 'syntax error' >&2; exit 2");
    let target = temp_dir.path().join("graph.pdf");

    let outcome = DiagramRenderer::new(script.to_string_lossy())
        .render(SAMPLE, &target, OutputFormat::Pdf)
        .unwrap();

    match outcome {
        RenderOutcome::SourceSaved { path, reason } => {
            assert_eq!(path, temp_dir.path().join("graph.dot"));
            assert!(reason.contains("syntax error"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn test_renderer_that_ignores_stdin_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    // Exits successfully without reading, so the graph cannot be delivered
    let script = fake_dot(temp_dir.path(), "exit 0");
    let target = temp_dir.path().join("graph.svg");
    let large = format!("digraph dependencies {{\n{}}}\n", "    \"A\" -> \"B\";\n".repeat(100_000));

    let outcome = DiagramRenderer::new(script.to_string_lossy())
        .render(&large, &target, OutputFormat::Svg)
        .unwrap();

    match outcome {
        RenderOutcome::SourceSaved { path, reason } => {
            assert_eq!(path, temp_dir.path().join("graph.dot"));
            assert!(reason.contains("could not send graph"));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(fs::read_to_string(temp_dir.path().join("graph.dot")).unwrap(), large);
}

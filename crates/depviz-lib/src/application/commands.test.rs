use super::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

const DIAMOND: &str = r#"
A = ["B", "C"]
B = ["D"]
C = ["D"]
D = []
"#;

const CYCLIC: &str = r#"
A = ["B"]
B = ["C"]
C = ["A"]
"#;

/// Write a fixture graph plus settings pointing at it; returns the config
fn fixture_config(dir: &Path, root: &str, graph: &str) -> AppConfig {
    fs::write(dir.join("graph.toml"), graph).unwrap();
    fs::write(
        dir.join("config.xml"),
        format!(
            "<config>\n  <package_name>{}</package_name>\n  <repository_url></repository_url>\n  <test_mode>true</test_mode>\n  <test_repository_path>graph.toml</test_repository_path>\n  <output_file>graph.svg</output_file>\n</config>\n",
            root
        ),
    )
    .unwrap();

    AppConfig {
        config_file: dir.join("config.xml"),
        dot_command: "depviz-test-no-such-binary".to_string(),
        ..AppConfig::default()
    }
}

fn run(command: Commands, config: &AppConfig) -> Result<String> {
    let mut out = Vec::new();
    execute_command_with_output(command, config, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_config_lists_settings_between_rulers() {
    let temp_dir = TempDir::new().unwrap();
    let config = fixture_config(temp_dir.path(), "A", DIAMOND);

    let output = run(Commands::Config, &config).unwrap();
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines[0], "=".repeat(50));
    assert!(lines.contains(&"package_name: A"));
    assert!(lines.contains(&"test_mode: true"));
    assert_eq!(lines.last(), Some(&"=".repeat(50).as_str()));
}

#[test]
fn test_order_prints_numbered_load_order() {
    let temp_dir = TempDir::new().unwrap();
    let config = fixture_config(temp_dir.path(), "a", DIAMOND);

    let output = run(Commands::Order, &config).unwrap();
    assert_eq!(output, "  1. D\n  2. B\n  3. C\n  4. A\n");
}

#[test]
fn test_order_fails_on_cycle() {
    let temp_dir = TempDir::new().unwrap();
    let config = fixture_config(temp_dir.path(), "A", CYCLIC);

    let err = run(Commands::Order, &config).unwrap_err();
    assert!(err.to_string().contains("A → B → C → A"));
}

#[test]
fn test_deps_prints_sorted_closure() {
    let temp_dir = TempDir::new().unwrap();
    let config = fixture_config(temp_dir.path(), "A", DIAMOND);

    let output = run(Commands::Deps, &config).unwrap();
    assert_eq!(output, "B\nC\nD\n");
}

#[test]
fn test_deps_of_cyclic_root_includes_root() {
    let temp_dir = TempDir::new().unwrap();
    let config = fixture_config(temp_dir.path(), "A", CYCLIC);

    let output = run(Commands::Deps, &config).unwrap();
    assert_eq!(output, "A\nB\nC\n");
}

#[test]
fn test_dot_prints_graph() {
    let temp_dir = TempDir::new().unwrap();
    let config = fixture_config(temp_dir.path(), "A", CYCLIC);

    let output = run(Commands::Dot, &config).unwrap();
    assert!(output.starts_with("digraph dependencies {"));
    assert!(output.contains("\"C\" -> \"A\" [color=red, penwidth=2];"));
    assert!(output.ends_with("}\n"));
}

#[test]
fn test_graph_without_renderer_saves_dot_source() {
    let temp_dir = TempDir::new().unwrap();
    let config = fixture_config(temp_dir.path(), "A", CYCLIC);

    let output = run(Commands::Graph { output: None }, &config).unwrap();

    assert!(output.contains("A: 3 packages, 3 dependencies"));
    assert!(output.contains("A → B → C → A"));
    assert!(output.contains("DOT source saved to"));
    let saved = fs::read_to_string(temp_dir.path().join("graph.dot")).unwrap();
    assert!(saved.starts_with("digraph dependencies {"));
}

#[test]
fn test_graph_output_override_and_failed_lookups() {
    let temp_dir = TempDir::new().unwrap();
    let config = fixture_config(temp_dir.path(), "A", r#"A = ["B", "GHOST"]
B = []"#);
    let target = temp_dir.path().join("custom.pdf");

    let output = run(
        Commands::Graph {
            output: Some(target.clone()),
        },
        &config,
    )
    .unwrap();

    assert!(output.contains("Failed lookups:"));
    assert!(output.contains("GHOST"));
    assert!(temp_dir.path().join("custom.dot").exists());
}

#[test]
fn test_graph_rejects_unknown_output_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config = fixture_config(temp_dir.path(), "A", DIAMOND);

    let err = run(
        Commands::Graph {
            output: Some(temp_dir.path().join("graph.bmp")),
        },
        &config,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unsupported diagram format"));
}

#[test]
fn test_missing_settings_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config = AppConfig {
        config_file: temp_dir.path().join("absent.xml"),
        ..AppConfig::default()
    };

    let err = run(Commands::Deps, &config).unwrap_err();
    assert!(err.to_string().contains("Configuration file not found"));
}

#[test]
fn test_root_is_normalized_by_provider() {
    let temp_dir = TempDir::new().unwrap();
    let config = fixture_config(temp_dir.path(), "a", DIAMOND);

    let (_, resolution) = resolve(&config).unwrap();
    assert_eq!(resolution.root.as_str(), "A");
    assert!(resolution.failed_lookups.is_empty());
}

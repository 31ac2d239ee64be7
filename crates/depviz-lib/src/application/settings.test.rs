use super::*;
use std::fs;
use tempfile::TempDir;

fn write_settings(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("config.xml");
    fs::write(&path, format!("<config>\n{}\n</config>\n", body)).unwrap();
    path
}

#[test]
fn test_loads_registry_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(
        temp_dir.path(),
        r#"
  <package_name> serde </package_name>
  <repository_url>https://crates.io</repository_url>
  <test_mode>false</test_mode>
  <output_file>graph.svg</output_file>"#,
    );

    let settings = ResolutionSettings::load(&path).unwrap();

    assert_eq!(settings.package_name, "serde");
    assert!(!settings.test_mode);
    assert_eq!(settings.output_format, OutputFormat::Svg);
    assert_eq!(settings.output_file, temp_dir.path().join("graph.svg"));
    assert_eq!(
        settings.source(),
        PackageSource::Registry {
            url: "https://crates.io".to_string()
        }
    );
}

#[test]
fn test_loads_fixture_settings_with_empty_repository_url() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("graph.toml"), "A = []\n").unwrap();
    let path = write_settings(
        temp_dir.path(),
        r#"
  <package_name>A</package_name>
  <repository_url></repository_url>
  <test_mode>TRUE</test_mode>
  <test_repository_path>graph.toml</test_repository_path>
  <output_file>out.png</output_file>"#,
    );

    let settings = ResolutionSettings::load(&path).unwrap();

    assert!(settings.test_mode);
    assert_eq!(settings.repository_url, "");
    assert_eq!(
        settings.source(),
        PackageSource::Fixture {
            path: temp_dir.path().join("graph.toml")
        }
    );
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = ResolutionSettings::load(&temp_dir.path().join("absent.xml")).unwrap_err();
    assert!(matches!(err, SettingsError::NotFound { .. }));
}

#[test]
fn test_malformed_xml() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.xml");
    fs::write(&path, "<config><package_name>A</output_file></config>").unwrap();

    let err = ResolutionSettings::load(&path).unwrap_err();
    assert!(matches!(err, SettingsError::Xml { .. }));
}

#[test]
fn test_missing_package_name() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(
        temp_dir.path(),
        "<repository_url>https://crates.io</repository_url><output_file>g.svg</output_file>",
    );

    let err = ResolutionSettings::load(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::MissingParameter {
            name: "package_name"
        }
    ));
}

#[test]
fn test_package_name_character_rules() {
    let temp_dir = TempDir::new().unwrap();
    let accepted = write_settings(
        temp_dir.path(),
        "<package_name>tokio-util_2</package_name><repository_url>https://crates.io</repository_url><output_file>g.svg</output_file>",
    );
    assert!(ResolutionSettings::load(&accepted).is_ok());

    let rejected = write_settings(
        temp_dir.path(),
        "<package_name>bad name!</package_name><repository_url>https://crates.io</repository_url><output_file>g.svg</output_file>",
    );
    let err = ResolutionSettings::load(&rejected).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::InvalidParameter {
            name: "package_name",
            ..
        }
    ));

    let separators_only = write_settings(
        temp_dir.path(),
        "<package_name>__-</package_name><repository_url>https://crates.io</repository_url><output_file>g.svg</output_file>",
    );
    assert!(matches!(
        ResolutionSettings::load(&separators_only).unwrap_err(),
        SettingsError::InvalidParameter {
            name: "package_name",
            ..
        }
    ));
}

#[test]
fn test_invalid_test_mode() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(
        temp_dir.path(),
        "<package_name>A</package_name><test_mode>maybe</test_mode><repository_url>https://crates.io</repository_url><output_file>g.svg</output_file>",
    );

    let err = ResolutionSettings::load(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::InvalidParameter {
            name: "test_mode",
            ..
        }
    ));
}

#[test]
fn test_repository_url_required_outside_test_mode() {
    let temp_dir = TempDir::new().unwrap();
    let missing = write_settings(
        temp_dir.path(),
        "<package_name>A</package_name><output_file>g.svg</output_file>",
    );
    assert!(matches!(
        ResolutionSettings::load(&missing).unwrap_err(),
        SettingsError::MissingParameter {
            name: "repository_url"
        }
    ));

    let wrong_scheme = write_settings(
        temp_dir.path(),
        "<package_name>A</package_name><repository_url>ftp://mirror</repository_url><output_file>g.svg</output_file>",
    );
    assert!(matches!(
        ResolutionSettings::load(&wrong_scheme).unwrap_err(),
        SettingsError::InvalidParameter {
            name: "repository_url",
            ..
        }
    ));
}

#[test]
fn test_repository_url_element_required_in_test_mode() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("graph.toml"), "A = []\n").unwrap();
    let path = write_settings(
        temp_dir.path(),
        "<package_name>A</package_name><test_mode>true</test_mode><test_repository_path>graph.toml</test_repository_path><output_file>g.svg</output_file>",
    );

    assert!(matches!(
        ResolutionSettings::load(&path).unwrap_err(),
        SettingsError::MissingParameter {
            name: "repository_url"
        }
    ));
}

#[test]
fn test_missing_element_reported_before_invalid_value() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(
        temp_dir.path(),
        "<package_name>bad name!</package_name><repository_url>https://crates.io</repository_url>",
    );

    assert!(matches!(
        ResolutionSettings::load(&path).unwrap_err(),
        SettingsError::MissingParameter {
            name: "output_file"
        }
    ));
}

#[test]
fn test_repository_url_checked_before_test_mode() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(
        temp_dir.path(),
        "<package_name>A</package_name><repository_url></repository_url><test_mode>maybe</test_mode><output_file>g.svg</output_file>",
    );

    assert!(matches!(
        ResolutionSettings::load(&path).unwrap_err(),
        SettingsError::InvalidParameter {
            name: "repository_url",
            ..
        }
    ));
}

#[test]
fn test_fixture_path_must_exist_in_test_mode() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(
        temp_dir.path(),
        "<package_name>A</package_name><repository_url>not a url</repository_url><test_mode>true</test_mode><test_repository_path>nowhere.toml</test_repository_path><output_file>g.svg</output_file>",
    );

    let err = ResolutionSettings::load(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::InvalidParameter {
            name: "test_repository_path",
            ..
        }
    ));
}

#[test]
fn test_output_file_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(
        temp_dir.path(),
        "<package_name>A</package_name><repository_url>https://crates.io</repository_url><output_file>graph.gif</output_file>",
    );

    let err = ResolutionSettings::load(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::InvalidParameter {
            name: "output_file",
            ..
        }
    ));

    let jpeg = write_settings(
        temp_dir.path(),
        "<package_name>A</package_name><repository_url>https://crates.io</repository_url><output_file>graph.jpeg</output_file>",
    );
    assert_eq!(
        ResolutionSettings::load(&jpeg).unwrap().output_format,
        OutputFormat::Jpg
    );

    let uppercase = write_settings(
        temp_dir.path(),
        "<package_name>A</package_name><repository_url>https://crates.io</repository_url><output_file>graph.SVG</output_file>",
    );
    assert!(matches!(
        ResolutionSettings::load(&uppercase).unwrap_err(),
        SettingsError::InvalidParameter {
            name: "output_file",
            ..
        }
    ));
}

#[test]
fn test_empty_output_file_is_invalid() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(
        temp_dir.path(),
        "<package_name>A</package_name><repository_url>https://crates.io</repository_url><output_file>  </output_file>",
    );

    assert!(matches!(
        ResolutionSettings::load(&path).unwrap_err(),
        SettingsError::InvalidParameter {
            name: "output_file",
            ..
        }
    ));
}

#[test]
fn test_entries_in_document_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_settings(
        temp_dir.path(),
        "<package_name>A</package_name><repository_url>https://crates.io</repository_url><output_file>g.svg</output_file>",
    );

    let settings = ResolutionSettings::load(&path).unwrap();
    let keys: Vec<&str> = settings.entries().iter().map(|(key, _)| *key).collect();
    assert_eq!(
        keys,
        vec![
            "package_name",
            "repository_url",
            "test_mode",
            "test_repository_path",
            "output_file"
        ]
    );
    assert_eq!(settings.entries()[2].1, "false");
}

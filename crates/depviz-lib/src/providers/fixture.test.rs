use super::*;
use std::fs;
use tempfile::TempDir;

fn id(name: &str) -> PackageId {
    PackageId::from(name)
}

#[test]
fn test_parse_and_lookup() {
    let provider = FixtureProvider::from_toml_str(
        r#"
A = ["B", "C"]
B = ["D"]
C = ["D"]
D = []
"#,
    )
    .unwrap();

    assert_eq!(provider.get_dependencies(&id("C")).unwrap(), vec![id("D")]);
    assert_eq!(
        provider.get_dependencies(&id("A")).unwrap(),
        vec![id("B"), id("C")]
    );
    assert!(provider.get_dependencies(&id("D")).unwrap().is_empty());
}

#[test]
fn test_names_are_uppercased_and_trimmed() {
    let provider = FixtureProvider::from_toml_str(r#"app = [" log ", "Http"]"#).unwrap();

    assert_eq!(provider.normalize(" app "), id("APP"));
    assert_eq!(
        provider.get_dependencies(&id("APP")).unwrap(),
        vec![id("LOG"), id("HTTP")]
    );
}

#[test]
fn test_unknown_package_is_not_found() {
    let provider = FixtureProvider::from_toml_str(r#"A = ["X"]"#).unwrap();

    let err = provider.get_dependencies(&id("X")).unwrap_err();
    assert!(matches!(err, LookupError::NotFound { package } if package == id("X")));
}

#[test]
fn test_case_colliding_keys_are_rejected() {
    let err = FixtureProvider::from_toml_str("a = []\nA = [\"B\"]").unwrap_err();
    assert!(matches!(err, FixtureError::DuplicatePackage { package } if package == id("A")));
}

#[test]
fn test_empty_names_are_rejected() {
    let err = FixtureProvider::from_toml_str(r#"A = ["  "]"#).unwrap_err();
    assert!(matches!(err, FixtureError::EmptyName { owner } if owner == "A"));
}

#[test]
fn test_non_list_values_are_rejected() {
    let err = FixtureProvider::from_toml_str(r#"A = "B""#).unwrap_err();
    assert!(matches!(err, FixtureError::TomlParseError { .. }));
}

#[test]
fn test_load_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("graph.toml");
    fs::write(&path, "ROOT = [\"LEAF\"]\nLEAF = []\n").unwrap();

    let provider = FixtureProvider::load(&path).unwrap();
    assert_eq!(provider.get_dependencies(&id("ROOT")).unwrap(), vec![id("LEAF")]);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = FixtureProvider::load(&temp_dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, FixtureError::FileReadError { .. }));
}

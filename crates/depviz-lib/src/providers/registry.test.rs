// Tests for the registry provider against a local mock server

use super::*;
use mockito::Server;

fn fast_options(max_retries: u32) -> RegistryOptions {
    RegistryOptions {
        timeout: Duration::from_secs(5),
        max_retries,
        backoff: BackoffConfig {
            initial: Duration::from_millis(1),
            max: Duration::from_millis(5),
            multiplier: 2.0,
        },
    }
}

fn id(name: &str) -> PackageId {
    PackageId::from(name)
}

const SERDE_CRATE: &str = r#"{"crate": {"name": "serde", "max_stable_version": "1.0.200", "max_version": "1.0.201-rc.1"}}"#;

#[test]
fn test_backoff_grows_and_caps() {
    let backoff = BackoffConfig {
        initial: Duration::from_millis(100),
        max: Duration::from_millis(350),
        multiplier: 2.0,
    };

    assert_eq!(backoff.delay_for(1), Duration::from_millis(100));
    assert_eq!(backoff.delay_for(2), Duration::from_millis(200));
    assert_eq!(backoff.delay_for(3), Duration::from_millis(350));
    assert_eq!(backoff.delay_for(10), Duration::from_millis(350));
}

#[test]
fn test_rejects_non_http_base_url() {
    let err = RegistryProvider::new("ftp://example.org", RegistryOptions::default())
        .err()
        .unwrap();
    assert!(matches!(err, RegistryError::InvalidBaseUrl { .. }));
}

#[test]
fn test_trailing_slash_is_stripped() {
    let provider = RegistryProvider::new("https://crates.io/", RegistryOptions::default()).unwrap();
    assert_eq!(
        provider.crate_url(&id("serde")),
        "https://crates.io/api/v1/crates/serde"
    );
}

#[test]
fn test_normalize_lowercases() {
    let provider = RegistryProvider::new("https://crates.io", RegistryOptions::default()).unwrap();
    assert_eq!(provider.normalize("  Serde_JSON "), id("serde_json"));
}

#[test]
fn test_fetches_normal_dependencies_of_stable_version() {
    let mut server = Server::new();
    let crate_mock = server
        .mock("GET", "/api/v1/crates/serde")
        .with_status(200)
        .with_body(SERDE_CRATE)
        .create();
    let deps_mock = server
        .mock("GET", "/api/v1/crates/serde/1.0.200/dependencies")
        .with_status(200)
        .with_body(
            r#"{"dependencies": [
                {"crate_id": "serde_derive", "kind": "normal", "optional": true},
                {"crate_id": "Serde_Derive", "kind": "normal"},
                {"crate_id": "serde_json", "kind": "dev"},
                {"crate_id": "cc", "kind": "build"},
                {"crate_id": "itoa"}
            ]}"#,
        )
        .create();

    let provider = RegistryProvider::new(&server.url(), fast_options(0)).unwrap();
    let deps = provider.get_dependencies(&id("serde")).unwrap();

    assert_eq!(deps, vec![id("serde_derive"), id("itoa")]);
    crate_mock.assert();
    deps_mock.assert();
}

#[test]
fn test_falls_back_to_max_version() {
    let mut server = Server::new();
    server
        .mock("GET", "/api/v1/crates/fresh")
        .with_status(200)
        .with_body(r#"{"crate": {"max_stable_version": null, "max_version": "0.1.0-alpha.1"}}"#)
        .create();
    let deps_mock = server
        .mock("GET", "/api/v1/crates/fresh/0.1.0-alpha.1/dependencies")
        .with_status(200)
        .with_body(r#"{"dependencies": []}"#)
        .create();

    let provider = RegistryProvider::new(&server.url(), fast_options(0)).unwrap();

    assert!(provider.get_dependencies(&id("fresh")).unwrap().is_empty());
    deps_mock.assert();
}

#[test]
fn test_missing_versions_is_malformed() {
    let mut server = Server::new();
    server
        .mock("GET", "/api/v1/crates/ghost")
        .with_status(200)
        .with_body(r#"{"crate": {}}"#)
        .create();

    let provider = RegistryProvider::new(&server.url(), fast_options(0)).unwrap();
    let err = provider.get_dependencies(&id("ghost")).unwrap_err();

    assert!(matches!(err, LookupError::MalformedResponse { .. }));
}

#[test]
fn test_not_found() {
    let mut server = Server::new();
    server
        .mock("GET", "/api/v1/crates/nope")
        .with_status(404)
        .create();

    let provider = RegistryProvider::new(&server.url(), fast_options(3)).unwrap();
    let err = provider.get_dependencies(&id("nope")).unwrap_err();

    assert!(matches!(err, LookupError::NotFound { package } if package == id("nope")));
}

#[test]
fn test_invalid_json_is_malformed() {
    let mut server = Server::new();
    server
        .mock("GET", "/api/v1/crates/broken")
        .with_status(200)
        .with_body("<html>not json</html>")
        .create();

    let provider = RegistryProvider::new(&server.url(), fast_options(0)).unwrap();
    let err = provider.get_dependencies(&id("broken")).unwrap_err();

    assert!(matches!(err, LookupError::MalformedResponse { .. }));
}

#[test]
fn test_client_error_is_not_retried() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/v1/crates/forbidden")
        .with_status(403)
        .expect(1)
        .create();

    let provider = RegistryProvider::new(&server.url(), fast_options(3)).unwrap();
    let err = provider.get_dependencies(&id("forbidden")).unwrap_err();

    assert!(matches!(err, LookupError::UnexpectedStatus { status: 403, .. }));
    mock.assert();
}

#[test]
fn test_retries_server_errors_then_succeeds() {
    let mut server = Server::new();
    let unavailable = server
        .mock("GET", "/api/v1/crates/serde")
        .with_status(503)
        .expect(2)
        .create();
    let rate_limited = server
        .mock("GET", "/api/v1/crates/serde")
        .with_status(429)
        .expect(1)
        .create();
    let ok = server
        .mock("GET", "/api/v1/crates/serde")
        .with_status(200)
        .with_body(SERDE_CRATE)
        .expect(1)
        .create();
    server
        .mock("GET", "/api/v1/crates/serde/1.0.200/dependencies")
        .with_status(200)
        .with_body(r#"{"dependencies": [{"crate_id": "serde_derive", "kind": "normal"}]}"#)
        .create();

    let provider = RegistryProvider::new(&server.url(), fast_options(3)).unwrap();
    let deps = provider.get_dependencies(&id("serde")).unwrap();

    assert_eq!(deps, vec![id("serde_derive")]);
    unavailable.assert();
    rate_limited.assert();
    ok.assert();
}

#[test]
fn test_retries_exhausted() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/v1/crates/down")
        .with_status(500)
        .expect(3)
        .create();

    let provider = RegistryProvider::new(&server.url(), fast_options(2)).unwrap();
    let err = provider.get_dependencies(&id("down")).unwrap_err();

    assert!(matches!(err, LookupError::RetriesExhausted { attempts: 3, .. }));
    mock.assert();
}

#[test]
fn test_path_segments_are_encoded() {
    let provider = RegistryProvider::new("https://crates.io", RegistryOptions::default()).unwrap();
    assert_eq!(
        provider.crate_url(&id("weird name")),
        "https://crates.io/api/v1/crates/weird%20name"
    );
    assert_eq!(
        provider.crate_url(&id("serde-json_x.y")),
        "https://crates.io/api/v1/crates/serde-json_x.y"
    );
}

//! E2E tests against a mocked crates.io-compatible registry

use anyhow::Result;
use depviz_lib::application::Commands;
use depviz_lib::application::commands::resolve;
use depviz_lib::graph::PackageId;
use depviz_tests::TestEnvironment;
use depviz_tests::fixtures::{crate_response, dependencies_response};
use mockito::{Mock, Server, ServerGuard};

fn mock_crate(server: &mut ServerGuard, name: &str, dependencies: &[(&str, &str)]) -> (Mock, Mock) {
    let info = server
        .mock("GET", format!("/api/v1/crates/{}", name).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(crate_response(name, "1.0.0").to_string())
        .create();
    let deps = server
        .mock(
            "GET",
            format!("/api/v1/crates/{}/1.0.0/dependencies", name).as_str(),
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(dependencies_response(dependencies).to_string())
        .create();
    (info, deps)
}

#[test]
fn e2e_registry_resolution() -> Result<()> {
    let mut server = Server::new();
    let app = mock_crate(
        &mut server,
        "app",
        &[("serde", "normal"), ("tempfile", "dev"), ("cc", "build"), ("log", "normal")],
    );
    let serde = mock_crate(&mut server, "serde", &[("serde_derive", "normal")]);
    let serde_derive = mock_crate(&mut server, "serde_derive", &[]);
    let log = mock_crate(&mut server, "log", &[("serde", "normal")]);

    let env = TestEnvironment::new()?;
    env.write_registry_settings("App", &server.url(), "graph.svg")?;

    let (_, resolution) = resolve(&env.app_config())?;

    assert_eq!(resolution.root, PackageId::from("app"));
    assert!(resolution.failed_lookups.is_empty());
    assert!(!resolution.graph.contains("tempfile"));
    assert!(!resolution.graph.contains("cc"));
    assert_eq!(
        resolution.load_order()?,
        vec![
            PackageId::from("serde_derive"),
            PackageId::from("serde"),
            PackageId::from("log"),
            PackageId::from("app"),
        ]
    );

    // Every package is looked up exactly once
    for (info, deps) in [app, serde, serde_derive, log] {
        info.assert();
        deps.assert();
    }
    Ok(())
}

#[test]
fn e2e_registry_missing_package_is_a_leaf() -> Result<()> {
    let mut server = Server::new();
    let _app = mock_crate(&mut server, "app", &[("ghost", "normal")]);
    let _ghost = server
        .mock("GET", "/api/v1/crates/ghost")
        .with_status(404)
        .create();

    let env = TestEnvironment::new()?;
    env.write_registry_settings("app", &server.url(), "graph.svg")?;

    let output = env.run(Commands::Deps)?;
    assert_eq!(output, "ghost\n");

    let (_, resolution) = resolve(&env.app_config())?;
    assert_eq!(resolution.failed_lookups, vec![PackageId::from("ghost")]);
    Ok(())
}

//! CLI tests for the depviz binary
//!
//! Each test runs the real binary inside a hermetic directory so no stray
//! `.env` or `config.xml` is picked up.

use assert_cmd::Command;
use depviz_tests::TestEnvironment;
use depviz_tests::fixtures::{DIAMOND, TWO_CYCLE};
use depviz_tests::test_env::MISSING_RENDERER;
use predicates::prelude::*;

fn depviz(env: &TestEnvironment) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("depviz"));
    cmd.current_dir(&env.root_path);
    for var in [
        "DEPVIZ_CONFIG",
        "DEPVIZ_LOG_LEVEL",
        "DEPVIZ_LOG_FORMAT",
        "DEPVIZ_LOG_OUTPUT",
        "DEPVIZ_COLOR",
        "DEPVIZ_NET_TIMEOUT",
        "DEPVIZ_NET_RETRIES",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd.env("DEPVIZ_DOT", MISSING_RENDERER);
    cmd
}

fn diamond_env() -> TestEnvironment {
    let env = TestEnvironment::new().unwrap();
    env.write_fixture("graph.toml", DIAMOND).unwrap();
    env.write_fixture_settings("A", "graph.toml", "graph.svg").unwrap();
    env
}

#[test]
fn no_command_prints_usage_hint() {
    let env = TestEnvironment::new().unwrap();
    depviz(&env)
        .assert()
        .success()
        .stdout(predicate::str::contains("depviz --help"));
}

#[test]
fn config_command_uses_default_settings_file() {
    let env = diamond_env();
    depviz(&env)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("package_name: A"))
        .stdout(predicate::str::contains("test_mode: true"));
}

#[test]
fn order_command_prints_load_order() {
    let env = diamond_env();
    depviz(&env)
        .arg("order")
        .assert()
        .success()
        .stdout("  1. D\n  2. B\n  3. C\n  4. A\n");
}

#[test]
fn deps_command_reads_settings_from_flag() {
    let env = TestEnvironment::new().unwrap();
    env.write_fixture("graph.toml", DIAMOND).unwrap();
    let settings = env.write_fixture_settings("B", "graph.toml", "graph.svg").unwrap();
    std::fs::rename(&settings, env.path("other.xml")).unwrap();

    depviz(&env)
        .args(["--config", "other.xml", "deps"])
        .assert()
        .success()
        .stdout("D\n");
}

#[test]
fn settings_path_from_environment() {
    let env = diamond_env();
    std::fs::rename(env.path("config.xml"), env.path("env.xml")).unwrap();

    depviz(&env)
        .env("DEPVIZ_CONFIG", "env.xml")
        .arg("deps")
        .assert()
        .success()
        .stdout("B\nC\nD\n");
}

#[test]
fn cyclic_order_fails() {
    let env = TestEnvironment::new().unwrap();
    env.write_fixture("graph.toml", TWO_CYCLE).unwrap();
    env.write_fixture_settings("A", "graph.toml", "graph.svg").unwrap();

    depviz(&env)
        .arg("order")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Circular dependency detected: A → B → A"));
}

#[test]
fn missing_settings_file_fails() {
    let env = TestEnvironment::new().unwrap();
    depviz(&env)
        .arg("deps")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn zero_timeout_is_rejected() {
    let env = diamond_env();
    depviz(&env)
        .args(["--net-timeout", "0", "deps"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("net_timeout"));
}

#[test]
fn graph_without_graphviz_saves_dot_source() {
    let env = diamond_env();
    depviz(&env)
        .arg("graph")
        .assert()
        .success()
        .stdout(predicate::str::contains("DOT source saved to"));

    assert!(env.exists("graph.dot"));
}

#[test]
fn dot_command_prints_graph() {
    let env = diamond_env();
    depviz(&env)
        .arg("dot")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph dependencies {"))
        .stdout(predicate::str::contains("\"A\" -> \"B\";"));
}

//! E2E tests for the `graph` command and its renderer fallback

use anyhow::Result;
use depviz_lib::application::Commands;
use depviz_tests::TestEnvironment;
use depviz_tests::fixtures::{DIAMOND, TWO_CYCLE};
use predicates::prelude::*;
use std::fs;

#[test]
fn e2e_graph_falls_back_to_dot_source() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_fixture("graph.toml", TWO_CYCLE)?;
    env.write_fixture_settings("A", "graph.toml", "graph.png")?;

    let output = env.run(Commands::Graph { output: None })?;

    assert!(predicate::str::contains("A: 2 packages, 2 dependencies").eval(&output));
    assert!(predicate::str::contains("A → B → A").eval(&output));
    assert!(predicate::str::contains("dot -Tpng -o").eval(&output));
    assert!(!env.exists("graph.png"));

    let source = fs::read_to_string(env.path("graph.dot"))?;
    assert!(source.contains("\"B\" -> \"A\" [color=red, penwidth=2];"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn e2e_graph_renders_with_graphviz() -> Result<()> {
    use depviz_tests::MockBehavior;

    let mut env = TestEnvironment::new()?;
    env.install_mock_dot(MockBehavior::WriteInput)?;
    env.write_fixture("graph.toml", DIAMOND)?;
    env.write_fixture_settings("A", "graph.toml", "graph.svg")?;

    let output = env.run(Commands::Graph { output: None })?;

    assert!(predicate::str::contains("Diagram written to").eval(&output));
    assert!(!env.exists("graph.dot"));
    let rendered = fs::read_to_string(env.path("graph.svg"))?;
    assert!(rendered.starts_with("digraph dependencies {"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn e2e_graph_reports_renderer_failure() -> Result<()> {
    use depviz_tests::MockBehavior;

    let mut env = TestEnvironment::new()?;
    env.install_mock_dot(MockBehavior::AlwaysFail {
        error: "layout crashed".to_string(),
    })?;
    env.write_fixture("graph.toml", DIAMOND)?;
    env.write_fixture_settings("A", "graph.toml", "graph.svg")?;

    let output = env.run(Commands::Graph {
        output: Some(env.path("out.pdf")),
    })?;

    assert!(predicate::str::contains("layout crashed").eval(&output));
    assert!(env.exists("out.dot"));
    Ok(())
}

//! E2E resolution tests against fixture graphs
//!
//! Drives the whole pipeline (settings file, provider, builder, queries)
//! through the command layer, the way the CLI does.

use anyhow::Result;
use depviz_lib::application::Commands;
use depviz_lib::application::commands::resolve;
use depviz_lib::graph::{DependencyGraph, PackageId, to_dot};
use depviz_tests::TestEnvironment;
use depviz_tests::fixtures::{DIAMOND, MISSING_LEAF, SHARED_CYCLES, TWO_CYCLE};

fn ids(names: &[&str]) -> Vec<PackageId> {
    names.iter().map(|name| PackageId::from(*name)).collect()
}

#[test]
fn e2e_diamond_closure_and_load_order() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_fixture("graph.toml", DIAMOND)?;
    env.write_fixture_settings("A", "graph.toml", "graph.svg")?;

    let (_, resolution) = resolve(&env.app_config())?;

    assert!(!resolution.graph.has_cycles());
    assert_eq!(resolution.closure().into_iter().collect::<Vec<_>>(), ids(&["B", "C", "D"]));
    assert_eq!(resolution.load_order()?, ids(&["D", "B", "C", "A"]));

    assert_eq!(env.run(Commands::Order)?, "  1. D\n  2. B\n  3. C\n  4. A\n");
    assert_eq!(env.run(Commands::Deps)?, "B\nC\nD\n");
    Ok(())
}

#[test]
fn e2e_two_node_cycle_blocks_load_order() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_fixture("graph.toml", TWO_CYCLE)?;
    env.write_fixture_settings("A", "graph.toml", "graph.svg")?;

    let (_, resolution) = resolve(&env.app_config())?;

    assert_eq!(resolution.graph.get_cycles(), &[ids(&["A", "B", "A"])]);
    assert!(resolution.load_order().is_err());

    let err = env.run(Commands::Order).unwrap_err();
    assert_eq!(err.to_string(), "Circular dependency detected: A → B → A");
    Ok(())
}

#[test]
fn e2e_failed_lookup_becomes_leaf() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_fixture("graph.toml", MISSING_LEAF)?;
    env.write_fixture_settings("A", "graph.toml", "graph.svg")?;

    let (_, resolution) = resolve(&env.app_config())?;

    assert_eq!(resolution.failed_lookups, ids(&["X"]));
    assert_eq!(resolution.graph.get_dependencies("A"), vec![&PackageId::from("B"), &PackageId::from("X")]);
    assert!(resolution.graph.get_dependencies("X").is_empty());
    assert_eq!(resolution.load_order()?, ids(&["B", "X", "A"]));
    Ok(())
}

#[test]
fn e2e_distinct_cycle_paths_are_all_reported() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_fixture("graph.toml", SHARED_CYCLES)?;
    env.write_fixture_settings("A", "graph.toml", "graph.svg")?;

    let (_, resolution) = resolve(&env.app_config())?;

    assert_eq!(
        resolution.graph.get_cycles(),
        &[ids(&["A", "B", "A"]), ids(&["A", "B", "C", "A"])]
    );
    let dot = env.run(Commands::Dot)?;
    assert!(dot.contains("    \"B\" -> \"C\" [color=red, penwidth=2];"));
    Ok(())
}

#[test]
fn e2e_isolated_package_is_declared() {
    let mut graph = DependencyGraph::new();
    graph.add_dependency(&PackageId::from("A"), &PackageId::from("B"));
    graph.add_package(&PackageId::from("Z"));

    let dot = to_dot(&graph, &PackageId::from("A"));
    assert!(dot.contains("\n    \"Z\";\n"));
}

#[test]
fn e2e_repeated_runs_are_identical() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_fixture("graph.toml", SHARED_CYCLES)?;
    env.write_fixture_settings("A", "graph.toml", "graph.svg")?;

    let first = env.run(Commands::Dot)?;
    let second = env.run(Commands::Dot)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn e2e_lowercase_root_is_normalized() -> Result<()> {
    let env = TestEnvironment::new()?;
    env.write_fixture("graph.toml", DIAMOND)?;
    env.write_fixture_settings("a", "graph.toml", "graph.svg")?;

    assert_eq!(env.run(Commands::Deps)?, "B\nC\nD\n");
    Ok(())
}

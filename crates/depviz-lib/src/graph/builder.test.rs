// Tests for depth-first discovery and cycle detection

use super::*;
use crate::providers::LookupError;
use std::cell::RefCell;
use std::collections::HashMap;

// ============================================================================
// Test Utilities
// ============================================================================

/// In-memory provider that records every lookup
struct MapProvider {
    responses: HashMap<String, Vec<String>>,
    failing: Vec<String>,
    calls: RefCell<Vec<PackageId>>,
}

impl MapProvider {
    fn new(entries: &[(&str, &[&str])]) -> Self {
        Self {
            responses: entries
                .iter()
                .map(|(package, deps)| {
                    (
                        package.to_string(),
                        deps.iter().map(|d| d.to_string()).collect(),
                    )
                })
                .collect(),
            failing: Vec::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn failing_on(mut self, package: &str) -> Self {
        self.failing.push(package.to_string());
        self
    }

    fn calls(&self) -> Vec<PackageId> {
        self.calls.borrow().clone()
    }
}

impl DependencyProvider for MapProvider {
    fn name(&self) -> &'static str {
        "map"
    }

    fn normalize(&self, raw: &str) -> PackageId {
        PackageId::from(raw)
    }

    fn get_dependencies(&self, package: &PackageId) -> Result<Vec<PackageId>, LookupError> {
        self.calls.borrow_mut().push(package.clone());

        if self.failing.iter().any(|f| f == package.as_str()) {
            return Err(LookupError::MalformedResponse {
                package: package.clone(),
                reason: "simulated failure".to_string(),
            });
        }

        self.responses
            .get(package.as_str())
            .map(|deps| deps.iter().map(|d| PackageId::from(d.as_str())).collect())
            .ok_or_else(|| LookupError::NotFound {
                package: package.clone(),
            })
    }
}

fn id(name: &str) -> PackageId {
    PackageId::from(name)
}

fn ids(names: &[&str]) -> Vec<PackageId> {
    names.iter().map(|name| id(name)).collect()
}

// ============================================================================
// Acyclic Graphs
// ============================================================================

#[test]
fn test_diamond_resolution() {
    let provider = MapProvider::new(&[
        ("A", &["B", "C"]),
        ("B", &["D"]),
        ("C", &["D"]),
        ("D", &[]),
    ]);

    let resolution = GraphBuilder::new(&provider).build(id("A"));

    assert!(!resolution.graph.has_cycles());
    assert!(resolution.failed_lookups.is_empty());
    assert_eq!(resolution.graph.edge_count(), 4);
    assert_eq!(
        resolution.closure().into_iter().collect::<Vec<_>>(),
        ids(&["B", "C", "D"])
    );
    assert_eq!(resolution.load_order().unwrap(), ids(&["D", "B", "C", "A"]));
}

#[test]
fn test_each_package_is_looked_up_once() {
    let provider = MapProvider::new(&[
        ("A", &["B", "C"]),
        ("B", &["D"]),
        ("C", &["D"]),
        ("D", &[]),
    ]);

    GraphBuilder::new(&provider).build(id("A"));

    // Depth-first: B's subtree is finished before C is expanded
    assert_eq!(provider.calls(), ids(&["A", "B", "D", "C"]));
}

#[test]
fn test_edge_into_visited_package_is_recorded() {
    let provider = MapProvider::new(&[("A", &["B", "C"]), ("B", &[]), ("C", &["B"])]);

    let resolution = GraphBuilder::new(&provider).build(id("A"));

    assert_eq!(resolution.graph.get_dependencies("C"), vec![&id("B")]);
    assert!(!resolution.graph.has_cycles());
}

#[test]
fn test_root_without_dependencies() {
    let provider = MapProvider::new(&[("SOLO", &[])]);

    let resolution = GraphBuilder::new(&provider).build(id("SOLO"));

    assert_eq!(resolution.graph.node_count(), 0);
    assert!(resolution.closure().is_empty());
    assert_eq!(resolution.load_order().unwrap(), ids(&["SOLO"]));
}

#[test]
fn test_duplicate_dependencies_from_provider_collapse() {
    let provider = MapProvider::new(&[("A", &["B", "B"]), ("B", &[])]);

    let resolution = GraphBuilder::new(&provider).build(id("A"));

    assert_eq!(resolution.graph.edge_count(), 1);
    assert_eq!(provider.calls(), ids(&["A", "B"]));
}

#[test]
fn test_deep_chain_does_not_recurse_natively() {
    let names: Vec<String> = (0..50_000).map(|i| format!("P{i:05}")).collect();
    let entries: Vec<(String, Vec<String>)> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let deps = names.get(i + 1).cloned().into_iter().collect();
            (name.clone(), deps)
        })
        .collect();
    let provider = MapProvider {
        responses: entries.into_iter().collect(),
        failing: Vec::new(),
        calls: RefCell::new(Vec::new()),
    };

    let resolution = GraphBuilder::new(&provider).build(id("P00000"));

    assert_eq!(resolution.graph.node_count(), 50_000);
    let order = resolution.load_order().unwrap();
    assert_eq!(order.first(), Some(&id("P49999")));
    assert_eq!(order.last(), Some(&id("P00000")));
}

// ============================================================================
// Cycles
// ============================================================================

#[test]
fn test_two_node_cycle() {
    let provider = MapProvider::new(&[("A", &["B"]), ("B", &["A"])]);

    let resolution = GraphBuilder::new(&provider).build(id("A"));

    assert_eq!(resolution.graph.get_cycles(), &[ids(&["A", "B", "A"])]);
    // The cycle-closing edge is part of the adjacency
    assert_eq!(resolution.graph.get_dependencies("B"), vec![&id("A")]);
    assert!(matches!(
        resolution.load_order(),
        Err(DependencyGraphError::CyclicDependency { .. })
    ));
}

#[test]
fn test_cycle_below_root_starts_at_reentry_point() {
    let provider = MapProvider::new(&[
        ("ROOT", &["A"]),
        ("A", &["B"]),
        ("B", &["C"]),
        ("C", &["A"]),
    ]);

    let resolution = GraphBuilder::new(&provider).build(id("ROOT"));

    assert_eq!(resolution.graph.get_cycles(), &[ids(&["A", "B", "C", "A"])]);
    assert!(!resolution.closure().contains("ROOT"));
}

#[test]
fn test_self_loop_is_a_cycle() {
    let provider = MapProvider::new(&[("A", &["A"])]);

    let resolution = GraphBuilder::new(&provider).build(id("A"));

    assert_eq!(resolution.graph.get_cycles(), &[ids(&["A", "A"])]);
    assert!(resolution.closure().contains("A"));
}

#[test]
fn test_distinct_cycles_through_shared_node() {
    let provider = MapProvider::new(&[("A", &["B"]), ("B", &["A", "C"]), ("C", &["A"])]);

    let resolution = GraphBuilder::new(&provider).build(id("A"));

    assert_eq!(
        resolution.graph.get_cycles(),
        &[ids(&["A", "B", "A"]), ids(&["A", "B", "C", "A"])]
    );
}

#[test]
fn test_provider_duplicate_cycle_edge_is_recorded_once() {
    let provider = MapProvider::new(&[("A", &["B"]), ("B", &["A", "A"])]);

    let resolution = GraphBuilder::new(&provider).build(id("A"));

    assert_eq!(resolution.graph.get_cycles().len(), 1);
}

// ============================================================================
// Lookup Failures
// ============================================================================

#[test]
fn test_failed_lookup_becomes_leaf() {
    let provider =
        MapProvider::new(&[("A", &["X", "B"]), ("B", &["C"]), ("C", &[])]).failing_on("X");

    let resolution = GraphBuilder::new(&provider).build(id("A"));

    assert!(resolution.graph.contains("X"));
    assert_eq!(resolution.graph.get_dependencies("A"), vec![&id("X"), &id("B")]);
    assert!(resolution.graph.get_dependencies("X").is_empty());
    // Siblings are still expanded
    assert_eq!(resolution.graph.get_dependencies("B"), vec![&id("C")]);
    assert_eq!(resolution.failed_lookups, ids(&["X"]));
}

#[test]
fn test_unknown_package_is_treated_as_leaf() {
    let provider = MapProvider::new(&[("A", &["MISSING"])]);

    let resolution = GraphBuilder::new(&provider).build(id("A"));

    assert_eq!(resolution.failed_lookups, ids(&["MISSING"]));
    assert_eq!(resolution.load_order().unwrap(), ids(&["MISSING", "A"]));
}

#[test]
fn test_failed_root_lookup_yields_empty_graph() {
    let provider = MapProvider::new(&[]).failing_on("A");

    let resolution = GraphBuilder::new(&provider).build(id("A"));

    assert_eq!(resolution.graph.node_count(), 0);
    assert_eq!(resolution.failed_lookups, ids(&["A"]));
}

#[test]
fn test_builder_accepts_trait_objects() {
    let provider = MapProvider::new(&[("A", &["B"]), ("B", &[])]);
    let dynamic: &dyn DependencyProvider = &provider;

    let resolution = GraphBuilder::new(dynamic).build(dynamic.normalize("A"));

    assert_eq!(resolution.graph.edge_count(), 1);
}

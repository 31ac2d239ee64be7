// Tests for the resolved dependency graph

use super::*;

// ============================================================================
// Test Utilities
// ============================================================================

fn id(name: &str) -> PackageId {
    PackageId::from(name)
}

/// Build a graph from `(from, to)` pairs
fn graph_from(edges: &[(&str, &str)]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for (from, to) in edges {
        graph.add_dependency(&id(from), &id(to));
    }
    graph
}

fn ids(names: &[&str]) -> Vec<PackageId> {
    names.iter().map(|name| id(name)).collect()
}

fn set(names: &[&str]) -> BTreeSet<PackageId> {
    names.iter().map(|name| id(name)).collect()
}

/// Assert that every edge's target precedes its source
fn assert_respects_edges(graph: &DependencyGraph, order: &[PackageId]) {
    let position = |package: &PackageId| order.iter().position(|p| p == package).unwrap();
    for (from, to) in graph.edges() {
        assert!(
            position(to) < position(from),
            "{} must load before {} in {:?}",
            to,
            from,
            order
        );
    }
}

// ============================================================================
// Basic Graph Operations
// ============================================================================

#[test]
fn test_new_graph_is_empty() {
    let graph = DependencyGraph::new();
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(!graph.has_cycles());
}

#[test]
fn test_add_dependency_tracks_both_endpoints() {
    let graph = graph_from(&[("A", "B")]);

    assert!(graph.contains("A"));
    assert!(graph.contains("B"));
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn test_duplicate_edge_is_not_re_added() {
    let mut graph = DependencyGraph::new();
    assert!(graph.add_dependency(&id("A"), &id("B")));
    assert!(!graph.add_dependency(&id("A"), &id("B")));

    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.get_dependencies("A"), vec![&id("B")]);
}

#[test]
fn test_dependencies_keep_discovery_order() {
    let graph = graph_from(&[("A", "Z"), ("A", "M"), ("A", "B")]);

    assert_eq!(
        graph.get_dependencies("A"),
        vec![&id("Z"), &id("M"), &id("B")]
    );
    assert!(graph.get_dependencies("Z").is_empty());
    assert!(graph.get_dependencies("UNKNOWN").is_empty());
}

#[test]
fn test_add_package_is_idempotent() {
    let mut graph = DependencyGraph::new();
    graph.add_package(&id("Z"));
    graph.add_package(&id("Z"));

    assert_eq!(graph.node_count(), 1);
    assert_eq!(graph.isolated_packages().collect::<Vec<_>>(), vec![&id("Z")]);
}

#[test]
fn test_edges_grouped_by_source_in_insertion_order() {
    let graph = graph_from(&[("A", "C"), ("B", "D"), ("A", "B")]);

    let edges: Vec<(&str, &str)> = graph
        .edges()
        .into_iter()
        .map(|(from, to)| (from.as_str(), to.as_str()))
        .collect();
    assert_eq!(edges, vec![("A", "C"), ("A", "B"), ("B", "D")]);
}

#[test]
fn test_record_cycle_uses_exact_path_identity() {
    let mut graph = graph_from(&[("A", "B"), ("B", "A")]);

    assert!(graph.record_cycle(ids(&["A", "B", "A"])));
    assert!(!graph.record_cycle(ids(&["A", "B", "A"])));
    // A rotation is a distinct path
    assert!(graph.record_cycle(ids(&["B", "A", "B"])));

    assert_eq!(graph.get_cycles().len(), 2);
}

#[test]
fn test_is_cycle_edge_matches_any_cycle_members() {
    let mut graph = graph_from(&[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")]);
    graph.record_cycle(ids(&["A", "B", "C", "A"]));

    assert!(graph.is_cycle_edge(&id("A"), &id("B")));
    assert!(graph.is_cycle_edge(&id("C"), &id("A")));
    assert!(!graph.is_cycle_edge(&id("C"), &id("D")));
}

// ============================================================================
// Transitive Closure
// ============================================================================

#[test]
fn test_closure_of_diamond() {
    let graph = graph_from(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);

    let closure = graph.get_all_dependencies("A");
    assert_eq!(closure, set(&["B", "C", "D"]));
    assert!(!closure.contains("A"));
}

#[test]
fn test_closure_includes_root_only_through_cycle() {
    let graph = graph_from(&[("A", "B"), ("B", "C"), ("C", "A")]);

    let closure = graph.get_all_dependencies("A");
    assert_eq!(closure, set(&["A", "B", "C"]));
}

#[test]
fn test_closure_of_self_loop() {
    let graph = graph_from(&[("A", "A")]);
    assert_eq!(graph.get_all_dependencies("A"), set(&["A"]));
}

#[test]
fn test_closure_of_unknown_or_leaf_is_empty() {
    let graph = graph_from(&[("A", "B")]);

    assert!(graph.get_all_dependencies("B").is_empty());
    assert!(graph.get_all_dependencies("NOPE").is_empty());
}

#[test]
fn test_queries_are_idempotent() {
    let mut graph = graph_from(&[("A", "B"), ("B", "A"), ("B", "C")]);
    graph.record_cycle(ids(&["A", "B", "A"]));

    let first = (graph.has_cycles(), graph.get_cycles().to_vec(), graph.get_all_dependencies("A"));
    let second = (graph.has_cycles(), graph.get_cycles().to_vec(), graph.get_all_dependencies("A"));
    assert_eq!(first, second);
}

// ============================================================================
// Load Order
// ============================================================================

#[test]
fn test_load_order_diamond_breaks_ties_lexicographically() {
    let graph = graph_from(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);

    let order = graph.get_load_order(&id("A")).unwrap();
    assert_eq!(order, ids(&["D", "B", "C", "A"]));
}

#[test]
fn test_load_order_tie_break_ignores_discovery_order() {
    // C discovered before B, B still loads first
    let graph = graph_from(&[("A", "C"), ("A", "B")]);

    let order = graph.get_load_order(&id("A")).unwrap();
    assert_eq!(order, ids(&["B", "C", "A"]));
}

#[test]
fn test_load_order_is_permutation_respecting_edges() {
    let graph = graph_from(&[
        ("APP", "HTTP"),
        ("APP", "LOG"),
        ("HTTP", "TLS"),
        ("HTTP", "IO"),
        ("TLS", "IO"),
        ("LOG", "IO"),
        ("TLS", "CRYPTO"),
    ]);

    let order = graph.get_load_order(&id("APP")).unwrap();

    let mut sorted = order.clone();
    sorted.sort();
    let mut expected: Vec<PackageId> = graph.packages().cloned().collect();
    expected.sort();
    assert_eq!(sorted, expected);
    assert_respects_edges(&graph, &order);
    assert_eq!(order.last(), Some(&id("APP")));
}

#[test]
fn test_load_order_includes_root_missing_from_graph() {
    let graph = DependencyGraph::new();
    assert_eq!(graph.get_load_order(&id("SOLO")).unwrap(), ids(&["SOLO"]));
}

#[test]
fn test_load_order_includes_isolated_packages() {
    let mut graph = graph_from(&[("A", "B")]);
    graph.add_package(&id("Z"));

    let order = graph.get_load_order(&id("A")).unwrap();
    assert_eq!(order, ids(&["B", "A", "Z"]));
}

#[test]
fn test_load_order_fails_on_recorded_cycle() {
    let mut graph = graph_from(&[("A", "B"), ("B", "A")]);
    graph.record_cycle(ids(&["A", "B", "A"]));

    let err = graph.get_load_order(&id("A")).unwrap_err();
    match &err {
        DependencyGraphError::CyclicDependency { cycles } => {
            assert_eq!(cycles, &vec![ids(&["A", "B", "A"])]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.to_string(), "Circular dependency detected: A → B → A");
}

#[test]
fn test_unrecorded_cycle_is_an_invariant_violation() {
    // Cycle edges present but never recorded by a builder
    let graph = graph_from(&[("A", "B"), ("B", "A"), ("B", "C")]);

    let err = graph.get_load_order(&id("A")).unwrap_err();
    assert!(matches!(
        err,
        DependencyGraphError::InvariantViolation {
            produced: 1,
            expected: 3
        }
    ));
}

#[test]
fn test_format_cycle() {
    assert_eq!(format_cycle(&ids(&["X", "Y", "X"])), "X → Y → X");
    assert_eq!(format_cycle(&[]), "");
}

use super::*;

fn id(name: &str) -> PackageId {
    PackageId::from(name)
}

fn graph_from(edges: &[(&str, &str)]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for (from, to) in edges {
        graph.add_dependency(&id(from), &id(to));
    }
    graph
}

#[test]
fn test_acyclic_graph_snapshot() {
    let graph = graph_from(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);

    let expected = "\
digraph dependencies {
    rankdir=LR;
    node [shape=box, style=rounded, fontname=\"Helvetica\"];
    \"A\" [style=\"rounded,filled\", fillcolor=lightblue, penwidth=2];
    \"A\" -> \"B\";
    \"A\" -> \"C\";
    \"B\" -> \"D\";
    \"C\" -> \"D\";
}
";
    assert_eq!(to_dot(&graph, &id("A")), expected);
}

#[test]
fn test_cycle_edges_are_highlighted() {
    let mut graph = graph_from(&[("A", "B"), ("B", "A"), ("B", "C")]);
    graph.record_cycle(vec![id("A"), id("B"), id("A")]);

    let dot = to_dot(&graph, &id("A"));

    assert!(dot.contains("    \"A\" -> \"B\" [color=red, penwidth=2];\n"));
    assert!(dot.contains("    \"B\" -> \"A\" [color=red, penwidth=2];\n"));
    assert!(dot.contains("    \"B\" -> \"C\";\n"));
}

#[test]
fn test_cycle_highlighting_ignores_adjacency_within_cycle() {
    // A and C share a cycle but A -> C is not one of its steps
    let mut graph = graph_from(&[("A", "B"), ("B", "C"), ("C", "A"), ("A", "C")]);
    graph.record_cycle(vec![id("A"), id("B"), id("C"), id("A")]);

    let dot = to_dot(&graph, &id("A"));
    assert!(dot.contains("    \"A\" -> \"C\" [color=red, penwidth=2];\n"));
}

#[test]
fn test_isolated_package_is_declared() {
    let mut graph = graph_from(&[("A", "B")]);
    graph.add_package(&id("Z"));

    let dot = to_dot(&graph, &id("A"));

    let lines: Vec<&str> = dot.lines().collect();
    assert_eq!(lines[lines.len() - 2], "    \"Z\";");
}

#[test]
fn test_root_declared_once_even_when_isolated() {
    let mut graph = DependencyGraph::new();
    graph.add_package(&id("ROOT"));

    let dot = to_dot(&graph, &id("ROOT"));

    assert_eq!(dot.matches("\"ROOT\"").count(), 1);
    assert!(dot.contains("fillcolor=lightblue"));
}

#[test]
fn test_root_declared_for_empty_graph() {
    let dot = to_dot(&DependencyGraph::new(), &id("SOLO"));
    assert!(dot.contains("    \"SOLO\" [style="));
    assert!(dot.ends_with("}\n"));
}

#[test]
fn test_identifiers_are_escaped() {
    let graph = graph_from(&[("say \"hi\"", "back\\slash")]);

    let dot = to_dot(&graph, &id("say \"hi\""));

    assert!(dot.contains(r#"    "say \"hi\"" -> "back\\slash";"#));
}

#[test]
fn test_serialization_is_deterministic() {
    let build = || {
        let mut graph = graph_from(&[("A", "C"), ("A", "B"), ("C", "A")]);
        graph.record_cycle(vec![id("A"), id("C"), id("A")]);
        graph.add_package(&id("Q"));
        graph
    };

    assert_eq!(to_dot(&build(), &id("A")), to_dot(&build(), &id("A")));
}

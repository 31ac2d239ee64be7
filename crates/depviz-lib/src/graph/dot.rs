//! Graphviz DOT serialization of a resolved dependency graph

use super::{DependencyGraph, PackageId};

const GRAPH_NAME: &str = "dependencies";
const ROOT_STYLE: &str = "[style=\"rounded,filled\", fillcolor=lightblue, penwidth=2]";
const CYCLE_EDGE_STYLE: &str = "[color=red, penwidth=2]";

/// Quote an identifier for DOT, escaping backslashes and double quotes
fn quote(package: &PackageId) -> String {
    let escaped = package.as_str().replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// Convert the dependency graph to DOT.
///
/// The root is always declared with its own styling. Edges whose endpoints
/// share a recorded cycle are drawn red; packages with no edges at all get a
/// bare declaration. Output depends only on the graph's insertion order, so
/// identical resolutions serialize byte-for-byte identically.
pub fn to_dot(graph: &DependencyGraph, root: &PackageId) -> String {
    let mut lines = Vec::new();
    lines.push(format!("digraph {} {{", GRAPH_NAME));
    lines.push("    rankdir=LR;".to_string());
    lines.push("    node [shape=box, style=rounded, fontname=\"Helvetica\"];".to_string());
    lines.push(format!("    {} {};", quote(root), ROOT_STYLE));

    for (from, to) in graph.edges() {
        if graph.is_cycle_edge(from, to) {
            lines.push(format!(
                "    {} -> {} {};",
                quote(from),
                quote(to),
                CYCLE_EDGE_STYLE
            ));
        } else {
            lines.push(format!("    {} -> {};", quote(from), quote(to)));
        }
    }

    for package in graph.isolated_packages().filter(|package| *package != root) {
        lines.push(format!("    {};", quote(package)));
    }

    lines.push("}".to_string());
    let mut dot = lines.join("\n");
    dot.push('\n');
    dot
}

#[cfg(test)]
mod tests {
    include!("dot.test.rs");
}

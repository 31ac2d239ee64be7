//! Resolved dependency graph with transitive closure and load-order queries
//!
//! Edges point from a dependent to its dependency (`a → b` means `a` depends
//! on `b`). The graph is filled once by the [`GraphBuilder`](super::GraphBuilder)
//! and is read-only afterwards.

use super::PackageId;
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;
use tracing::{error, trace};

/// Errors raised by graph queries
#[derive(Debug, Error)]
pub enum DependencyGraphError {
    #[error("Circular dependency detected: {}", format_cycles(.cycles))]
    CyclicDependency { cycles: Vec<Vec<PackageId>> },

    #[error(
        "Load order invariant violated: ordered {produced} of {expected} packages (cycle detection missed a cycle)"
    )]
    InvariantViolation { produced: usize, expected: usize },
}

/// Render a cycle path as `A → B → A`
pub fn format_cycle(path: &[PackageId]) -> String {
    path.iter()
        .map(PackageId::as_str)
        .collect::<Vec<_>>()
        .join(" → ")
}

fn format_cycles(cycles: &[Vec<PackageId>]) -> String {
    cycles
        .iter()
        .map(|cycle| format_cycle(cycle))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Dependency graph for a single resolution run
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Directed graph: nodes = packages, edges = "depends on"
    graph: DiGraph<PackageId, ()>,
    /// Map from package to node index for fast lookup
    node_map: HashMap<PackageId, NodeIndex>,
    /// Cycle paths in discovery order
    cycles: Vec<Vec<PackageId>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_node(&mut self, package: &PackageId) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(package) {
            return idx;
        }

        let idx = self.graph.add_node(package.clone());
        self.node_map.insert(package.clone(), idx);
        idx
    }

    /// Add a package without edges (idempotent)
    pub fn add_package(&mut self, package: &PackageId) {
        self.ensure_node(package);
    }

    /// Record that `from` depends on `to`.
    ///
    /// Returns `false` when the edge was already present; an edge list never
    /// holds the same dependency twice.
    pub fn add_dependency(&mut self, from: &PackageId, to: &PackageId) -> bool {
        let from_idx = self.ensure_node(from);
        let to_idx = self.ensure_node(to);

        if self.graph.contains_edge(from_idx, to_idx) {
            return false;
        }

        trace!("Edge added: {} -> {}", from, to);
        self.graph.add_edge(from_idx, to_idx, ());
        true
    }

    /// Record a cycle path unless an identical path is already present
    pub fn record_cycle(&mut self, path: Vec<PackageId>) -> bool {
        if self.cycles.contains(&path) {
            return false;
        }
        self.cycles.push(path);
        true
    }

    /// Outgoing edges of a node in insertion order
    fn ordered_edges(&self, idx: NodeIndex) -> Vec<(EdgeIndex, NodeIndex)> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|edge| (edge.id(), edge.target()))
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges
    }

    /// Direct dependencies of a package, in discovery order
    pub fn get_dependencies(&self, package: &str) -> Vec<&PackageId> {
        let Some(&idx) = self.node_map.get(package) else {
            return Vec::new();
        };

        self.ordered_edges(idx)
            .into_iter()
            .map(|(_, target)| &self.graph[target])
            .collect()
    }

    /// All packages transitively reachable from `package`'s dependencies.
    ///
    /// The package itself is only part of its own closure when a cycle leads
    /// back to it.
    pub fn get_all_dependencies(&self, package: &str) -> BTreeSet<PackageId> {
        let mut closure = BTreeSet::new();
        let Some(&start) = self.node_map.get(package) else {
            return closure;
        };

        let mut seen = HashSet::new();
        let mut stack: Vec<NodeIndex> = self.graph.neighbors(start).collect();

        while let Some(idx) = stack.pop() {
            if !seen.insert(idx) {
                continue;
            }
            closure.insert(self.graph[idx].clone());
            stack.extend(self.graph.neighbors(idx));
        }

        closure
    }

    /// Whether any cycle was recorded during construction
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Recorded cycle paths in discovery order
    pub fn get_cycles(&self) -> &[Vec<PackageId>] {
        &self.cycles
    }

    /// Whether both endpoints of `from → to` appear in some recorded cycle
    pub fn is_cycle_edge(&self, from: &PackageId, to: &PackageId) -> bool {
        self.cycles
            .iter()
            .any(|cycle| cycle.contains(from) && cycle.contains(to))
    }

    /// Deterministic load order: dependencies before dependents.
    ///
    /// Covers every graph node plus `root`. Ties are broken by taking the
    /// lexicographically smallest ready package.
    pub fn get_load_order(&self, root: &PackageId) -> Result<Vec<PackageId>, DependencyGraphError> {
        if self.has_cycles() {
            return Err(DependencyGraphError::CyclicDependency {
                cycles: self.cycles.clone(),
            });
        }

        // Remaining unloaded dependencies per package
        let mut in_degree: HashMap<&PackageId, usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                let pending = self.graph.edges_directed(idx, Direction::Outgoing).count();
                (&self.graph[idx], pending)
            })
            .collect();
        in_degree.entry(root).or_insert(0);

        let mut ready: BTreeSet<&PackageId> = in_degree
            .iter()
            .filter(|(_, pending)| **pending == 0)
            .map(|(package, _)| *package)
            .collect();

        let mut order = Vec::with_capacity(in_degree.len());
        while let Some(package) = ready.pop_first() {
            order.push(package.clone());

            let Some(&idx) = self.node_map.get(package) else {
                continue;
            };

            for dependent in self.graph.neighbors_directed(idx, Direction::Incoming) {
                let dependent = &self.graph[dependent];
                if let Some(pending) = in_degree.get_mut(dependent) {
                    *pending -= 1;
                    if *pending == 0 {
                        ready.insert(dependent);
                    }
                }
            }
        }

        if order.len() != in_degree.len() {
            error!(
                produced = order.len(),
                expected = in_degree.len(),
                "Load order does not cover every package"
            );
            return Err(DependencyGraphError::InvariantViolation {
                produced: order.len(),
                expected: in_degree.len(),
            });
        }

        Ok(order)
    }

    /// Packages in insertion order
    pub fn packages(&self) -> impl Iterator<Item = &PackageId> {
        self.graph.node_weights()
    }

    /// Every edge: sources in insertion order, each source's edges in insertion order
    pub fn edges(&self) -> Vec<(&PackageId, &PackageId)> {
        self.graph
            .node_indices()
            .flat_map(|idx| {
                self.ordered_edges(idx)
                    .into_iter()
                    .map(move |(_, target)| (&self.graph[idx], &self.graph[target]))
            })
            .collect()
    }

    /// Packages that are neither the source nor the target of any edge
    pub fn isolated_packages(&self) -> impl Iterator<Item = &PackageId> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors_undirected(idx).next().is_none())
            .map(|idx| &self.graph[idx])
    }

    /// Get the number of packages in the graph
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Get the number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Check if a package exists in the graph
    pub fn contains(&self, package: &str) -> bool {
        self.node_map.contains_key(package)
    }
}

#[cfg(test)]
mod tests {
    include!("dependency_graph.test.rs");
}

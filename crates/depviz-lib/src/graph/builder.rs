//! Depth-first dependency discovery with cycle detection
//!
//! The walk keeps three pieces of traversal state: `visited` (explored or
//! being explored), `on_stack` (on the active path) and `path` (the active
//! path in order, used to reconstruct cycles). Native recursion is replaced
//! by an explicit stack of frames so deep graphs cannot exhaust the call
//! stack.

use super::{DependencyGraph, DependencyGraphError, PackageId, format_cycle};
use crate::providers::DependencyProvider;
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, trace, warn};

/// Outcome of a resolution run
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Package the walk started from
    pub root: PackageId,
    /// Fully expanded graph
    pub graph: DependencyGraph,
    /// Packages whose lookup failed and were treated as leaves
    pub failed_lookups: Vec<PackageId>,
}

impl Resolution {
    /// Transitive dependencies of the root
    pub fn closure(&self) -> BTreeSet<PackageId> {
        self.graph.get_all_dependencies(self.root.as_str())
    }

    /// Load order rooted at the resolution root
    pub fn load_order(&self) -> Result<Vec<PackageId>, DependencyGraphError> {
        self.graph.get_load_order(&self.root)
    }
}

/// One package being expanded: its dependency list and how far we got
struct Frame {
    package: PackageId,
    dependencies: Vec<PackageId>,
    cursor: usize,
}

impl Frame {
    fn next_dependency(&mut self) -> Option<PackageId> {
        let dependency = self.dependencies.get(self.cursor).cloned();
        self.cursor += 1;
        dependency
    }
}

/// Expands a root package into a [`DependencyGraph`] using a provider
pub struct GraphBuilder<'a, P: DependencyProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: DependencyProvider + ?Sized> GraphBuilder<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Query the provider once for `package`; failures make it a leaf
    fn expand(&self, package: &PackageId, failed: &mut Vec<PackageId>) -> Frame {
        let dependencies = match self.provider.get_dependencies(package) {
            Ok(dependencies) => {
                trace!(
                    package = %package,
                    count = dependencies.len(),
                    "Dependencies fetched"
                );
                dependencies
            }
            Err(err) => {
                warn!(
                    package = %package,
                    provider = self.provider.name(),
                    error = %err,
                    "Dependency lookup failed, treating package as a leaf"
                );
                failed.push(package.clone());
                Vec::new()
            }
        };

        Frame {
            package: package.clone(),
            dependencies,
            cursor: 0,
        }
    }

    /// Walk the dependency graph reachable from `root`
    pub fn build(&self, root: PackageId) -> Resolution {
        debug!(root = %root, provider = self.provider.name(), "Resolving dependency graph");

        let mut graph = DependencyGraph::new();
        let mut failed_lookups = Vec::new();

        let mut visited: HashSet<PackageId> = HashSet::new();
        let mut on_stack: HashSet<PackageId> = HashSet::new();
        let mut path: Vec<PackageId> = vec![root.clone()];
        visited.insert(root.clone());
        on_stack.insert(root.clone());

        let mut stack = vec![self.expand(&root, &mut failed_lookups)];

        while let Some(frame) = stack.last_mut() {
            let Some(dependency) = frame.next_dependency() else {
                if let Some(done) = stack.pop() {
                    on_stack.remove(&done.package);
                    path.pop();
                }
                continue;
            };
            let package = frame.package.clone();

            // Every traversed edge is recorded, including cycle-closing ones
            graph.add_dependency(&package, &dependency);

            if on_stack.contains(&dependency) {
                if let Some(start) = path.iter().position(|p| *p == dependency) {
                    let mut cycle = path[start..].to_vec();
                    cycle.push(dependency);
                    let rendered = format_cycle(&cycle);
                    if graph.record_cycle(cycle) {
                        debug!(cycle = %rendered, "Cycle detected");
                    }
                }
            } else if visited.contains(&dependency) {
                trace!(package = %dependency, "Already explored");
            } else {
                visited.insert(dependency.clone());
                on_stack.insert(dependency.clone());
                path.push(dependency.clone());
                stack.push(self.expand(&dependency, &mut failed_lookups));
            }
        }

        debug!(
            root = %root,
            packages = graph.node_count(),
            edges = graph.edge_count(),
            cycles = graph.get_cycles().len(),
            failed = failed_lookups.len(),
            "Dependency graph resolved"
        );

        Resolution {
            root,
            graph,
            failed_lookups,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("builder.test.rs");
}

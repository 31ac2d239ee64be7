//! # Graph Module
//!
//! Dependency graph construction and analysis.
//!
//! ## Modules
//!
//! - [`package_id`] - Normalized package identifiers
//! - [`dependency_graph`] - Resolved graph with closure and load-order queries
//! - [`builder`] - Depth-first discovery with cycle detection
//! - [`dot`] - Graphviz DOT serialization

pub mod builder;
pub mod dependency_graph;
pub mod dot;
pub mod package_id;

pub use builder::{GraphBuilder, Resolution};
pub use dependency_graph::{DependencyGraph, DependencyGraphError, format_cycle};
pub use dot::to_dot;
pub use package_id::PackageId;

//! # depviz Library
//!
//! Dependency graph resolution and visualization.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types and structured errors
//! - [`logger`] - Structured logging with progress tracking
//! - [`graph`] - Graph construction, cycle detection, closure, load order, DOT
//! - [`providers`] - Dependency data sources (fixture files, HTTP registry)
//! - [`render`] - Diagram rendering through Graphviz
//! - [`application`] - CLI interface, configuration and commands
//!
//! ## Quick Start
//!
//! ```no_run
//! use depviz_lib::graph::{GraphBuilder, PackageId};
//! use depviz_lib::providers::FixtureProvider;
//!
//! let provider = FixtureProvider::from_toml_str("A = [\"B\"]\nB = []").unwrap();
//! let resolution = GraphBuilder::new(&provider).build(PackageId::from("A"));
//! assert_eq!(resolution.load_order().unwrap().len(), 2);
//! ```

pub mod application;
pub mod graph;
pub mod logger;
pub mod primitives;
pub mod providers;
pub mod render;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use graph::{DependencyGraph, DependencyGraphError, GraphBuilder, PackageId, Resolution};
pub use logger::Logger;
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};
pub use providers::{DependencyProvider, LookupError};

// Private imports for the main function
use anyhow::Result;
use application::CliConfig;

pub fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    console::set_colors_enabled(config.app_config.color.enabled());
    Logger::init(config.app_config.to_logger_config())?;

    // Execute the command
    execute_command(config)
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::config::AppConfig;

/// depviz CLI - dependency graph explorer
#[derive(Debug, Clone, Parser)]
#[command(name = "depviz")]
#[command(about = "Resolve a package's dependency graph, order it, and draw it")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// depviz commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Parse command line arguments without further processing
    pub fn parse_args() -> Self {
        Cli::parse().into()
    }
}

impl From<Cli> for CliConfig {
    fn from(cli: Cli) -> Self {
        Self {
            app_config: cli.config,
            command: cli.command,
        }
    }
}

/// Available depviz commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Show the resolution settings
    Config,

    /// Resolve the dependency graph and render it as a diagram
    Graph {
        /// Diagram path (overrides output_file from the settings)
        #[arg(short, long, help = "Write the diagram here instead of output_file")]
        output: Option<PathBuf>,
    },

    /// Print the load order (dependencies first)
    Order,

    /// Print every transitive dependency of the root package
    Deps,

    /// Print the graph in Graphviz DOT format
    Dot,
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}

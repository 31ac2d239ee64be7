//! Application layer modules
//!
//! Organizes CLI interface, configuration management, resolution settings
//! and command execution.

pub mod cli;
pub mod commands;
pub mod config;
pub mod env;
pub mod loader;
pub mod settings;

// Re-export main types for convenience
pub use cli::{Cli, CliConfig, Commands};
pub use commands::{execute_command, execute_command_with_output};
pub use config::AppConfig;
pub use env::EnvironmentConfig;
pub use loader::*;
pub use settings::{PackageSource, ResolutionSettings, SettingsError};

//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::primitives::*;
use crate::providers::{BackoffConfig, RegistryOptions};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default configuration values
pub mod defaults {
    pub const CONFIG_FILE: &str = "config.xml";
    pub const LOG_LEVEL: &str = "0"; // Error-only logging by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR: &str = "auto";
    pub const NET_TIMEOUT: &str = "30";
    pub const NET_RETRIES: &str = "3";
    pub const DOT_COMMAND: &str = "dot";
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn config_file() -> PathBuf {
        PathBuf::from(defaults::CONFIG_FILE)
    }

    pub fn log_level() -> u8 {
        0
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }

    pub fn net_timeout() -> u64 {
        30
    }

    pub fn net_retries() -> u32 {
        3
    }

    pub fn dot_command() -> String {
        defaults::DOT_COMMAND.to_string()
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Resolution settings file (XML)
    #[arg(short = 'f', long = "config", env = "DEPVIZ_CONFIG", default_value = defaults::CONFIG_FILE)]
    #[serde(default = "default_fns::config_file")]
    pub config_file: PathBuf,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "DEPVIZ_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, yaml)
    #[arg(long, env = "DEPVIZ_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "DEPVIZ_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "DEPVIZ_COLOR", default_value = defaults::COLOR)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,

    /// Registry request timeout in seconds
    #[arg(long, env = "DEPVIZ_NET_TIMEOUT", default_value = defaults::NET_TIMEOUT)]
    #[serde(default = "default_fns::net_timeout")]
    pub net_timeout: u64,

    /// Retries for transient registry failures
    #[arg(long, env = "DEPVIZ_NET_RETRIES", default_value = defaults::NET_RETRIES)]
    #[serde(default = "default_fns::net_retries")]
    pub net_retries: u32,

    /// Graphviz executable used to render diagrams
    #[arg(long, env = "DEPVIZ_DOT", default_value = defaults::DOT_COMMAND)]
    #[serde(default = "default_fns::dot_command")]
    pub dot_command: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: default_fns::config_file(),
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
            net_timeout: default_fns::net_timeout(),
            net_retries: default_fns::net_retries(),
            dot_command: default_fns::dot_command(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig from AppConfig
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: self.color.enabled(),
        }
    }

    /// Transport settings for the registry provider
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            timeout: Duration::from_secs(self.net_timeout),
            max_retries: self.net_retries,
            backoff: BackoffConfig::default(),
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        if other.config_file != default_fns::config_file() {
            self.config_file = other.config_file;
        }
        if other.dot_command != default_fns::dot_command() {
            self.dot_command = other.dot_command;
        }

        // For primitive fields, take other if it's not the default
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }
        if other.net_timeout != default_fns::net_timeout() {
            self.net_timeout = other.net_timeout;
        }
        if other.net_retries != default_fns::net_retries() {
            self.net_retries = other.net_retries;
        }

        // For enums, detect if it's non-default
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.net_timeout == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "net_timeout must be at least 1 second".to_string(),
            });
        }

        if self.log_level > 4 {
            return Err(ConfigError::ValidationFailed {
                reason: format!("log_level must be between 0 and 4, got {}", self.log_level),
            });
        }

        if self.dot_command.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "dot_command must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}

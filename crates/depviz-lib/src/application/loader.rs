//! Configuration loading
//!
//! Coordinates loading configuration from .env files, the process
//! environment and the command line.

use crate::primitives::ConfigError;
use tracing::debug;

use super::{cli::CliConfig, config::AppConfig, env::EnvironmentConfig};

/// Environment files read before argument parsing, highest precedence first
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Load `.env.local` and `.env` into the process environment.
///
/// Missing files are skipped; variables already set are never overwritten.
pub fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        match dotenvy::from_filename(env_file) {
            Ok(path) => debug!(path = %path.display(), "Environment file loaded"),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

impl AppConfig {
    /// Finish a config parsed from the command line: defaults -> CLI ->
    /// colour variables -> validation
    pub fn resolve(cli: AppConfig, env_config: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let mut config = Self::default().merge_with(cli);
        config.color = env_config.apply_color_config(config.color);
        config.validate()?;
        Ok(config)
    }
}

impl CliConfig {
    /// Load config: defaults -> .env -> env vars -> CLI
    pub fn load() -> Result<Self, ConfigError> {
        load_env_files()?;

        let mut cli_config = Self::parse_args();
        let env_config = EnvironmentConfig::load()?;
        cli_config.app_config = AppConfig::resolve(cli_config.app_config, &env_config)?;

        Ok(cli_config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}

//! Resolution settings file
//!
//! A small XML document names the package to resolve, where its dependency
//! data comes from and where the rendered diagram goes:
//!
//! ```xml
//! <config>
//!   <package_name>serde</package_name>
//!   <repository_url>https://crates.io</repository_url>
//!   <test_mode>false</test_mode>
//!   <test_repository_path></test_repository_path>
//!   <output_file>graph.svg</output_file>
//! </config>
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use crate::render::OutputFormat;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or validating the settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid XML in {path}: {source}")]
    Xml {
        path: PathBuf,
        source: quick_xml::DeError,
    },

    #[error("Missing required parameter: {name}")]
    MissingParameter { name: &'static str },

    #[error("Invalid value for {name} ('{value}'): {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Where dependency data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    /// Live crates.io-compatible registry
    Registry { url: String },
    /// Local TOML fixture graph
    Fixture { path: PathBuf },
}

/// Raw document shape; every element is optional until validated
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    #[serde(default)]
    package_name: Option<String>,
    #[serde(default)]
    repository_url: Option<String>,
    #[serde(default)]
    test_mode: Option<String>,
    #[serde(default)]
    test_repository_path: Option<String>,
    #[serde(default)]
    output_file: Option<String>,
}

/// Trimmed text of a required element; absent elements are an error
fn required(value: Option<String>, name: &'static str) -> Result<String, SettingsError> {
    value
        .map(|v| v.trim().to_string())
        .ok_or(SettingsError::MissingParameter { name })
}

/// Trimmed text of an optional element, with `default` for absent or empty
fn optional(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Validated resolution settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionSettings {
    pub package_name: String,
    /// Always present in the file; may be empty in test mode
    pub repository_url: String,
    pub test_mode: bool,
    pub test_repository_path: Option<PathBuf>,
    pub output_file: PathBuf,
    pub output_format: OutputFormat,
}

impl ResolutionSettings {
    /// Load and validate a settings file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.is_file() {
            return Err(SettingsError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let raw: RawSettings =
            quick_xml::de::from_str(&content).map_err(|source| SettingsError::Xml {
                path: path.to_path_buf(),
                source,
            })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let settings = Self::validate(raw, base_dir)?;

        debug!(
            path = %path.display(),
            package = %settings.package_name,
            test_mode = settings.test_mode,
            "Resolution settings loaded"
        );
        Ok(settings)
    }

    /// Extract every element first, then check values in document order
    fn validate(raw: RawSettings, base_dir: &Path) -> Result<Self, SettingsError> {
        let package_name = required(raw.package_name, "package_name")?;
        let repository_url = required(raw.repository_url, "repository_url")?;
        let test_mode = optional(raw.test_mode, "false");
        let test_repository_path = optional(raw.test_repository_path, "");
        let output = required(raw.output_file, "output_file")?;

        if package_name.is_empty() {
            return Err(SettingsError::InvalidParameter {
                name: "package_name",
                value: package_name,
                reason: "must not be empty".to_string(),
            });
        }
        let mut significant = package_name.chars().filter(|c| *c != '_' && *c != '-').peekable();
        if significant.peek().is_none() || !significant.all(char::is_alphanumeric) {
            return Err(SettingsError::InvalidParameter {
                name: "package_name",
                value: package_name,
                reason: "needs letters or digits, optionally joined by '_' and '-'".to_string(),
            });
        }

        let test_mode_enabled = test_mode.eq_ignore_ascii_case("true");
        if !test_mode_enabled {
            if repository_url.is_empty() {
                return Err(SettingsError::InvalidParameter {
                    name: "repository_url",
                    value: repository_url,
                    reason: "must not be empty outside test mode".to_string(),
                });
            }
            if !(repository_url.starts_with("http://") || repository_url.starts_with("https://")) {
                return Err(SettingsError::InvalidParameter {
                    name: "repository_url",
                    value: repository_url,
                    reason: "must start with http:// or https://".to_string(),
                });
            }
        }

        if !test_mode_enabled && !test_mode.eq_ignore_ascii_case("false") {
            return Err(SettingsError::InvalidParameter {
                name: "test_mode",
                value: test_mode,
                reason: "expected 'true' or 'false'".to_string(),
            });
        }

        let test_repository_path = if test_mode_enabled {
            if test_repository_path.is_empty() {
                return Err(SettingsError::MissingParameter {
                    name: "test_repository_path",
                });
            }
            let path = base_dir.join(&test_repository_path);
            if !path.exists() {
                return Err(SettingsError::InvalidParameter {
                    name: "test_repository_path",
                    value: path.display().to_string(),
                    reason: "path does not exist".to_string(),
                });
            }
            Some(path)
        } else {
            (!test_repository_path.is_empty()).then(|| base_dir.join(&test_repository_path))
        };

        if output.is_empty() {
            return Err(SettingsError::InvalidParameter {
                name: "output_file",
                value: output,
                reason: "must not be empty".to_string(),
            });
        }
        let output_file = base_dir.join(&output);
        let Some(output_format) = OutputFormat::from_path(&output_file) else {
            return Err(SettingsError::InvalidParameter {
                name: "output_file",
                value: output,
                reason: "extension must be one of .svg, .png, .jpg, .jpeg, .pdf".to_string(),
            });
        };

        Ok(Self {
            package_name,
            repository_url,
            test_mode: test_mode_enabled,
            test_repository_path,
            output_file,
            output_format,
        })
    }

    /// Dependency data source selected by `test_mode`
    pub fn source(&self) -> PackageSource {
        match &self.test_repository_path {
            Some(path) if self.test_mode => PackageSource::Fixture { path: path.clone() },
            _ => PackageSource::Registry {
                url: self.repository_url.clone(),
            },
        }
    }

    /// Key/value listing in document order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("package_name", self.package_name.clone()),
            ("repository_url", self.repository_url.clone()),
            ("test_mode", self.test_mode.to_string()),
            (
                "test_repository_path",
                self.test_repository_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            ("output_file", self.output_file.display().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    include!("settings.test.rs");
}

//! Static fixture graphs for offline runs and tests
//!
//! A fixture is a TOML table mapping each package to the list of packages it
//! depends on:
//!
//! ```toml
//! A = ["B", "C"]
//! B = ["D"]
//! C = ["D"]
//! D = []
//! ```
//!
//! Names are trimmed and uppercased, so `a` and `A` are the same package.

use super::{DependencyProvider, LookupError};
use crate::graph::PackageId;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a fixture file
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse fixture TOML: {source}")]
    TomlParseError {
        #[from]
        source: toml::de::Error,
    },

    #[error("Empty package name in fixture (dependency list of '{owner}')")]
    EmptyName { owner: String },

    #[error("Package '{package}' is defined more than once (names are case-insensitive)")]
    DuplicatePackage { package: PackageId },
}

/// Provider backed by an in-memory fixture graph
#[derive(Debug, Clone, Default)]
pub struct FixtureProvider {
    packages: HashMap<PackageId, Vec<PackageId>>,
}

fn normalize_name(raw: &str) -> PackageId {
    PackageId::new(raw.trim().to_uppercase())
}

impl FixtureProvider {
    /// Load a fixture file from disk
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        debug!("Loading fixture graph: {}", path.display());

        let content =
            std::fs::read_to_string(path).map_err(|source| FixtureError::FileReadError {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_toml_str(&content)
    }

    /// Parse fixture TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, FixtureError> {
        let raw: BTreeMap<String, Vec<String>> = toml::from_str(content)?;

        let mut packages = HashMap::with_capacity(raw.len());
        for (name, dependencies) in raw {
            let package = normalize_name(&name);
            if package.as_str().is_empty() {
                return Err(FixtureError::EmptyName { owner: name });
            }

            let mut normalized = Vec::with_capacity(dependencies.len());
            for dependency in &dependencies {
                let dependency = normalize_name(dependency);
                if dependency.as_str().is_empty() {
                    return Err(FixtureError::EmptyName {
                        owner: package.to_string(),
                    });
                }
                normalized.push(dependency);
            }

            if packages.insert(package.clone(), normalized).is_some() {
                return Err(FixtureError::DuplicatePackage { package });
            }
        }

        debug!(packages = packages.len(), "Fixture graph loaded");
        Ok(Self { packages })
    }
}

impl DependencyProvider for FixtureProvider {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn normalize(&self, raw: &str) -> PackageId {
        normalize_name(raw)
    }

    fn get_dependencies(&self, package: &PackageId) -> Result<Vec<PackageId>, LookupError> {
        self.packages
            .get(package)
            .cloned()
            .ok_or_else(|| LookupError::NotFound {
                package: package.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    include!("fixture.test.rs");
}

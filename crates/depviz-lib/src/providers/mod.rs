//! # Providers Module
//!
//! Sources of direct dependency data.
//!
//! The graph builder only sees the [`DependencyProvider`] trait; each adapter
//! owns its own normalization rule and transport.
//!
//! ## Modules
//!
//! - [`fixture`] - Static TOML fixture graphs (uppercase identifiers)
//! - [`registry`] - crates.io-compatible HTTP registry (lowercase identifiers)

pub mod fixture;
pub mod registry;

pub use fixture::{FixtureError, FixtureProvider};
pub use registry::{BackoffConfig, RegistryError, RegistryOptions, RegistryProvider};

use crate::graph::PackageId;
use thiserror::Error;

/// Failure to obtain the direct dependencies of one package
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Package not found: {package}")]
    NotFound { package: PackageId },

    #[error("HTTP request for {package} failed: {source}")]
    RequestFailed {
        package: PackageId,
        #[source]
        source: reqwest::Error,
    },

    #[error("Registry returned HTTP {status} for {package}")]
    UnexpectedStatus { package: PackageId, status: u16 },

    #[error("Registry still unavailable for {package} after {attempts} attempts")]
    RetriesExhausted { package: PackageId, attempts: u32 },

    #[error("Malformed dependency data for {package}: {reason}")]
    MalformedResponse { package: PackageId, reason: String },
}

/// Capability returning a package's direct dependencies
pub trait DependencyProvider {
    /// Short label used in logs
    fn name(&self) -> &'static str;

    /// Apply this source's case rule to a user-supplied package name
    fn normalize(&self, raw: &str) -> PackageId;

    /// Direct dependencies of `package`, in the order the source lists them
    fn get_dependencies(&self, package: &PackageId) -> Result<Vec<PackageId>, LookupError>;
}

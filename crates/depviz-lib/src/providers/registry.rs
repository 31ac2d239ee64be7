//! crates.io-compatible registry provider
//!
//! Resolves a package's direct dependencies in two requests:
//!
//! 1. `GET {base}/api/v1/crates/{name}` to pick a version
//!    (`max_stable_version`, falling back to `max_version`)
//! 2. `GET {base}/api/v1/crates/{name}/{version}/dependencies`, keeping only
//!    normal (non-dev, non-build) dependencies
//!
//! Transient failures (429, 5xx, connect and timeout errors) are retried
//! with exponential backoff. Identifiers are lowercased.

use super::{DependencyProvider, LookupError};
use crate::graph::PackageId;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Characters left unescaped in a path segment (crate names use `-` and `_`)
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

const USER_AGENT: &str = concat!("depviz/", env!("CARGO_PKG_VERSION"));

/// Errors raised while constructing a registry provider
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Invalid registry URL: {url} (expected http:// or https://)")]
    InvalidBaseUrl { url: String },

    #[error("Failed to build HTTP client: {source}")]
    ClientBuild {
        #[from]
        source: reqwest::Error,
    },
}

/// Backoff strategy for retried requests
#[derive(Debug, Clone)]
pub struct BackoffConfig {
    /// Initial backoff duration
    pub initial: Duration,
    /// Maximum backoff duration
    pub max: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(500),
            max: Duration::from_secs(8),
            multiplier: 2.0,
        }
    }
}

impl BackoffConfig {
    /// Delay before retry number `retry` (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = self.multiplier.powi(retry.saturating_sub(1) as i32);
        Duration::from_secs_f64(self.initial.as_secs_f64() * factor).min(self.max)
    }
}

/// Transport settings for [`RegistryProvider`]
#[derive(Debug, Clone)]
pub struct RegistryOptions {
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after the first attempt for transient failures
    pub max_retries: u32,
    pub backoff: BackoffConfig,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff: BackoffConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CrateResponse {
    #[serde(rename = "crate")]
    krate: CrateInfo,
}

#[derive(Debug, Deserialize)]
struct CrateInfo {
    #[serde(default)]
    max_stable_version: Option<String>,
    #[serde(default)]
    max_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DependenciesResponse {
    dependencies: Vec<RegistryDependency>,
}

#[derive(Debug, Deserialize)]
struct RegistryDependency {
    crate_id: String,
    #[serde(default)]
    kind: Option<String>,
}

/// Live registry provider (blocking HTTP)
pub struct RegistryProvider {
    client: Client,
    base_url: String,
    options: RegistryOptions,
}

impl RegistryProvider {
    /// Create a provider for the registry at `base_url`
    pub fn new(base_url: &str, options: RegistryOptions) -> Result<Self, RegistryError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(RegistryError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }

        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        debug!(
            base_url,
            timeout = ?options.timeout,
            max_retries = options.max_retries,
            "Registry provider initialized"
        );

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            options,
        })
    }

    fn crate_url(&self, package: &PackageId) -> String {
        format!(
            "{}/api/v1/crates/{}",
            self.base_url,
            utf8_percent_encode(package.as_str(), PATH_SEGMENT)
        )
    }

    /// GET `url`, retrying transient failures, and decode the JSON body
    fn get_json<T: DeserializeOwned>(&self, package: &PackageId, url: &str) -> Result<T, LookupError> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            trace!(url, attempt, "Registry request");

            let retry_reason = match self.client.get(url).send() {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response.bytes().map_err(|source| LookupError::RequestFailed {
                            package: package.clone(),
                            source,
                        })?;
                        return serde_json::from_slice(&body).map_err(|e| {
                            LookupError::MalformedResponse {
                                package: package.clone(),
                                reason: e.to_string(),
                            }
                        });
                    }
                    if status == StatusCode::NOT_FOUND {
                        return Err(LookupError::NotFound {
                            package: package.clone(),
                        });
                    }
                    if status != StatusCode::TOO_MANY_REQUESTS && !status.is_server_error() {
                        return Err(LookupError::UnexpectedStatus {
                            package: package.clone(),
                            status: status.as_u16(),
                        });
                    }
                    format!("HTTP {}", status.as_u16())
                }
                Err(err) if err.is_timeout() || err.is_connect() => err.to_string(),
                Err(source) => {
                    return Err(LookupError::RequestFailed {
                        package: package.clone(),
                        source,
                    });
                }
            };

            if attempt > self.options.max_retries {
                return Err(LookupError::RetriesExhausted {
                    package: package.clone(),
                    attempts: attempt,
                });
            }

            let delay = self.options.backoff.delay_for(attempt);
            warn!(
                package = %package,
                reason = %retry_reason,
                "Registry request failed, retrying in {:?} (retry {}/{})",
                delay,
                attempt,
                self.options.max_retries
            );
            std::thread::sleep(delay);
        }
    }

    /// Pick the version whose dependencies describe the package
    fn resolve_version(&self, package: &PackageId) -> Result<String, LookupError> {
        let response: CrateResponse = self.get_json(package, &self.crate_url(package))?;

        response
            .krate
            .max_stable_version
            .filter(|v| !v.is_empty())
            .or(response.krate.max_version.filter(|v| !v.is_empty()))
            .ok_or_else(|| LookupError::MalformedResponse {
                package: package.clone(),
                reason: "no published version".to_string(),
            })
    }
}

impl DependencyProvider for RegistryProvider {
    fn name(&self) -> &'static str {
        "registry"
    }

    fn normalize(&self, raw: &str) -> PackageId {
        PackageId::new(raw.trim().to_lowercase())
    }

    fn get_dependencies(&self, package: &PackageId) -> Result<Vec<PackageId>, LookupError> {
        let version = self.resolve_version(package)?;
        let url = format!(
            "{}/{}/dependencies",
            self.crate_url(package),
            utf8_percent_encode(&version, PATH_SEGMENT)
        );

        let response: DependenciesResponse = self.get_json(package, &url)?;

        let mut dependencies: Vec<PackageId> = Vec::new();
        for dependency in response.dependencies {
            if dependency.kind.as_deref().is_some_and(|kind| kind != "normal") {
                continue;
            }
            let dependency = self.normalize(&dependency.crate_id);
            if !dependencies.contains(&dependency) {
                dependencies.push(dependency);
            }
        }

        debug!(
            package = %package,
            version = %version,
            count = dependencies.len(),
            "Registry dependencies resolved"
        );
        Ok(dependencies)
    }
}

#[cfg(test)]
mod tests {
    include!("registry.test.rs");
}

//! Hermetic test environment for E2E testing
//!
//! Creates an isolated directory holding settings files, fixture graphs and
//! mock renderer executables, so no test depends on Graphviz or the network.

use anyhow::Result;
use depviz_lib::application::commands::execute_command_with_output;
use depviz_lib::application::{AppConfig, Commands};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Renderer name guaranteed not to resolve on PATH
pub const MISSING_RENDERER: &str = "depviz-test-no-such-binary";

/// Mock renderer behavior
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Copy stdin to the `-o` target
    WriteInput,
    /// Exit non-zero with a message on stderr
    AlwaysFail { error: String },
}

/// Hermetic test environment
pub struct TestEnvironment {
    /// Temporary directory for the test environment
    pub temp_dir: TempDir,
    /// Path to the test environment root
    pub root_path: PathBuf,
    /// Renderer used by [`TestEnvironment::app_config`]
    dot_command: String,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root_path = temp_dir.path().to_path_buf();
        Ok(Self {
            temp_dir,
            root_path,
            dot_command: MISSING_RENDERER.to_string(),
        })
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root_path.join(name)
    }

    /// Write a TOML fixture graph
    pub fn write_fixture(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Write `config.xml` for a fixture-backed resolution
    pub fn write_fixture_settings(
        &self,
        package: &str,
        fixture: &str,
        output_file: &str,
    ) -> Result<PathBuf> {
        self.write_settings(&format!(
            "  <package_name>{}</package_name>\n  <repository_url></repository_url>\n  <test_mode>true</test_mode>\n  <test_repository_path>{}</test_repository_path>\n  <output_file>{}</output_file>",
            package, fixture, output_file
        ))
    }

    /// Write `config.xml` for a registry-backed resolution
    pub fn write_registry_settings(
        &self,
        package: &str,
        repository_url: &str,
        output_file: &str,
    ) -> Result<PathBuf> {
        self.write_settings(&format!(
            "  <package_name>{}</package_name>\n  <repository_url>{}</repository_url>\n  <test_mode>false</test_mode>\n  <output_file>{}</output_file>",
            package, repository_url, output_file
        ))
    }

    /// Write `config.xml` with the given elements inside `<config>`
    pub fn write_settings(&self, elements: &str) -> Result<PathBuf> {
        let path = self.path("config.xml");
        fs::write(&path, format!("<config>\n{}\n</config>\n", elements))?;
        Ok(path)
    }

    /// Install a mock `dot` executable and use it for rendering
    #[cfg(unix)]
    pub fn install_mock_dot(&mut self, behavior: MockBehavior) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let body = match behavior {
            // Invoked as: dot -T<format> -o <target>
            MockBehavior::WriteInput => "cat > \"$3\"".to_string(),
            MockBehavior::AlwaysFail { error } => {
                format!("cat > /dev/null\necho '{}' >&2\nexit 1", error)
            }
        };

        let bin_dir = self.path("bin");
        fs::create_dir_all(&bin_dir)?;
        let script = bin_dir.join("dot");
        fs::write(&script, format!("#!/bin/sh\n{}\n", body))?;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755))?;

        self.dot_command = script.to_string_lossy().into_owned();
        Ok(script)
    }

    /// Configuration pointing at this environment's settings and renderer
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            config_file: self.path("config.xml"),
            dot_command: self.dot_command.clone(),
            net_retries: 0,
            ..AppConfig::default()
        }
    }

    /// Run a command in-process and capture its report
    pub fn run(&self, command: Commands) -> Result<String> {
        let mut out = Vec::new();
        execute_command_with_output(command, &self.app_config(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }
}

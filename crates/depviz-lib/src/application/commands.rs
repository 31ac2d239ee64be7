//! Command execution handlers
//!
//! Every handler writes its report to a caller-supplied writer so tests can
//! capture output; [`execute_command`] binds it to stdout.

use crate::application::settings::{PackageSource, ResolutionSettings};
use crate::application::{AppConfig, CliConfig, Commands};
use crate::graph::{GraphBuilder, Resolution, format_cycle, to_dot};
use crate::progress_span;
use crate::providers::{DependencyProvider, FixtureProvider, RegistryProvider};
use crate::render::{DiagramRenderer, OutputFormat, RenderOutcome};
use anyhow::{Context, Result, bail};
use console::style;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

const RULER_WIDTH: usize = 50;

/// Execute CLI commands, writing reports to stdout
pub fn execute_command(config: CliConfig) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let Some(command) = config.command else {
        writeln!(out, "depviz - dependency graph explorer")?;
        writeln!(
            out,
            "{}",
            style("Run 'depviz --help' for usage information").dim()
        )?;
        return Ok(());
    };

    execute_command_with_output(command, &config.app_config, &mut out)
}

/// Execute a specific command against a provided writer (for testing)
pub fn execute_command_with_output(
    command: Commands,
    config: &AppConfig,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Commands::Config => handle_config(config, out),
        Commands::Graph { output } => handle_graph(config, output, out),
        Commands::Order => handle_order(config, out),
        Commands::Deps => handle_deps(config, out),
        Commands::Dot => handle_dot(config, out),
    }
}

/// Build the provider for a dependency source
pub fn build_provider(
    source: &PackageSource,
    config: &AppConfig,
) -> Result<Box<dyn DependencyProvider>> {
    let provider: Box<dyn DependencyProvider> = match source {
        PackageSource::Fixture { path } => Box::new(
            FixtureProvider::load(path)
                .with_context(|| format!("Failed to load fixture graph {}", path.display()))?,
        ),
        PackageSource::Registry { url } => Box::new(
            RegistryProvider::new(url, config.registry_options())
                .context("Failed to set up registry client")?,
        ),
    };
    Ok(provider)
}

/// Load the settings and resolve the configured package
pub fn resolve(config: &AppConfig) -> Result<(ResolutionSettings, Resolution)> {
    let settings = ResolutionSettings::load(&config.config_file)?;
    let provider = build_provider(&settings.source(), config)?;
    let root = provider.normalize(&settings.package_name);

    let span = progress_span!("resolve", root = root.as_str());
    let _enter = span.enter();

    let resolution = GraphBuilder::new(provider.as_ref()).build(root);
    Ok((settings, resolution))
}

fn ruler() -> String {
    "=".repeat(RULER_WIDTH)
}

fn handle_config(config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let settings = ResolutionSettings::load(&config.config_file)?;

    writeln!(out, "{}", ruler())?;
    writeln!(out, "{}", style("Configuration parameters:").bold())?;
    writeln!(out, "{}", ruler())?;
    for (key, value) in settings.entries() {
        writeln!(out, "{}: {}", key, value)?;
    }
    writeln!(out, "{}", ruler())?;
    Ok(())
}

fn handle_graph(config: &AppConfig, output: Option<PathBuf>, out: &mut dyn Write) -> Result<()> {
    let (settings, resolution) = resolve(config)?;
    let graph = &resolution.graph;
    // A root without dependencies never enters the graph
    let packages = graph.node_count() + usize::from(!graph.contains(resolution.root.as_str()));

    writeln!(
        out,
        "{} {}: {} packages, {} dependencies",
        style("Resolved").green().bold(),
        resolution.root,
        packages,
        graph.edge_count()
    )?;

    if graph.has_cycles() {
        writeln!(
            out,
            "{} {}",
            style("Cycles:").red().bold(),
            graph.get_cycles().len()
        )?;
        for cycle in graph.get_cycles() {
            writeln!(out, "  {}", format_cycle(cycle))?;
        }
    }

    if !resolution.failed_lookups.is_empty() {
        let failed: Vec<&str> = resolution
            .failed_lookups
            .iter()
            .map(|p| p.as_str())
            .collect();
        writeln!(
            out,
            "{} {} ({})",
            style("Failed lookups:").yellow().bold(),
            failed.len(),
            failed.join(", ")
        )?;
    }

    let (target, format) = match output {
        Some(path) => {
            let Some(format) = OutputFormat::from_path(&path) else {
                bail!(
                    "Unsupported diagram format for {} (use .svg, .png, .jpg, .jpeg or .pdf)",
                    path.display()
                );
            };
            (path, format)
        }
        None => (settings.output_file.clone(), settings.output_format),
    };

    let dot = to_dot(graph, &resolution.root);
    let renderer = DiagramRenderer::new(config.dot_command.clone());
    match renderer.render(&dot, &target, format)? {
        RenderOutcome::Rendered { path } => {
            writeln!(out, "Diagram written to {}", path.display())?;
        }
        RenderOutcome::SourceSaved { path, reason } => {
            debug!(reason = %reason, "Diagram not rendered");
            writeln!(
                out,
                "{} could not render diagram ({})",
                style("Warning:").yellow().bold(),
                reason
            )?;
            writeln!(out, "DOT source saved to {}", path.display())?;
            writeln!(
                out,
                "Render it manually with: dot -T{} -o {} {}",
                format,
                target.display(),
                path.display()
            )?;
        }
    }

    Ok(())
}

fn handle_order(config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let (_, resolution) = resolve(config)?;
    let order = resolution.load_order()?;

    for (position, package) in order.iter().enumerate() {
        writeln!(out, "{:>3}. {}", position + 1, package)?;
    }
    Ok(())
}

fn handle_deps(config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let (_, resolution) = resolve(config)?;

    for package in resolution.closure() {
        writeln!(out, "{}", package)?;
    }
    Ok(())
}

fn handle_dot(config: &AppConfig, out: &mut dyn Write) -> Result<()> {
    let (_, resolution) = resolve(config)?;
    write!(out, "{}", to_dot(&resolution.graph, &resolution.root))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("commands.test.rs");
}

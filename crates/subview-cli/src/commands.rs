use super::args::Cli;
use super::handlers;
use super::logging::init_logging;
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use subview_core::{discover_project_root, project_log_dir, projects_root, resolve_claude_root};
use subview_runtime::{Config, DisplayFormat};
use tracing::info;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_file.as_deref())?;

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if cli.verbose {
        config.format = DisplayFormat::Verbose;
    }

    let project_dir = resolve_project_dir(cli.claude_dir.as_deref(), cli.project.as_deref())?;
    info!(project_dir = %project_dir.display(), "starting viewer");

    handlers::watch::handle(&project_dir, config)
}

/// Session root of the project, which must exist and be readable.
fn resolve_project_dir(claude_dir: Option<&str>, project: Option<&str>) -> Result<PathBuf> {
    let claude_root =
        resolve_claude_root(claude_dir).context("Failed to resolve Claude data directory")?;
    let project_root = discover_project_root(project).context("Failed to resolve project path")?;
    let project_dir = project_log_dir(&projects_root(&claude_root), &project_root);

    check_readable(&project_dir, &project_root)?;
    Ok(project_dir)
}

fn check_readable(project_dir: &Path, project_root: &Path) -> Result<()> {
    if !project_dir.is_dir() {
        bail!(
            "No Claude sessions found for project {} (expected {})",
            project_root.display(),
            project_dir.display()
        );
    }

    std::fs::read_dir(project_dir)
        .with_context(|| format!("Cannot read project directory {}", project_dir.display()))?;
    Ok(())
}

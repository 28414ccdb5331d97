//! Command implementations for packweave CLI

pub mod build;
pub mod check;
pub mod clean;
pub mod completions;
pub mod create;
pub mod version;

use std::path::{Path, PathBuf};

use packweave::config::{CONFIG_FILE, ProjectConfig};
use packweave::error::{self, Result};
use packweave::project::BuildPipeline;

/// Locate the project configuration: `--config` wins, otherwise search
/// upward from the current directory
pub fn config_path(config: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = config {
        return Ok(path);
    }
    let cwd = std::env::current_dir()?;
    ProjectConfig::find_from(&cwd).ok_or_else(|| error::config::not_found(&cwd.join(CONFIG_FILE)))
}

/// Load the configuration and build the pipeline it describes
pub fn load_pipeline(config: Option<PathBuf>) -> Result<BuildPipeline> {
    let path = config_path(config)?;
    let config = ProjectConfig::load(&path)?;
    let interactive = console::Term::stderr().is_term();
    Ok(BuildPipeline::from_config(&config)?.with_progress(interactive))
}

pub(crate) fn display_path(path: &Path) -> String {
    match std::env::current_dir() {
        Ok(cwd) => path
            .strip_prefix(&cwd)
            .unwrap_or(path)
            .display()
            .to_string(),
        Err(_) => path.display().to_string(),
    }
}

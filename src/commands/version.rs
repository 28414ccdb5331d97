//! Version command: packweave version and the project it would act on

use std::path::PathBuf;

use console::Style;

use packweave::config::ProjectConfig;
use packweave::error::Result;

use super::{config_path, display_path};

/// Run version command
pub fn run(config: Option<PathBuf>) -> Result<()> {
    println!("packweave {}", env!("CARGO_PKG_VERSION"));

    let dim = Style::new().dim();
    let Ok(path) = config_path(config) else {
        println!("{}", dim.apply_to("No packweave.yaml found"));
        return Ok(());
    };

    match ProjectConfig::load(&path) {
        Ok(project) => println!(
            "Project: {} ({}, {} bundles)",
            display_path(&path),
            project.package_tool,
            project.bundles.len()
        ),
        Err(e) => println!("Project: {} {}", display_path(&path), dim.apply_to(format!("({e})"))),
    }
    Ok(())
}

//! Clean command: remove the created project directory

use std::path::PathBuf;

use console::Style;
use inquire::Confirm;

use crate::cli::CleanArgs;
use packweave::error::{self, Result};

use super::{display_path, load_pipeline};

/// Run clean command
pub fn run(config: Option<PathBuf>, args: CleanArgs) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    let project_path = display_path(pipeline.project().project_path());

    if !pipeline.project().project_path().exists() {
        println!("Nothing to clean: {project_path} does not exist");
        return Ok(());
    }

    if !args.yes && !confirm_clean(&project_path)? {
        println!("Cancelled");
        return Ok(());
    }

    pipeline.clean()?;
    println!(
        "{} Removed {}",
        Style::new().green().bold().apply_to("✓"),
        project_path
    );
    Ok(())
}

fn confirm_clean(project_path: &str) -> Result<bool> {
    Confirm::new(&format!("Remove {project_path} and everything in it?"))
        .with_default(false)
        .with_help_message("Press 'y' to confirm, or Enter to cancel")
        .prompt()
        .map_err(|e| error::fs::io_error(format!("Failed to read confirmation: {e}")))
}

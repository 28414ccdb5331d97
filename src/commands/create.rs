//! Create command: write the webpack project to disk

use std::path::PathBuf;

use console::Style;

use crate::cli::CreateArgs;
use packweave::error::Result;

use super::{display_path, load_pipeline};

/// Run create command
pub fn run(config: Option<PathBuf>, args: CreateArgs) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    let report = pipeline.create(args.force)?;

    println!(
        "{} Created {} ({} copied, {} unchanged, {} skipped)",
        Style::new().green().bold().apply_to("✓"),
        display_path(pipeline.project().project_path()),
        report.copied,
        report.unchanged,
        report.skipped
    );
    Ok(())
}

//! Package tool commands: install, run, build and buildall

use std::path::PathBuf;

use console::Style;

use crate::cli::{RunArgs, ToolArgs};
use packweave::error::Result;
use packweave::project::BuildPipeline;

use super::load_pipeline;

fn announce(pipeline: &BuildPipeline, action: &str) {
    eprintln!(
        "{} {} with {}",
        Style::new().cyan().bold().apply_to("→"),
        action,
        pipeline.project().tool()
    );
}

/// Run install command
pub fn install(config: Option<PathBuf>, args: ToolArgs) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    announce(&pipeline, "Installing dependencies");
    pipeline.install(&args.args)
}

/// Run a package.json script
pub fn run(config: Option<PathBuf>, args: RunArgs) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    announce(&pipeline, &format!("Running '{}'", args.script));
    pipeline.run(&args.script, &args.args)
}

/// Run build command
pub fn build(config: Option<PathBuf>, args: ToolArgs) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    announce(&pipeline, "Building");
    pipeline.build(&args.args)
}

/// Run buildall command
pub fn buildall(config: Option<PathBuf>) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    announce(&pipeline, "Creating, installing and building");
    pipeline.buildall()
}

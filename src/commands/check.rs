//! Check command: merge the bundles and report the result

use std::path::PathBuf;

use console::Style;

use crate::cli::CheckArgs;
use packweave::error::{self, Result};
use packweave::merge::ProjectDescriptor;

use super::load_pipeline;

/// Run check command
pub fn run(config: Option<PathBuf>, args: CheckArgs) -> Result<()> {
    let pipeline = load_pipeline(config)?;
    let descriptor = pipeline.describe()?;

    if args.json {
        let json = serde_json::to_string_pretty(descriptor)
            .map_err(|e| error::fs::io_error(e.to_string()))?;
        println!("{json}");
        return Ok(());
    }

    print_summary(descriptor);
    Ok(())
}

fn print_summary(descriptor: &ProjectDescriptor) {
    let label = Style::new().bold();
    let name = Style::new().cyan();

    println!("{} bundles compose cleanly", Style::new().green().bold().apply_to("✓"));

    println!("{}", label.apply_to("Entries:"));
    for (entry, path) in descriptor.entries() {
        println!("  {} {}", name.apply_to(entry), path);
    }

    println!("{}", label.apply_to("Aliases:"));
    for (alias, path) in descriptor.aliases() {
        println!("  {} {}", name.apply_to(alias), path);
    }

    println!("{}", label.apply_to("Copy:"));
    for instruction in descriptor.copy() {
        println!("  {instruction}");
    }

    let dependencies = descriptor.dependencies();
    println!(
        "{} {} dependencies, {} devDependencies, {} peerDependencies",
        label.apply_to("Packages:"),
        dependencies.dependencies.len(),
        dependencies.dev_dependencies.len(),
        dependencies.peer_dependencies.len()
    );
}

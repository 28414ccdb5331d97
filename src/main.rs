//! packweave - compose webpack projects out of independently authored bundles

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config;
    let result = match cli.command {
        Commands::Check(args) => commands::check::run(config, args),
        Commands::Create(args) => commands::create::run(config, args),
        Commands::Install(args) => commands::build::install(config, args),
        Commands::Run(args) => commands::build::run(config, args),
        Commands::Build(args) => commands::build::build(config, args),
        Commands::Buildall => commands::build::buildall(config),
        Commands::Clean(args) => commands::clean::run(config, args),
        Commands::Version => commands::version::run(config),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// packweave - compose webpack projects out of bundles
///
/// Merges the entry points, aliases, copy instructions and npm dependencies of
/// independently authored bundles into one webpack project.
#[derive(Parser, Debug)]
#[command(
    name = "packweave",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Compose webpack projects out of independently authored bundles",
    long_about = "packweave merges the entry points, aliases, copy instructions and npm \
                  dependencies of a list of bundles into one webpack project, reports \
                  conflicting contributions, and keeps copy instructions inside the \
                  allowed paths.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  packweave check\n    \
                  packweave create --force\n    \
                  packweave buildall\n    \
                  packweave run start -- --port 8080\n    \
                  packweave -c assets/packweave.yaml clean -y"
)]
pub struct Cli {
    /// Project configuration (defaults to the nearest packweave.yaml)
    #[arg(long, short = 'c', global = true, env = "PACKWEAVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge the bundles and report conflicts without writing anything
    Check(CheckArgs),

    /// Create the webpack project from the template and bundles
    Create(CreateArgs),

    /// Install npm dependencies of the created project
    Install(ToolArgs),

    /// Run a package.json script in the created project
    Run(RunArgs),

    /// Run the build script in the created project
    Build(ToolArgs),

    /// Create, install and build from scratch
    Buildall,

    /// Remove the created project directory
    Clean(CleanArgs),

    /// Show the version and the project packweave would act on
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the check command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Check that the bundles compose:\n    packweave check\n\n\
                  Print the merged project descriptor:\n    packweave check --json")]
pub struct CheckArgs {
    /// Print the merged project descriptor as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the create command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Create the project, copying only changed files:\n    packweave create\n\n\
                  Overwrite every file:\n    packweave create --force")]
pub struct CreateArgs {
    /// Copy every file, even if the target is unchanged
    #[arg(long, short = 'f')]
    pub force: bool,
}

/// Extra arguments passed through to npm or yarn
#[derive(Parser, Debug)]
pub struct ToolArgs {
    /// Arguments forwarded to the package tool
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Run a script:\n    packweave run start\n\n\
                  Pass arguments to the script:\n    packweave run start -- --port 8080")]
pub struct RunArgs {
    /// Script name from package.json
    pub script: String,

    /// Arguments forwarded to the script
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the clean command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove the project directory:\n    packweave clean\n\n\
                  Remove without confirmation:\n    packweave clean -y")]
pub struct CleanArgs {
    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    packweave completions --shell bash > ~/.bash_completion.d/packweave\n\n\
                  Generate zsh completions:\n    packweave completions --shell zsh > ~/.zfunc/_packweave\n\n\
                  Generate fish completions:\n    packweave completions --shell fish > ~/.config/fish/completions/packweave.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}

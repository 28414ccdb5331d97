//! Shell completions command

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::{Cli, CompletionsArgs};
use packweave::error::{self, Result};

fn parse_shell(name: &str) -> Result<Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "elvish" => Ok(Shell::Elvish),
        "fish" => Ok(Shell::Fish),
        "powershell" | "pwsh" => Ok(Shell::PowerShell),
        "zsh" => Ok(Shell::Zsh),
        _ => Err(error::config::invalid(format!(
            "Unknown shell: {name}. Supported shells: bash, elvish, fish, powershell, zsh"
        ))),
    }
}

/// Generate shell completions
pub fn run(args: CompletionsArgs) -> Result<()> {
    let shell = parse_shell(&args.shell)?;
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "packweave", &mut std::io::stdout().lock());
    Ok(())
}

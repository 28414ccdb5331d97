//! npm/yarn project wrapper
//!
//! An [`NpmProject`] is a directory holding a `package.json`. Package tool
//! commands run with that directory as their working directory, and their
//! output goes straight to the terminal.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{self, Result};

/// Manifest file name inside the project directory
pub const PACKAGE_JSON: &str = "package.json";

/// Package tool used to install and run scripts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageTool {
    #[default]
    Npm,
    Yarn,
}

impl PackageTool {
    pub fn program(self) -> &'static str {
        match self {
            PackageTool::Npm => "npm",
            PackageTool::Yarn => "yarn",
        }
    }

    /// Arguments for installing dependencies
    pub fn install_args(self, args: &[String]) -> Vec<String> {
        let mut command = vec!["install".to_string()];
        command.extend(args.iter().cloned());
        command
    }

    /// Arguments for running a `package.json` script.
    ///
    /// npm needs `--` before script arguments; yarn forwards them as is.
    pub fn run_args(self, script: &str, args: &[String]) -> Vec<String> {
        let mut command = match self {
            PackageTool::Npm => vec!["run-script".to_string(), script.to_string()],
            PackageTool::Yarn => vec!["run".to_string(), script.to_string()],
        };
        if !args.is_empty() {
            if self == PackageTool::Npm {
                command.push("--".to_string());
            }
            command.extend(args.iter().cloned());
        }
        command
    }
}

impl std::fmt::Display for PackageTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.program())
    }
}

/// An existing npm project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmProject {
    path: PathBuf,
    tool: PackageTool,
}

impl NpmProject {
    pub fn new(path: impl Into<PathBuf>, tool: PackageTool) -> Self {
        Self {
            path: path.into(),
            tool,
        }
    }

    pub fn tool(&self) -> PackageTool {
        self.tool
    }

    /// Directory holding `package.json`
    pub fn project_path(&self) -> &Path {
        &self.path
    }

    pub fn package_json_path(&self) -> PathBuf {
        self.path.join(PACKAGE_JSON)
    }

    /// Parsed `package.json`
    pub fn package_json(&self) -> Result<Map<String, JsonValue>> {
        read_json_object(&self.package_json_path())
    }

    /// Script names declared in `package.json`
    pub fn scripts(&self) -> Result<Vec<String>> {
        let manifest = self.package_json()?;
        Ok(match manifest.get("scripts") {
            Some(JsonValue::Object(scripts)) => scripts.keys().cloned().collect(),
            _ => Vec::new(),
        })
    }

    pub fn install(&self, args: &[String]) -> Result<()> {
        self.exec(&self.tool.install_args(args))
    }

    /// Run a script that `package.json` declares
    pub fn run(&self, script: &str, args: &[String]) -> Result<()> {
        let scripts = self.scripts()?;
        if !scripts.iter().any(|name| name == script) {
            return Err(error::npm::invalid_script(script, &scripts));
        }
        self.exec(&self.tool.run_args(script, args))
    }

    pub fn build(&self, args: &[String]) -> Result<()> {
        self.run("build", args)
    }

    fn exec(&self, args: &[String]) -> Result<()> {
        let program = self.tool.program();
        tracing::info!(program, args = %args.join(" "), cwd = %self.path.display(), "running package tool");

        let status = Command::new(program)
            .args(args)
            .current_dir(&self.path)
            .status()
            .map_err(|e| error::npm::spawn_failed(program, e))?;

        if !status.success() {
            return Err(error::npm::command_failed(program, args, status));
        }
        Ok(())
    }
}

/// Read a JSON file whose top level must be an object
pub fn read_json_object(path: &Path) -> Result<Map<String, JsonValue>> {
    let content =
        std::fs::read_to_string(path).map_err(|e| error::fs::read_failed(path, e))?;
    match serde_json::from_str(&content).map_err(|e| error::fs::read_failed(path, e))? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(error::fs::read_failed(path, "expected a JSON object")),
    }
}

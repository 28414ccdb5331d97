//! Bundles: independently authored contributors to a composed webpack project
//!
//! A bundle lives in a directory and is described by a `bundle.yaml`:
//!
//! ```yaml
//! entry:
//!   theme: ./js/theme.js
//! aliases:
//!   "@theme": ./js
//! copy:
//!   - from: ./fonts
//!     to: ../static/fonts
//! dependencies:
//!   dependencies:
//!     jquery: "^3.7.0"
//!   devDependencies:
//!     sass: "^1.70.0"
//! ```
//!
//! The bundle's identity is its path. It is never read from the descriptor.

pub mod copy;
pub mod dependency;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

pub use copy::CopyInstruction;
pub use dependency::{DependencyClass, DependencyManifest};

/// Name of the bundle descriptor file inside a bundle directory
pub const BUNDLE_FILE: &str = "bundle.yaml";

/// A bundle and everything it contributes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Bundle directory; used for error attribution and file collection
    #[serde(default)]
    pub path: String,

    /// Entry name to source file
    #[serde(default)]
    pub entry: BTreeMap<String, String>,

    /// Module-resolution alias to target path
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,

    /// Copy instructions, in declaration order
    #[serde(default)]
    pub copy: Vec<CopyInstruction>,

    /// npm dependency ranges
    #[serde(default)]
    pub dependencies: DependencyManifest,
}

impl Bundle {
    /// Create an empty bundle at `path`
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_entry(mut self, name: impl Into<String>, file: impl Into<String>) -> Self {
        self.entry.insert(name.into(), file.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), target.into());
        self
    }

    pub fn with_copy(mut self, instruction: CopyInstruction) -> Self {
        self.copy.push(instruction);
        self
    }

    pub fn with_dependency(
        mut self,
        class: DependencyClass,
        package: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.dependencies.insert(class, package, version);
        self
    }

    /// Parse a bundle descriptor, attributing it to `path`
    pub fn from_yaml(path: &Path, yaml: &str) -> Result<Self> {
        let mut bundle: Bundle = if yaml.trim().is_empty() {
            Bundle::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| error::config::bundle_parse_failed(&path.join(BUNDLE_FILE), e))?
        };
        bundle.path = path.display().to_string();
        Ok(bundle)
    }

    /// Load the bundle described by `<dir>/bundle.yaml`
    pub fn load(dir: &Path) -> Result<Self> {
        let file = dir.join(BUNDLE_FILE);
        if !file.is_file() {
            return Err(error::config::bundle_not_found(&file));
        }

        let yaml =
            std::fs::read_to_string(&file).map_err(|e| error::fs::read_failed(&file, e))?;
        let bundle = Self::from_yaml(dir, &yaml)?;

        tracing::debug!(
            bundle = %bundle.path,
            entries = bundle.entry.len(),
            aliases = bundle.aliases.len(),
            copies = bundle.copy.len(),
            "loaded bundle descriptor"
        );
        Ok(bundle)
    }

    /// Bundle directory as a path
    pub fn dir(&self) -> &Path {
        Path::new(&self.path)
    }
}

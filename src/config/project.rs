//! Project configuration (packweave.yaml)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::bundle::Bundle;
use crate::error::{self, Result};
use crate::path_utils::resolve;
use crate::project::npm::PackageTool;

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "packweave.yaml";

fn default_config_path() -> PathBuf {
    PathBuf::from("config.json")
}

fn default_package_json_source() -> PathBuf {
    PathBuf::from("package.json")
}

/// A bundle listed in the project configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BundleRef {
    /// Directory holding a `bundle.yaml`
    Dir(PathBuf),
    /// Bundle declared in place; `path` is required
    Inline(Bundle),
}

/// Project configuration from packweave.yaml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Where the webpack project is created
    pub working_dir: PathBuf,

    /// Project template copied into `working_dir`
    pub template_dir: PathBuf,

    /// Webpack config file, relative to `working_dir`
    #[serde(default = "default_config_path")]
    pub config_path: PathBuf,

    /// Base package.json, relative to `template_dir`
    #[serde(default = "default_package_json_source")]
    pub package_json_source: PathBuf,

    #[serde(default)]
    pub package_tool: PackageTool,

    /// Sandbox roots for copy instructions, absolute or relative to the
    /// directory of the webpack config file
    #[serde(default)]
    pub allowed_copy_paths: Vec<PathBuf>,

    /// Extra webpack configuration written alongside entries, aliases and copies
    #[serde(default)]
    pub config: Map<String, JsonValue>,

    #[serde(default)]
    pub bundles: Vec<BundleRef>,

    /// Directory containing packweave.yaml; relative paths resolve against it
    #[serde(skip)]
    pub root: PathBuf,
}

impl ProjectConfig {
    /// Parse configuration from YAML, resolving relative paths against `root`
    pub fn from_yaml(yaml: &str, root: impl Into<PathBuf>) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| error::config::parse_failed(Path::new(CONFIG_FILE), e))?;
        config.root = root.into();
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(error::config::not_found(path));
        }

        let path = dunce::canonicalize(path).map_err(|e| error::fs::read_failed(path, e))?;
        let yaml =
            std::fs::read_to_string(&path).map_err(|e| error::fs::read_failed(&path, e))?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut config: Self =
            serde_yaml::from_str(&yaml).map_err(|e| error::config::parse_failed(&path, e))?;
        config.root = root;
        config.validate()?;

        tracing::debug!(config = %path.display(), bundles = config.bundles.len(), "loaded project configuration");
        Ok(config)
    }

    /// Search `start` and its ancestors for packweave.yaml
    pub fn find_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    pub fn validate(&self) -> Result<()> {
        if self.working_dir.as_os_str().is_empty() {
            return Err(error::config::invalid("'working_dir' cannot be empty"));
        }
        if self.template_dir.as_os_str().is_empty() {
            return Err(error::config::invalid("'template_dir' cannot be empty"));
        }
        if self.config_path.as_os_str().is_empty() {
            return Err(error::config::invalid("'config_path' cannot be empty"));
        }

        for bundle in &self.bundles {
            if let BundleRef::Inline(bundle) = bundle {
                if bundle.path.is_empty() {
                    return Err(error::config::invalid(
                        "Inline bundles must specify a 'path'",
                    ));
                }
            }
        }

        Ok(())
    }

    pub fn working_dir(&self) -> PathBuf {
        resolve(&self.working_dir, &self.root)
    }

    pub fn template_dir(&self) -> PathBuf {
        resolve(&self.template_dir, &self.root)
    }

    /// Webpack config file inside the working directory
    pub fn config_file(&self) -> PathBuf {
        resolve(&self.config_path, &self.working_dir())
    }

    /// Base package.json inside the template directory
    pub fn package_json_source_path(&self) -> PathBuf {
        resolve(&self.package_json_source, &self.template_dir())
    }

    /// Load every referenced bundle, in declaration order
    pub fn load_bundles(&self) -> Result<Vec<Bundle>> {
        self.bundles
            .iter()
            .map(|bundle| match bundle {
                BundleRef::Dir(dir) => Bundle::load(&resolve(dir, &self.root)),
                BundleRef::Inline(bundle) => {
                    let path = resolve(Path::new(&bundle.path), &self.root);
                    Ok(Bundle {
                        path: path.display().to_string(),
                        ..bundle.clone()
                    })
                }
            })
            .collect()
    }
}

//! Build pipeline: an npm project, optionally created from a template and
//! composed from bundles
//!
//! ```text
//! NpmProject      install / run / build
//!   + TemplateStage   copy template, write webpack config, clean
//!   + BundleStage     merge bundles, collect bundle files, write package.json
//! ```

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value as JsonValue};

use super::manifest::write_json;
use super::npm::{NpmProject, PACKAGE_JSON, read_json_object};
use super::storage::{CollectReport, FileStorage};
use crate::bundle::Bundle;
use crate::config::{Deferred, ProjectConfig};
use crate::error::{self, Result};
use crate::merge::{ProjectDescriptor, ProjectDescriptorBuilder};
use crate::path_utils::resolve;
use crate::progress::ProgressDisplay;

/// Creates the project directory from a template
#[derive(Debug)]
pub struct TemplateStage {
    template_dir: PathBuf,
    config: Option<Deferred<Map<String, JsonValue>>>,
    config_path: PathBuf,
}

impl TemplateStage {
    /// `config_path` is relative to the project directory unless absolute
    pub fn new(template_dir: impl Into<PathBuf>, config_path: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            config: None,
            config_path: config_path.into(),
        }
    }

    /// Webpack configuration written next to the template files
    pub fn with_config(mut self, config: Deferred<Map<String, JsonValue>>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }
}

/// Composes the project out of bundles
#[derive(Debug)]
pub struct BundleStage {
    bundles: Vec<Bundle>,
    package_json_source_path: PathBuf,
    allowed_copy_paths: Deferred<Vec<PathBuf>>,
}

impl BundleStage {
    pub fn new(bundles: Vec<Bundle>, package_json_source_path: impl Into<PathBuf>) -> Self {
        Self {
            bundles,
            package_json_source_path: package_json_source_path.into(),
            allowed_copy_paths: Deferred::default(),
        }
    }

    /// Sandbox roots, absolute or relative to the webpack config file's directory
    pub fn with_allowed_copy_paths(mut self, roots: Deferred<Vec<PathBuf>>) -> Self {
        self.allowed_copy_paths = roots;
        self
    }

    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    /// Base `package.json` the merged dependencies are injected into
    pub fn package_json_source(&self) -> Result<Map<String, JsonValue>> {
        read_json_object(&self.package_json_source_path)
    }
}

/// Everything needed to create, install and build one webpack project
#[derive(Debug)]
pub struct BuildPipeline {
    project: NpmProject,
    template: Option<TemplateStage>,
    bundles: Option<BundleStage>,
    descriptor: OnceCell<ProjectDescriptor>,
    show_progress: bool,
}

impl BuildPipeline {
    pub fn new(project: NpmProject) -> Self {
        Self {
            project,
            template: None,
            bundles: None,
            descriptor: OnceCell::new(),
            show_progress: false,
        }
    }

    pub fn with_template(mut self, template: TemplateStage) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_bundles(mut self, bundles: BundleStage) -> Self {
        self.bundles = Some(bundles);
        self.descriptor = OnceCell::new();
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Pipeline for a loaded `packweave.yaml`, with all three stages
    pub fn from_config(config: &ProjectConfig) -> Result<Self> {
        let project = NpmProject::new(config.working_dir(), config.package_tool);
        let template = TemplateStage::new(config.template_dir(), &config.config_path)
            .with_config(Deferred::ready(config.config.clone()));
        let bundles = BundleStage::new(config.load_bundles()?, config.package_json_source_path())
            .with_allowed_copy_paths(Deferred::ready(config.allowed_copy_paths.clone()));

        Ok(Self::new(project)
            .with_template(template)
            .with_bundles(bundles))
    }

    pub fn project(&self) -> &NpmProject {
        &self.project
    }

    /// Webpack config file inside the project directory
    pub fn config_file(&self) -> Result<PathBuf> {
        let template = self
            .template
            .as_ref()
            .ok_or_else(|| error::config::stage_missing("template"))?;
        Ok(resolve(&template.config_path, self.project.project_path()))
    }

    /// Merge all bundles into a project descriptor.
    ///
    /// The merge runs once per pipeline; later calls return the same descriptor.
    pub fn describe(&self) -> Result<&ProjectDescriptor> {
        if let Some(descriptor) = self.descriptor.get() {
            return Ok(descriptor);
        }

        let config_file = self.config_file()?;
        let stage = self
            .bundles
            .as_ref()
            .ok_or_else(|| error::config::stage_missing("bundle"))?;
        let base_manifest = stage.package_json_source()?;

        let descriptor =
            ProjectDescriptorBuilder::new(&stage.bundles, &base_manifest, config_file)
                .allowed_copy_paths(stage.allowed_copy_paths.resolve().iter())
                .build()?;
        tracing::info!(
            bundles = stage.bundles.len(),
            entries = descriptor.entries().len(),
            aliases = descriptor.aliases().len(),
            copies = descriptor.copy().len(),
            "composed project"
        );

        Ok(self.descriptor.get_or_init(|| descriptor))
    }

    /// The webpack configuration `create` writes, if any
    pub fn webpack_config(&self) -> Result<Option<Map<String, JsonValue>>> {
        let template = self
            .template
            .as_ref()
            .ok_or_else(|| error::config::stage_missing("template"))?;
        let base = template.config.as_ref().map(Deferred::resolve);

        if self.bundles.is_some() {
            let empty = Map::new();
            let config = self.describe()?.webpack_config(base.unwrap_or(&empty));
            return Ok(Some(config));
        }
        Ok(base.filter(|config| !config.is_empty()).cloned())
    }

    /// Create the project directory.
    ///
    /// Copies the template, writes the webpack config and, when bundles are
    /// composed, collects their files and writes the merged `package.json`.
    /// Bundles are merged before anything touches the disk.
    pub fn create(&self, force: bool) -> Result<CollectReport> {
        let template = self
            .template
            .as_ref()
            .ok_or_else(|| error::config::stage_missing("template"))?;
        let project_path = self.project.project_path();
        let webpack_config = self.webpack_config()?;

        tracing::info!(
            template = %template.template_dir.display(),
            project = %project_path.display(),
            "creating project from template"
        );
        let skip: &[&str] = if self.bundles.is_some() {
            &[PACKAGE_JSON]
        } else {
            &[]
        };
        let mut report = FileStorage::new(&template.template_dir, project_path).run(force, skip)?;

        if let Some(config) = webpack_config {
            write_json(&self.config_file()?, &config)?;
        }

        if let Some(stage) = &self.bundles {
            report += self.collect(stage, force)?;
            write_json(
                &self.project.package_json_path(),
                self.describe()?.package_manifest(),
            )?;
        }

        Ok(report)
    }

    fn collect(&self, stage: &BundleStage, force: bool) -> Result<CollectReport> {
        let total = stage.bundles.len();
        let progress = if self.show_progress {
            ProgressDisplay::new(total as u64)
        } else {
            ProgressDisplay::hidden()
        };

        let mut report = CollectReport::default();
        for (index, bundle) in stage.bundles.iter().enumerate() {
            progress.update_bundle(&bundle.path, index + 1, total);
            match FileStorage::new(bundle.dir(), self.project.project_path()).run(force, &[]) {
                Ok(collected) => report += collected,
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            }
            progress.inc_bundle();
        }
        progress.finish();

        Ok(report)
    }

    /// Remove the project directory. Returns false if there was nothing to remove.
    pub fn clean(&self) -> Result<bool> {
        if self.template.is_none() {
            return Err(error::config::stage_missing("template"));
        }
        let project_path = self.project.project_path();
        if !project_path.exists() {
            return Ok(false);
        }

        tracing::info!(project = %project_path.display(), "removing project directory");
        std::fs::remove_dir_all(project_path)
            .map_err(|e| error::fs::write_failed(project_path, e))?;
        Ok(true)
    }

    pub fn install(&self, args: &[String]) -> Result<()> {
        self.project.install(args)
    }

    pub fn run(&self, script: &str, args: &[String]) -> Result<()> {
        self.project.run(script, args)
    }

    pub fn build(&self, args: &[String]) -> Result<()> {
        self.project.build(args)
    }

    /// Create (when a template is configured), install and build from scratch
    pub fn buildall(&self) -> Result<()> {
        if self.template.is_some() {
            self.create(false)?;
        }
        self.install(&[])?;
        self.build(&[])
    }
}

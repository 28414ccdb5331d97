//! Bundle composition: merge N bundles into one project descriptor
//!
//! [`ProjectDescriptorBuilder`] runs, in order:
//!
//! 1. entry aggregation ([`keyed::merge_entries`])
//! 2. alias aggregation ([`keyed::merge_aliases`])
//! 3. copy validation ([`copy::validate_copies`])
//! 4. dependency merging ([`dependencies::merge_dependencies`])
//!
//! The first conflict or violation aborts the build. Inputs are only borrowed,
//! and nothing outlives a call to [`ProjectDescriptorBuilder::build`], so
//! building twice from the same inputs gives equal descriptors.

pub mod copy;
pub mod dependencies;
pub mod keyed;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::bundle::{Bundle, CopyInstruction, DependencyManifest};
use crate::error::Result;
use crate::path_utils::dir_part;

pub use copy::SandboxConfig;

/// Two contributions to the same key: who came first, who collided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRecord {
    pub key: String,
    pub first_owner: String,
    pub first_value: String,
    pub second_owner: String,
    pub second_value: String,
}

/// The merged project: what webpack and npm get to see
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    entries: BTreeMap<String, String>,
    aliases: BTreeMap<String, String>,
    copy: Vec<CopyInstruction>,
    dependencies: DependencyManifest,
    package_manifest: Map<String, JsonValue>,
}

impl ProjectDescriptor {
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn aliases(&self) -> &BTreeMap<String, String> {
        &self.aliases
    }

    pub fn copy(&self) -> &[CopyInstruction] {
        &self.copy
    }

    pub fn dependencies(&self) -> &DependencyManifest {
        &self.dependencies
    }

    /// Base `package.json` with the merged dependencies injected
    pub fn package_manifest(&self) -> &Map<String, JsonValue> {
        &self.package_manifest
    }

    /// Webpack configuration: `base` plus the `entry`, `aliases` and `copy` keys
    pub fn webpack_config(&self, base: &Map<String, JsonValue>) -> Map<String, JsonValue> {
        let mut config = base.clone();
        config.insert("entry".to_string(), string_map(&self.entries));
        config.insert("aliases".to_string(), string_map(&self.aliases));
        config.insert(
            "copy".to_string(),
            JsonValue::Array(self.copy.iter().map(CopyInstruction::to_json).collect()),
        );
        config
    }
}

fn string_map(map: &BTreeMap<String, String>) -> JsonValue {
    JsonValue::Object(
        map.iter()
            .map(|(key, value)| (key.clone(), JsonValue::String(value.clone())))
            .collect(),
    )
}

/// Builds a [`ProjectDescriptor`] from an ordered bundle list
#[derive(Debug, Clone)]
pub struct ProjectDescriptorBuilder<'a> {
    bundles: &'a [Bundle],
    base_manifest: &'a Map<String, JsonValue>,
    config_path: PathBuf,
    allowed_copy_paths: Vec<PathBuf>,
}

impl<'a> ProjectDescriptorBuilder<'a> {
    /// `config_path` is the webpack config file; copy instructions and relative
    /// sandbox roots are resolved against its directory.
    pub fn new(
        bundles: &'a [Bundle],
        base_manifest: &'a Map<String, JsonValue>,
        config_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            bundles,
            base_manifest,
            config_path: config_path.into(),
            allowed_copy_paths: Vec::new(),
        }
    }

    /// Restrict copy instructions to these roots. No roots means no restriction.
    pub fn allowed_copy_paths<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.allowed_copy_paths = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Directory that relative copy paths and sandbox roots are resolved against
    pub fn base_dir(&self) -> PathBuf {
        dir_part(&self.config_path)
    }

    pub fn build(&self) -> Result<ProjectDescriptor> {
        let base_dir = self.base_dir();
        let sandbox = SandboxConfig::new(&self.allowed_copy_paths, &base_dir);
        tracing::debug!(
            bundles = self.bundles.len(),
            base_dir = %base_dir.display(),
            sandbox_roots = sandbox.roots().len(),
            "building project descriptor"
        );

        let entries = keyed::merge_entries(self.bundles)?;
        let aliases = keyed::merge_aliases(self.bundles)?;
        let copy = copy::validate_copies(self.bundles, &base_dir, &sandbox)?;
        let dependencies = dependencies::merge_dependencies(self.base_manifest, self.bundles)?;
        let package_manifest = dependencies::inject_dependencies(self.base_manifest, &dependencies);

        Ok(ProjectDescriptor {
            entries,
            aliases,
            copy,
            dependencies,
            package_manifest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::DependencyClass;
    use crate::error::WeaveError;
    use serde_json::json;

    fn object(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("Expected a JSON object"),
        }
    }

    fn theme_and_search() -> Vec<Bundle> {
        vec![
            Bundle::new("bundles/theme")
                .with_entry("theme", "./js/theme.js")
                .with_alias("@theme", "./js")
                .with_copy(CopyInstruction::new("./fonts", "static/fonts"))
                .with_dependency(DependencyClass::Dependencies, "jquery", "^3.7.0"),
            Bundle::new("bundles/search")
                .with_entry("search", "./js/search.js")
                .with_dependency(DependencyClass::DevDependencies, "sass", "^1.70.0"),
        ]
    }

    #[test]
    fn test_build_assembles_all_sections() {
        let bundles = theme_and_search();
        let base = object(json!({"name": "assets", "scripts": {"build": "webpack"}}));

        let descriptor = ProjectDescriptorBuilder::new(&bundles, &base, "/proj/config.json")
            .build()
            .unwrap();

        assert_eq!(descriptor.entries().len(), 2);
        assert_eq!(descriptor.aliases()["@theme"], "./js");
        assert_eq!(descriptor.copy().len(), 1);
        assert_eq!(descriptor.dependencies().dependencies["jquery"], "^3.7.0");
        assert_eq!(
            JsonValue::Object(descriptor.package_manifest().clone()),
            json!({
                "name": "assets",
                "scripts": {"build": "webpack"},
                "dependencies": {"jquery": "^3.7.0"},
                "devDependencies": {"sass": "^1.70.0"}
            })
        );
    }

    #[test]
    fn test_empty_bundle_list() {
        let base = object(json!({"name": "assets", "dependencies": {"lodash": "^4.0.0"}}));

        let descriptor = ProjectDescriptorBuilder::new(&[], &base, "/proj/config.json")
            .build()
            .unwrap();

        assert!(descriptor.entries().is_empty());
        assert!(descriptor.aliases().is_empty());
        assert!(descriptor.copy().is_empty());
        assert_eq!(descriptor.package_manifest(), &base);
    }

    #[test]
    fn test_build_is_idempotent() {
        let bundles = theme_and_search();
        let base = object(json!({"name": "assets"}));
        let builder = ProjectDescriptorBuilder::new(&bundles, &base, "/proj/config.json")
            .allowed_copy_paths(["/proj"]);

        assert_eq!(builder.build().unwrap(), builder.build().unwrap());
    }

    #[test]
    fn test_sandbox_roots_relative_to_config_dir() {
        let bundles = vec![
            Bundle::new("bundles/a").with_copy(CopyInstruction::new("../../etc", "assets")),
        ];
        let base = Map::new();

        let builder = ProjectDescriptorBuilder::new(&bundles, &base, "/proj/static/config.json")
            .allowed_copy_paths(["."]);
        assert_eq!(builder.base_dir(), PathBuf::from("/proj/static"));
        assert!(matches!(
            builder.build(),
            Err(WeaveError::SandboxViolation { .. })
        ));

        let unrestricted =
            ProjectDescriptorBuilder::new(&bundles, &base, "/proj/static/config.json");
        assert!(unrestricted.build().is_ok());
    }

    #[test]
    fn test_first_violation_aborts() {
        let bundles = vec![
            Bundle::new("bundles/a").with_entry("app", "./a.js"),
            Bundle::new("bundles/b")
                .with_entry("app", "./b.js")
                .with_dependency(DependencyClass::Dependencies, "lodash", "^3.0.0"),
        ];
        let base = object(json!({"dependencies": {"lodash": "^4.0.0"}}));

        let result = ProjectDescriptorBuilder::new(&bundles, &base, "/proj/config.json").build();
        assert!(matches!(result, Err(WeaveError::DuplicateEntry { .. })));
    }

    #[test]
    fn test_entry_and_dependency_policies_differ() {
        let base = Map::new();
        let same_dependency = vec![
            Bundle::new("bundles/a").with_dependency(DependencyClass::Dependencies, "d3", "^7.0.0"),
            Bundle::new("bundles/b").with_dependency(DependencyClass::Dependencies, "d3", "^7.0.0"),
        ];
        assert!(
            ProjectDescriptorBuilder::new(&same_dependency, &base, "/proj/config.json")
                .build()
                .is_ok()
        );

        let same_entry = vec![
            Bundle::new("bundles/a").with_entry("charts", "./charts.js"),
            Bundle::new("bundles/b").with_entry("charts", "./charts.js"),
        ];
        assert!(
            ProjectDescriptorBuilder::new(&same_entry, &base, "/proj/config.json")
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_webpack_config_injects_sections() {
        let bundles = theme_and_search();
        let base = Map::new();
        let descriptor = ProjectDescriptorBuilder::new(&bundles, &base, "/proj/config.json")
            .build()
            .unwrap();

        let user_config = object(json!({"build": {"debug": false}, "entry": "overridden"}));
        let config = descriptor.webpack_config(&user_config);

        assert_eq!(config["build"], json!({"debug": false}));
        assert_eq!(
            config["entry"],
            json!({"search": "./js/search.js", "theme": "./js/theme.js"})
        );
        assert_eq!(config["aliases"], json!({"@theme": "./js"}));
        assert_eq!(
            config["copy"],
            json!([{"from": "./fonts", "to": "static/fonts"}])
        );
    }
}

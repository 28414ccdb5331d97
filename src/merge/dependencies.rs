//! Dependency merging across the base manifest and all bundles
//!
//! The base manifest is folded in first, then each bundle in list order. A
//! package already present in a class must carry the identical range string;
//! anything else is a conflict. Classes are merged independently.

use std::collections::BTreeMap;
use std::iter;

use serde_json::{Map, Value as JsonValue};

use super::ConflictRecord;
use crate::bundle::{Bundle, DependencyClass, DependencyManifest};
use crate::error::{self, Result, WeaveError};

/// Source label used for dependencies coming from the base manifest
pub const BASE_MANIFEST: &str = "base manifest";

/// package -> (version range, contributing source)
type ClassAccumulator<'a> = BTreeMap<&'a str, (&'a str, &'a str)>;

/// A version mismatch found while folding one class; not yet attributed to a source.
struct VersionClash<'a> {
    package: &'a str,
    first_version: &'a str,
    first_source: &'a str,
    incoming_version: &'a str,
}

impl VersionClash<'_> {
    fn attribute_to(self, source: &str) -> ConflictRecord {
        ConflictRecord {
            key: self.package.to_string(),
            first_owner: self.first_source.to_string(),
            first_value: self.first_version.to_string(),
            second_owner: source.to_string(),
            second_value: self.incoming_version.to_string(),
        }
    }
}

/// Read the dependency classes a base `package.json` already declares
pub fn manifest_dependencies(manifest: &Map<String, JsonValue>) -> Result<DependencyManifest> {
    let mut dependencies = DependencyManifest::default();

    for class in DependencyClass::ALL {
        let Some(value) = manifest.get(class.key()) else {
            continue;
        };
        let JsonValue::Object(packages) = value else {
            return Err(error::merge::invalid_manifest(
                class.key(),
                "expected an object of package names to version ranges",
            ));
        };

        for (package, version) in packages {
            let JsonValue::String(version) = version else {
                return Err(error::merge::invalid_manifest(
                    format!("{}.{}", class.key(), package),
                    "expected a version range string",
                ));
            };
            dependencies.insert(class, package.clone(), version.clone());
        }
    }

    Ok(dependencies)
}

/// Merge the base manifest's dependencies with every bundle's
pub fn merge_dependencies(
    base_manifest: &Map<String, JsonValue>,
    bundles: &[Bundle],
) -> Result<DependencyManifest> {
    let base = manifest_dependencies(base_manifest)?;
    let mut sources = iter::once((BASE_MANIFEST, &base)).chain(
        bundles
            .iter()
            .map(|bundle| (bundle.path.as_str(), &bundle.dependencies)),
    );

    let accumulators = sources.try_fold(
        DependencyClass::ALL.map(|_| ClassAccumulator::new()),
        |mut accumulators, (source, manifest)| {
            for (class, accumulator) in DependencyClass::ALL.iter().zip(accumulators.iter_mut()) {
                merge_class(accumulator, manifest.class(*class), source).map_err(|clash| {
                    error::merge::dependency_conflict(class.key(), clash.attribute_to(source))
                })?;
            }
            Ok::<_, WeaveError>(accumulators)
        },
    )?;

    let mut merged = DependencyManifest::default();
    for (class, accumulator) in DependencyClass::ALL.iter().zip(accumulators) {
        *merged.class_mut(*class) = accumulator
            .into_iter()
            .map(|(package, (version, _))| (package.to_string(), version.to_string()))
            .collect();
    }
    Ok(merged)
}

fn merge_class<'a>(
    accumulator: &mut ClassAccumulator<'a>,
    incoming: &'a BTreeMap<String, String>,
    source: &'a str,
) -> std::result::Result<(), VersionClash<'a>> {
    for (package, version) in incoming {
        if let Some(&(existing, first_source)) = accumulator.get(package.as_str()) {
            if existing != version.as_str() {
                return Err(VersionClash {
                    package,
                    first_version: existing,
                    first_source,
                    incoming_version: version,
                });
            }
            continue;
        }

        tracing::debug!(source, package = %package, version = %version, "adding dependency");
        accumulator.insert(package.as_str(), (version.as_str(), source));
    }
    Ok(())
}

/// The base manifest with its dependency classes replaced by `merged`.
///
/// A class is written when the base manifest already had it or the merged class
/// is non-empty; every other field passes through untouched.
pub fn inject_dependencies(
    base_manifest: &Map<String, JsonValue>,
    merged: &DependencyManifest,
) -> Map<String, JsonValue> {
    let mut manifest = base_manifest.clone();

    for class in DependencyClass::ALL {
        let packages = merged.class(class);
        if packages.is_empty() && !manifest.contains_key(class.key()) {
            continue;
        }
        let packages = packages
            .iter()
            .map(|(package, version)| (package.clone(), JsonValue::String(version.clone())))
            .collect();
        manifest.insert(class.key().to_string(), JsonValue::Object(packages));
    }

    manifest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeaveError;
    use serde_json::json;

    fn object(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("Expected a JSON object"),
        }
    }

    #[test]
    fn test_identical_range_merges_to_one_entry() {
        let base = object(json!({"dependencies": {"lodash": "^4.0.0"}}));
        let bundles = vec![Bundle::new("bundles/a").with_dependency(
            DependencyClass::Dependencies,
            "lodash",
            "^4.0.0",
        )];

        let merged = merge_dependencies(&base, &bundles).unwrap();
        assert_eq!(merged.dependencies.len(), 1);
        assert_eq!(merged.dependencies["lodash"], "^4.0.0");
    }

    #[test]
    fn test_conflict_names_bundle_and_both_versions() {
        let base = object(json!({"dependencies": {"lodash": "^4.0.0"}}));
        let bundles = vec![
            Bundle::new("bundles/a").with_dependency(
                DependencyClass::Dependencies,
                "lodash",
                "^4.0.0",
            ),
            Bundle::new("bundles/b").with_dependency(
                DependencyClass::Dependencies,
                "lodash",
                "^3.0.0",
            ),
        ];

        match merge_dependencies(&base, &bundles) {
            Err(WeaveError::DependencyConflict {
                class,
                package,
                first_source,
                first_version,
                second_source,
                second_version,
            }) => {
                assert_eq!(class, "dependencies");
                assert_eq!(package, "lodash");
                assert_eq!(first_source, BASE_MANIFEST);
                assert_eq!(first_version, "^4.0.0");
                assert_eq!(second_source, "bundles/b");
                assert_eq!(second_version, "^3.0.0");
            }
            other => panic!("Expected DependencyConflict, got {other:?}"),
        }
    }

    #[test]
    fn test_conflict_between_bundles_blames_both() {
        let bundles = vec![
            Bundle::new("bundles/a").with_dependency(
                DependencyClass::DevDependencies,
                "sass",
                "^1.70.0",
            ),
            Bundle::new("bundles/b").with_dependency(
                DependencyClass::DevDependencies,
                "sass",
                "^1.60.0",
            ),
        ];

        let err = merge_dependencies(&Map::new(), &bundles).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("devDependencies"));
        assert!(message.contains("bundles/a"));
        assert!(message.contains("bundles/b"));
    }

    #[test]
    fn test_classes_are_independent() {
        let bundles = vec![
            Bundle::new("bundles/a").with_dependency(
                DependencyClass::Dependencies,
                "react",
                "^18.0.0",
            ),
            Bundle::new("bundles/b").with_dependency(
                DependencyClass::PeerDependencies,
                "react",
                "^17.0.0",
            ),
        ];

        let merged = merge_dependencies(&Map::new(), &bundles).unwrap();
        assert_eq!(merged.dependencies["react"], "^18.0.0");
        assert_eq!(merged.peer_dependencies["react"], "^17.0.0");
    }

    #[test]
    fn test_base_manifest_must_hold_strings() {
        let base = object(json!({"devDependencies": {"webpack": 5}}));
        match merge_dependencies(&base, &[]) {
            Err(WeaveError::InvalidManifest { field, .. }) => {
                assert_eq!(field, "devDependencies.webpack");
            }
            other => panic!("Expected InvalidManifest, got {other:?}"),
        }
    }

    #[test]
    fn test_base_manifest_class_must_be_object() {
        let base = object(json!({"dependencies": ["lodash"]}));
        assert!(matches!(
            merge_dependencies(&base, &[]),
            Err(WeaveError::InvalidManifest { .. })
        ));
    }

    #[test]
    fn test_inject_keeps_other_fields() {
        let base = object(json!({
            "name": "assets",
            "scripts": {"build": "webpack"},
            "dependencies": {"lodash": "^4.0.0"}
        }));
        let mut merged = DependencyManifest::default();
        merged.insert(DependencyClass::Dependencies, "lodash", "^4.0.0");
        merged.insert(DependencyClass::Dependencies, "jquery", "^3.7.0");

        let manifest = inject_dependencies(&base, &merged);
        assert_eq!(manifest["name"], "assets");
        assert_eq!(manifest["scripts"]["build"], "webpack");
        assert_eq!(
            manifest["dependencies"],
            json!({"jquery": "^3.7.0", "lodash": "^4.0.0"})
        );
        assert!(!manifest.contains_key("devDependencies"));
        assert!(!manifest.contains_key("peerDependencies"));
    }

    #[test]
    fn test_inject_with_nothing_merged_is_identity() {
        let base = object(json!({
            "name": "assets",
            "devDependencies": {"webpack": "^5.0.0"},
            "peerDependencies": {}
        }));
        let merged = merge_dependencies(&base, &[]).unwrap();
        assert_eq!(inject_dependencies(&base, &merged), base);
    }
}

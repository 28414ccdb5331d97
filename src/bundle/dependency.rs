//! npm dependency manifest contributed by a bundle

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The three dependency classes of a `package.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyClass {
    Dependencies,
    DevDependencies,
    PeerDependencies,
}

impl DependencyClass {
    pub const ALL: [DependencyClass; 3] = [
        DependencyClass::Dependencies,
        DependencyClass::DevDependencies,
        DependencyClass::PeerDependencies,
    ];

    /// Key of this class in `package.json`
    pub fn key(self) -> &'static str {
        match self {
            DependencyClass::Dependencies => "dependencies",
            DependencyClass::DevDependencies => "devDependencies",
            DependencyClass::PeerDependencies => "peerDependencies",
        }
    }
}

impl fmt::Display for DependencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Package name to version range, per dependency class.
///
/// Version ranges are opaque strings; two ranges agree only when they are
/// byte-for-byte equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
}

impl DependencyManifest {
    pub fn class(&self, class: DependencyClass) -> &BTreeMap<String, String> {
        match class {
            DependencyClass::Dependencies => &self.dependencies,
            DependencyClass::DevDependencies => &self.dev_dependencies,
            DependencyClass::PeerDependencies => &self.peer_dependencies,
        }
    }

    pub fn class_mut(&mut self, class: DependencyClass) -> &mut BTreeMap<String, String> {
        match class {
            DependencyClass::Dependencies => &mut self.dependencies,
            DependencyClass::DevDependencies => &mut self.dev_dependencies,
            DependencyClass::PeerDependencies => &mut self.peer_dependencies,
        }
    }

    /// Add a package to one class, replacing any previous range
    pub fn insert(
        &mut self,
        class: DependencyClass,
        package: impl Into<String>,
        version: impl Into<String>,
    ) {
        self.class_mut(class).insert(package.into(), version.into());
    }

    pub fn is_empty(&self) -> bool {
        DependencyClass::ALL
            .iter()
            .all(|class| self.class(*class).is_empty())
    }
}

//! Common test utilities for packweave integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A project directory with a template and bundles, for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a workspace with a template holding `package.json`
    pub fn with_template(package_json: &str) -> Self {
        let workspace = Self::new();
        workspace.write_file("template/package.json", package_json);
        workspace.write_file("template/webpack.config.js", "module.exports = {};\n");
        workspace
    }

    /// Create a bundle directory with the given `bundle.yaml`
    pub fn create_bundle(&self, name: &str, bundle_yaml: &str) -> PathBuf {
        let bundle_path = self.path.join("bundles").join(name);
        std::fs::create_dir_all(&bundle_path).expect("Failed to create bundle directory");
        std::fs::write(bundle_path.join("bundle.yaml"), bundle_yaml)
            .expect("Failed to write bundle.yaml");
        bundle_path
    }

    /// Write `packweave.yaml` at the workspace root
    pub fn write_config(&self, yaml: &str) {
        self.write_file("packweave.yaml", yaml);
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Read and parse a JSON file from workspace
    pub fn read_json(&self, path: &str) -> serde_json::Value {
        serde_json::from_str(&self.read_file(path)).expect("Failed to parse JSON")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Get path to packweave binary
    pub fn packweave_bin() -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_packweave"))
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_creation() {
        let workspace = TestWorkspace::new();
        assert!(workspace.path.exists());
    }

    #[test]
    fn test_workspace_file_operations() {
        let workspace = TestWorkspace::new();
        workspace.write_file("test/file.txt", "hello");
        assert!(workspace.file_exists("test/file.txt"));
        assert_eq!(workspace.read_file("test/file.txt"), "hello");
    }

    #[test]
    fn test_workspace_bundle() {
        let workspace = TestWorkspace::new();
        workspace.create_bundle("theme", "entry: {}\n");
        assert!(workspace.file_exists("bundles/theme/bundle.yaml"));
    }
}

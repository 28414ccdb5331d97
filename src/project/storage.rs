//! Copying template and bundle files into the project directory

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use blake3::Hasher;
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::WalkDir;

use crate::bundle::BUNDLE_FILE;
use crate::error::{self, Result};
use crate::path_utils::to_forward_slashes;

/// What a [`FileStorage::run`] did with each file it saw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectReport {
    pub copied: usize,
    pub unchanged: usize,
    pub skipped: usize,
}

impl CollectReport {
    pub fn total(&self) -> usize {
        self.copied + self.unchanged + self.skipped
    }
}

impl std::ops::AddAssign for CollectReport {
    fn add_assign(&mut self, other: Self) {
        self.copied += other.copied;
        self.unchanged += other.unchanged;
        self.skipped += other.skipped;
    }
}

/// Mirrors the files of `src` into `dst`
#[derive(Debug, Clone)]
pub struct FileStorage {
    src: PathBuf,
    dst: PathBuf,
}

impl FileStorage {
    pub fn new(src: impl Into<PathBuf>, dst: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// Copy every file under `src` to the same relative path under `dst`.
    ///
    /// Files whose path relative to `src` matches a `skip` glob are left
    /// alone, as is a bundle descriptor at the top of `src`. Without `force`,
    /// a file is only copied when the target is missing or its content differs.
    pub fn run(&self, force: bool, skip: &[&str]) -> Result<CollectReport> {
        let skip = build_skip_set(skip)?;
        let mut report = CollectReport::default();

        if !self.src.is_dir() {
            return Err(error::fs::read_failed(&self.src, "not a directory"));
        }
        fs::create_dir_all(&self.dst).map_err(|e| error::fs::write_failed(&self.dst, e))?;

        for entry in WalkDir::new(&self.src).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| error::fs::io_error(e.to_string()))?;
            let relative = entry
                .path()
                .strip_prefix(&self.src)
                .map_err(|e| error::fs::io_error(e.to_string()))?;
            let target = self.dst.join(relative);

            if entry.file_type().is_dir() {
                fs::create_dir_all(&target).map_err(|e| error::fs::write_failed(&target, e))?;
                continue;
            }

            if relative == Path::new(BUNDLE_FILE) || skip.is_match(to_forward_slashes(relative)) {
                tracing::debug!(file = %relative.display(), "skipping");
                report.skipped += 1;
                continue;
            }

            if !force && target.is_file() && same_content(entry.path(), &target)? {
                report.unchanged += 1;
                continue;
            }

            fs::copy(entry.path(), &target).map_err(|e| error::fs::write_failed(&target, e))?;
            tracing::debug!(file = %relative.display(), "copied");
            report.copied += 1;
        }

        tracing::info!(
            src = %self.src.display(),
            dst = %self.dst.display(),
            copied = report.copied,
            unchanged = report.unchanged,
            skipped = report.skipped,
            "collected files"
        );
        Ok(report)
    }
}

fn build_skip_set(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| error::config::invalid_glob(pattern, e))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| error::config::invalid_glob(&patterns.join(", "), e))
}

fn hash_file(path: &Path) -> Result<blake3::Hash> {
    let mut file = File::open(path).map_err(|e| error::fs::read_failed(path, e))?;
    let mut hasher = Hasher::new();
    io::copy(&mut file, &mut hasher).map_err(|e| error::fs::read_failed(path, e))?;
    Ok(hasher.finalize())
}

fn same_content(a: &Path, b: &Path) -> Result<bool> {
    let (a_meta, b_meta) = (
        fs::metadata(a).map_err(|e| error::fs::read_failed(a, e))?,
        fs::metadata(b).map_err(|e| error::fs::read_failed(b, e))?,
    );
    if a_meta.len() != b_meta.len() {
        return Ok(false);
    }
    Ok(hash_file(a)? == hash_file(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_copies_tree() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write(src.path(), "package.json", "{}");
        write(src.path(), "js/theme/index.js", "export default 1;");

        let report = FileStorage::new(src.path(), dst.path().join("out"))
            .run(false, &[])
            .unwrap();

        assert_eq!(report.copied, 2);
        assert_eq!(
            fs::read_to_string(dst.path().join("out/js/theme/index.js")).unwrap(),
            "export default 1;"
        );
    }

    #[test]
    fn test_unchanged_files_are_not_copied_again() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write(src.path(), "a.js", "a");
        write(src.path(), "b.js", "b");
        let storage = FileStorage::new(src.path(), dst.path());

        storage.run(false, &[]).unwrap();
        write(src.path(), "b.js", "changed");

        let report = storage.run(false, &[]).unwrap();
        assert_eq!(report.copied, 1);
        assert_eq!(report.unchanged, 1);
        assert_eq!(fs::read_to_string(dst.path().join("b.js")).unwrap(), "changed");
    }

    #[test]
    fn test_force_copies_everything() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write(src.path(), "a.js", "a");
        let storage = FileStorage::new(src.path(), dst.path());

        storage.run(false, &[]).unwrap();
        let report = storage.run(true, &[]).unwrap();
        assert_eq!(report.copied, 1);
        assert_eq!(report.unchanged, 0);
    }

    #[test]
    fn test_skip_patterns_and_bundle_descriptor() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        write(src.path(), BUNDLE_FILE, "entry: {}");
        write(src.path(), "package.json", "{}");
        write(src.path(), "maps/app.js.map", "");
        write(src.path(), "app.js", "");

        let report = FileStorage::new(src.path(), dst.path())
            .run(false, &["package.json", "**/*.map"])
            .unwrap();

        assert_eq!(report.copied, 1);
        assert_eq!(report.skipped, 3);
        assert_eq!(report.total(), 4);
        assert!(!dst.path().join(BUNDLE_FILE).exists());
        assert!(!dst.path().join("package.json").exists());
        assert!(!dst.path().join("maps/app.js.map").exists());
        assert!(dst.path().join("app.js").exists());
    }

    #[test]
    fn test_invalid_skip_pattern() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        assert!(
            FileStorage::new(src.path(), dst.path())
                .run(false, &["a[b"])
                .is_err()
        );
    }

    #[test]
    fn test_missing_source() {
        let dst = TempDir::new().unwrap();
        let result = FileStorage::new(dst.path().join("missing"), dst.path()).run(false, &[]);
        assert!(result.is_err());
    }
}

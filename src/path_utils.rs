//! Path arithmetic for copy sandboxing
//!
//! Everything here is lexical: paths are normalized segment by segment and
//! containment is a prefix test on those segments. Symlinks are never
//! resolved. The only filesystem access is the advisory file probe in
//! [`dir_part`].

use std::path::{Component, Path, PathBuf};

/// Lexically normalize a path.
///
/// `.` segments are dropped and `..` removes the preceding normal segment.
/// A `..` directly under the root stays at the root; leading `..` segments of a
/// relative path are kept. An empty result becomes `.`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use packweave::path_utils::normalize;
///
/// assert_eq!(normalize(Path::new("/proj/static/../../etc")), PathBuf::from("/etc"));
/// assert_eq!(normalize(Path::new("a/./b/../c")), PathBuf::from("a/c"));
/// ```
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    normalized.pop();
                    depth -= 1;
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            Component::Normal(segment) => {
                normalized.push(segment);
                depth += 1;
            }
        }
    }

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

/// Resolve `path` against `base_dir`.
///
/// Absolute paths are kept (normalized); relative ones are joined onto
/// `base_dir` first.
pub fn resolve(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base_dir.join(path))
    }
}

/// Directory part of a path: the path itself for a directory, its parent for a file.
///
/// An existing path is a file if the filesystem says so. A path that does not
/// exist is taken to be a file only when its last segment has an extension.
pub fn dir_part(path: &Path) -> PathBuf {
    let is_file = match std::fs::metadata(path) {
        Ok(meta) => meta.is_file(),
        Err(_) => path.extension().is_some(),
    };

    if !is_file {
        return path.to_path_buf();
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// True if `path` equals `root` or lies below it, compared on normalized segments.
///
/// A root of `.` contains every relative path that does not climb out with `..`.
///
/// ```
/// use std::path::Path;
/// use packweave::path_utils::is_contained_in;
///
/// assert!(is_contained_in(Path::new("static/img"), Path::new(".")));
/// assert!(!is_contained_in(Path::new("../etc"), Path::new(".")));
/// ```
pub fn is_contained_in(path: &Path, root: &Path) -> bool {
    let (path, root) = (normalize(path), normalize(root));
    let (path, root) = (segments(&path), segments(&root));

    if root.is_empty() {
        return !matches!(
            path.first(),
            Some(Component::ParentDir | Component::RootDir | Component::Prefix(_))
        );
    }
    path.starts_with(&root)
}

/// Components of a normalized path without the `.` placeholder
fn segments(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

/// Convert a path to a string with forward slashes, for messages and JSON.
///
/// ```
/// use std::path::Path;
/// use packweave::path_utils::to_forward_slashes;
///
/// assert_eq!(to_forward_slashes(Path::new("C:\\Users\\file.txt")), "C:/Users/file.txt");
/// ```
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

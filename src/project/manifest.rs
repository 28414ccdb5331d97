//! JSON output for `package.json` and the webpack config

use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value as JsonValue};
use tempfile::NamedTempFile;

use crate::error::{self, Result};

/// Write `value` as pretty-printed JSON, replacing `path` atomically.
///
/// Keys come out sorted and the file ends with a newline. Missing parent
/// directories are created.
pub fn write_json(path: &Path, value: &Map<String, JsonValue>) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| error::fs::write_failed(parent, e))?;

    let mut content =
        serde_json::to_string_pretty(value).map_err(|e| error::fs::write_failed(path, e))?;
    content.push('\n');

    let mut file = NamedTempFile::new_in(parent).map_err(|e| error::fs::write_failed(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| error::fs::write_failed(path, e))?;
    file.persist(path)
        .map_err(|e| error::fs::write_failed(path, e.error))?;

    tracing::debug!(path = %path.display(), "wrote JSON");
    Ok(())
}

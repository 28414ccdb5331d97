//! Error types and handling for packweave
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`merge`]: Entry, alias and dependency conflicts
//! - [`copy`]: Copy instruction validation errors
//! - [`config`]: Project configuration and bundle descriptor errors
//! - [`fs`]: File system errors
//! - [`npm`]: Package tool (npm/yarn) errors

pub mod config;
pub mod copy;
pub mod fs;
pub mod merge;
pub mod npm;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for packweave operations
#[derive(Error, Diagnostic, Debug)]
pub enum WeaveError {
    // Merge errors
    #[error(
        "Duplicated bundle entry for `{name}:{first_path}` in bundle `{first_bundle}` and \
         `{name}:{second_path}` in bundle `{second_bundle}`"
    )]
    #[diagnostic(
        code(packweave::merge::duplicate_entry),
        help("Please choose another entry name in one of the bundles")
    )]
    DuplicateEntry {
        name: String,
        first_bundle: String,
        first_path: String,
        second_bundle: String,
        second_path: String,
    },

    #[error(
        "Duplicated alias for `{alias}:{first_path}` in bundle `{first_bundle}` and \
         `{alias}:{second_path}` in bundle `{second_bundle}`"
    )]
    #[diagnostic(
        code(packweave::merge::duplicate_alias),
        help("Please choose another alias name in one of the bundles")
    )]
    DuplicateAlias {
        alias: String,
        first_bundle: String,
        first_path: String,
        second_bundle: String,
        second_path: String,
    },

    #[error(
        "Conflicting {class} version for `{package}`: `{first_version}` from {first_source} and \
         `{second_version}` from {second_source}"
    )]
    #[diagnostic(
        code(packweave::merge::dependency_conflict),
        help("Align the version range in both places; ranges are compared as plain strings")
    )]
    DependencyConflict {
        class: String,
        package: String,
        first_source: String,
        first_version: String,
        second_source: String,
        second_version: String,
    },

    #[error("Invalid package manifest field `{field}`: {reason}")]
    #[diagnostic(code(packweave::merge::invalid_manifest))]
    InvalidManifest { field: String, reason: String },

    // Copy instruction errors
    #[error("Invalid copy instruction {instruction} in bundle `{bundle}`")]
    #[diagnostic(
        code(packweave::copy::malformed),
        help("A copy instruction requires exactly the 'from' and 'to' keys")
    )]
    MalformedCopyInstruction { bundle: String, instruction: String },

    #[error(
        "Copy instruction {instruction} in bundle `{bundle}` is out of bounds \
         ({{'from': '{from_dir}', 'to': '{to_dir}'}}). Allowed paths: [{allowed}]"
    )]
    #[diagnostic(
        code(packweave::copy::sandbox_violation),
        help("Keep copy sources and destinations inside one of the allowed copy paths")
    )]
    SandboxViolation {
        bundle: String,
        instruction: String,
        from_dir: String,
        to_dir: String,
        allowed: String,
    },

    // Bundle errors
    #[error("Bundle descriptor not found: {path}")]
    #[diagnostic(
        code(packweave::bundle::not_found),
        help("Each bundle directory needs a bundle.yaml file, or declare the bundle inline")
    )]
    BundleNotFound { path: String },

    #[error("Failed to parse bundle descriptor: {path}: {reason}")]
    #[diagnostic(code(packweave::bundle::parse_failed))]
    BundleParseFailed { path: String, reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(packweave::config::not_found),
        help("Create a packweave.yaml or pass its location with --config")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(packweave::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(packweave::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Pipeline has no {stage} stage configured")]
    #[diagnostic(code(packweave::config::stage_missing))]
    StageNotConfigured { stage: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(packweave::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(packweave::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(packweave::fs::io_error))]
    IoError { message: String },

    // Package tool errors
    #[error("Invalid NPM script: {name}")]
    #[diagnostic(
        code(packweave::npm::invalid_script),
        help("Scripts defined in package.json: {available}")
    )]
    InvalidScript { name: String, available: String },

    #[error("`{program} {args}` exited with {status}")]
    #[diagnostic(code(packweave::npm::command_failed))]
    CommandFailed {
        program: String,
        args: String,
        status: String,
    },

    #[error("Failed to start `{program}`: {reason}")]
    #[diagnostic(
        code(packweave::npm::spawn_failed),
        help("Check that the package tool is installed and on PATH")
    )]
    CommandSpawnFailed { program: String, reason: String },
}

impl From<std::io::Error> for WeaveError {
    fn from(err: std::io::Error) -> Self {
        WeaveError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for WeaveError {
    fn from(err: serde_yaml::Error) -> Self {
        WeaveError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for WeaveError {
    fn from(err: serde_json::Error) -> Self {
        WeaveError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for WeaveError {
    fn from(err: inquire::InquireError) -> Self {
        WeaveError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, WeaveError>;

#[cfg(test)]
mod tests;

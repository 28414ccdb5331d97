//! Merge conflict errors

use super::WeaveError;
use crate::merge::ConflictRecord;

/// Creates a duplicate entry error from a keyed conflict
pub fn duplicate_entry(conflict: ConflictRecord) -> WeaveError {
    WeaveError::DuplicateEntry {
        name: conflict.key,
        first_bundle: conflict.first_owner,
        first_path: conflict.first_value,
        second_bundle: conflict.second_owner,
        second_path: conflict.second_value,
    }
}

/// Creates a duplicate alias error from a keyed conflict
pub fn duplicate_alias(conflict: ConflictRecord) -> WeaveError {
    WeaveError::DuplicateAlias {
        alias: conflict.key,
        first_bundle: conflict.first_owner,
        first_path: conflict.first_value,
        second_bundle: conflict.second_owner,
        second_path: conflict.second_value,
    }
}

/// Creates a dependency conflict error for one dependency class
pub fn dependency_conflict(class: impl Into<String>, conflict: ConflictRecord) -> WeaveError {
    WeaveError::DependencyConflict {
        class: class.into(),
        package: conflict.key,
        first_source: conflict.first_owner,
        first_version: conflict.first_value,
        second_source: conflict.second_owner,
        second_version: conflict.second_value,
    }
}

/// Creates an invalid package manifest error
pub fn invalid_manifest(field: impl Into<String>, reason: impl Into<String>) -> WeaveError {
    WeaveError::InvalidManifest {
        field: field.into(),
        reason: reason.into(),
    }
}

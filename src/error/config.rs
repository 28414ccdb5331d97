//! Configuration and bundle descriptor errors

use std::path::Path;

use super::WeaveError;

/// Creates a config not found error
pub fn not_found(path: &Path) -> WeaveError {
    WeaveError::ConfigNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: &Path, reason: impl ToString) -> WeaveError {
    WeaveError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> WeaveError {
    WeaveError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a bundle descriptor not found error
pub fn bundle_not_found(path: &Path) -> WeaveError {
    WeaveError::BundleNotFound {
        path: path.display().to_string(),
    }
}

/// Creates a bundle descriptor parse failed error
pub fn bundle_parse_failed(path: &Path, reason: impl ToString) -> WeaveError {
    WeaveError::BundleParseFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an error for a pipeline operation whose stage is absent
pub fn stage_missing(stage: impl Into<String>) -> WeaveError {
    WeaveError::StageNotConfigured {
        stage: stage.into(),
    }
}

/// Creates an error for a skip pattern that is not a valid glob
pub fn invalid_glob(pattern: &str, reason: impl ToString) -> WeaveError {
    WeaveError::ConfigInvalid {
        message: format!("invalid skip pattern '{}': {}", pattern, reason.to_string()),
    }
}

//! File system errors

use std::path::Path;

use super::WeaveError;

/// Creates a file read failed error
pub fn read_failed(path: &Path, err: impl ToString) -> WeaveError {
    WeaveError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: &Path, err: impl ToString) -> WeaveError {
    WeaveError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> WeaveError {
    WeaveError::IoError {
        message: message.into(),
    }
}

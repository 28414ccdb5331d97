//! Copy instruction errors

use std::path::{Path, PathBuf};

use super::WeaveError;
use crate::path_utils::to_forward_slashes;

/// Creates a malformed copy instruction error
pub fn malformed(bundle: impl Into<String>, instruction: impl Into<String>) -> WeaveError {
    WeaveError::MalformedCopyInstruction {
        bundle: bundle.into(),
        instruction: instruction.into(),
    }
}

/// Creates a sandbox violation error naming both resolved directories and the allowed roots
pub fn sandbox_violation(
    bundle: impl Into<String>,
    instruction: impl Into<String>,
    from_dir: &Path,
    to_dir: &Path,
    allowed: &[PathBuf],
) -> WeaveError {
    let allowed = allowed
        .iter()
        .map(|root| format!("'{}'", to_forward_slashes(root)))
        .collect::<Vec<_>>()
        .join(", ");

    WeaveError::SandboxViolation {
        bundle: bundle.into(),
        instruction: instruction.into(),
        from_dir: to_forward_slashes(from_dir),
        to_dir: to_forward_slashes(to_dir),
        allowed,
    }
}

//! Copy instruction validation and sandboxing

use std::path::{Path, PathBuf};

use crate::bundle::{Bundle, CopyInstruction};
use crate::error::{self, Result};
use crate::path_utils::{dir_part, is_contained_in, resolve};

/// Filesystem roots that copy instructions must stay within.
///
/// An empty root set places no restriction on copy instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SandboxConfig {
    roots: Vec<PathBuf>,
}

impl SandboxConfig {
    /// A sandbox that accepts every instruction
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Build a sandbox, resolving relative roots against `base_dir`
    pub fn new<I, P>(roots: I, base_dir: &Path) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            roots: roots
                .into_iter()
                .map(|root| resolve(root.as_ref(), base_dir))
                .collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn is_unrestricted(&self) -> bool {
        self.roots.is_empty()
    }

    /// True if `dir` lies within at least one root
    pub fn allows(&self, dir: &Path) -> bool {
        self.is_unrestricted() || self.roots.iter().any(|root| is_contained_in(dir, root))
    }
}

/// Validate every bundle's copy instructions, in bundle then declaration order.
///
/// Paths are resolved against `base_dir` only to check them; the returned
/// list holds the instructions exactly as the bundles declared them.
pub fn validate_copies(
    bundles: &[Bundle],
    base_dir: &Path,
    sandbox: &SandboxConfig,
) -> Result<Vec<CopyInstruction>> {
    bundles.iter().try_fold(Vec::new(), |mut accepted, bundle| {
        for instruction in &bundle.copy {
            validate_instruction(bundle, instruction, base_dir, sandbox)?;
            accepted.push(instruction.clone());
        }
        Ok(accepted)
    })
}

fn validate_instruction(
    bundle: &Bundle,
    instruction: &CopyInstruction,
    base_dir: &Path,
    sandbox: &SandboxConfig,
) -> Result<()> {
    let (from, to) = match (instruction.from_path(), instruction.to_path()) {
        (Some(from), Some(to)) if instruction.is_well_formed() => (from, to),
        _ => return Err(error::copy::malformed(&bundle.path, instruction.to_string())),
    };

    let from_dir = dir_part(&resolve(Path::new(from), base_dir));
    let to_dir = dir_part(&resolve(Path::new(to), base_dir));

    if !sandbox.allows(&from_dir) || !sandbox.allows(&to_dir) {
        return Err(error::copy::sandbox_violation(
            &bundle.path,
            instruction.to_string(),
            &from_dir,
            &to_dir,
            sandbox.roots(),
        ));
    }

    tracing::debug!(
        bundle = %bundle.path,
        from = %from_dir.display(),
        to = %to_dir.display(),
        "accepted copy instruction"
    );
    Ok(())
}

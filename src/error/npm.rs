//! Package tool errors

use std::process::ExitStatus;

use super::WeaveError;

/// Creates an error for a script that `package.json` does not define
pub fn invalid_script<'a>(
    name: impl Into<String>,
    available: impl IntoIterator<Item = &'a String>,
) -> WeaveError {
    let available = available
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    WeaveError::InvalidScript {
        name: name.into(),
        available: if available.is_empty() {
            "(none)".to_string()
        } else {
            available
        },
    }
}

/// Creates an error for a package tool that exited unsuccessfully
pub fn command_failed(program: &str, args: &[String], status: ExitStatus) -> WeaveError {
    WeaveError::CommandFailed {
        program: program.to_string(),
        args: args.join(" "),
        status: status.to_string(),
    }
}

/// Creates an error for a package tool that could not be started
pub fn spawn_failed(program: &str, err: std::io::Error) -> WeaveError {
    WeaveError::CommandSpawnFailed {
        program: program.to_string(),
        reason: err.to_string(),
    }
}

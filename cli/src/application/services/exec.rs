//! Helpers turning a nonzero exit into a fatal [`ActionError::CommandFailed`].

use std::path::Path;
use std::process::Output;

use anyhow::Result;

use crate::application::ports::CommandRunner;
use crate::domain::ActionError;

/// Run `program` in the working directory and fail on a nonzero exit.
///
/// # Errors
///
/// Returns an error if the process cannot be spawned or exits unsuccessfully.
pub async fn checked(runner: &impl CommandRunner, program: &str, args: &[&str]) -> Result<Output> {
    let output = runner.run(program, args).await?;
    ensure_success(&command_line(program, args), output)
}

/// Run `program` in `dir` and fail on a nonzero exit.
///
/// # Errors
///
/// Returns an error if the process cannot be spawned or exits unsuccessfully.
pub async fn checked_in(
    runner: &impl CommandRunner,
    dir: &Path,
    program: &str,
    args: &[&str],
) -> Result<Output> {
    let output = runner.run_in(dir, program, args).await?;
    ensure_success(&command_line(program, args), output)
}

/// Pass `output` through if it succeeded. `shown` is the command as it may
/// appear in the error message.
///
/// # Errors
///
/// Returns [`ActionError::CommandFailed`] if the exit status is not success.
pub fn ensure_success(shown: &str, output: Output) -> Result<Output> {
    if output.status.success() {
        return Ok(output);
    }
    Err(ActionError::CommandFailed {
        command: shown.to_string(),
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    }
    .into())
}

/// Space-joined command line for messages.
#[must_use]
pub fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

//! Host key fetch for the pinned known-hosts file.

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::application::services::exec::checked;

/// Run `ssh-keyscan -t rsa <host>` and return its stdout.
///
/// keyscan always chatters on stderr; that output is reported as a warning
/// and never treated as failure.
///
/// # Errors
///
/// Returns an error if `ssh-keyscan` cannot be run or exits unsuccessfully.
pub async fn fetch_host_keys(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    host: &str,
) -> Result<String> {
    let output = checked(runner, "ssh-keyscan", &["-t", "rsa", host]).await?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        reporter.warn(&format!("Stderr from ssh-keyscan: {}", stderr.trim()));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

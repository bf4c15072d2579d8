//! Merge of npm config text into a project-scope config file.
//!
//! Entries go through `npm config set --location project` so npm owns the file
//! format. Each key is deleted first: npm appends rather than replaces some
//! list-like keys, and the delete makes repeated runs idempotent.
//!
//! Project scope always means `<dir>/.npmrc`, so any other file name can only
//! take the `always-auth` lines appended directly.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::application::services::exec::{command_line, ensure_success};
use crate::domain::{ActionError, StepOutcome};
use crate::domain::npmrc::{self, NpmrcEntry};

/// The file `npm config --location project` reads and writes.
const PROJECT_CONFIG_NAME: &str = ".npmrc";

/// Apply every entry in `content` to the config file at `file`.
///
/// Absent or blank content is a no-op. `always-auth` keys are appended to the
/// file verbatim because `npm config set` refuses them.
///
/// # Errors
///
/// Returns [`ActionError::UnsupportedConfigFile`] before touching anything if
/// `file` is not named `.npmrc` but `content` needs `npm config set`, and an
/// error if `npm config set` fails or the file cannot be appended.
pub async fn merge_config(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    file: &Path,
    content: Option<&str>,
) -> Result<StepOutcome> {
    let Some(content) = content.filter(|c| !c.trim().is_empty()) else {
        return Ok(StepOutcome::skipped("No npm config provided"));
    };
    let dir = config_dir(file);
    if !fs.exists(&dir) {
        return Ok(StepOutcome::skipped(format!(
            "Config directory {} does not exist",
            dir.display()
        )));
    }

    let entries = npmrc::parse(content);
    if entries.iter().any(|e| !e.is_always_auth()) && !is_project_config(file) {
        return Err(ActionError::UnsupportedConfigFile {
            path: file.display().to_string(),
        }
        .into());
    }

    for entry in entries {
        if entry.is_always_auth() {
            reporter.warn(&format!(
                "npm config set does not support '{}'; appending it to {} directly",
                entry.key,
                file.display()
            ));
            fs.append(file, &format!("{}\n", entry.to_line()))?;
        } else {
            set_entry(runner, reporter, &dir, &entry).await?;
        }
    }
    Ok(StepOutcome::Done)
}

async fn set_entry(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    dir: &Path,
    entry: &NpmrcEntry,
) -> Result<()> {
    reporter.step(&format!("Setting npm config {}", entry.key));
    let key = entry.key.as_str();

    // The key may not exist yet; any failure here is expected.
    let delete_args = ["config", "delete", "--location", "project", key];
    match runner.run_in(dir, "npm", &delete_args).await {
        Ok(out) if !out.status.success() => {
            tracing::debug!(key, status = %out.status, "npm config delete failed; ignoring");
        }
        Err(e) => tracing::debug!(key, error = %e, "npm config delete did not run; ignoring"),
        Ok(_) => {}
    }

    let set_args = ["config", "set", "--location", "project", key, entry.value.as_str()];
    let output = runner.run_in(dir, "npm", &set_args).await?;
    let shown = command_line("npm", &["config", "set", "--location", "project", key, "***"]);
    ensure_success(&shown, output)?;
    Ok(())
}

fn is_project_config(file: &Path) -> bool {
    file.file_name().is_some_and(|name| name == PROJECT_CONFIG_NAME)
}

/// Directory `npm config` must run in so project scope targets `file`.
fn config_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

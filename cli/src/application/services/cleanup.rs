//! Application service — credential cleanup use-case.
//!
//! Runs after the publish step whether or not it succeeded, possibly after a
//! setup that failed partway or never ran. "Not a repository", "no flag
//! recorded" and "file already gone" are ordinary branches here.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter, StateStore};
use crate::application::services::exec::{checked, command_line, ensure_success};
use crate::application::services::{Deps, SKIP_DEPLOY_KEY_STATE};
use crate::domain::git::{self, IDENTITY_EMAIL_KEY, IDENTITY_NAME_KEY, SSH_COMMAND_KEY};
use crate::domain::{Settings, StepOutcome};

/// `git config --unset` exit code for a key that is not set.
const GIT_CONFIG_KEY_MISSING: i32 = 5;

/// How `shred` treats the file after overwriting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shred {
    /// Overwrite and unlink.
    Remove,
    /// Overwrite, leave the path for git to restore.
    KeepPath,
    /// Overwrite and unlink a config file git never tracked.
    RemoveUntracked,
}

impl Shred {
    fn flags(self) -> &'static str {
        match self {
            Self::Remove => "-zuf",
            Self::KeepPath => "-zf",
            Self::RemoveUntracked => "-zfu",
        }
    }
}

/// Destroy secrets written by setup and restore repository state.
///
/// `config_excluded` is true when setup created the config file (it is not
/// tracked, so it is deleted rather than restored).
///
/// # Errors
///
/// Returns an error on the first failed `shred` or git command.
pub async fn cleanup_npm_publish<R, F, S, P>(
    deps: &Deps<'_, R, F, S, P>,
    settings: &Settings,
    config_path: &Path,
    config_excluded: bool,
) -> Result<()>
where
    R: CommandRunner,
    F: LocalFs,
    S: StateStore,
    P: ProgressReporter,
{
    // Absent flag means key setup happened (or may have): clean up everything.
    let key_setup_skipped = deps.state.get(SKIP_DEPLOY_KEY_STATE).as_deref() == Some("true");

    deps.reporter.step("Shredding files containing secrets");
    if !key_setup_skipped {
        for path in [settings.deploy_key_path(), settings.known_hosts_path()] {
            log_skip(deps.reporter, shred(deps, &path, Shred::Remove).await?);
        }
    }

    let in_repo = is_inside_work_tree(deps.runner).await;
    log_skip(
        deps.reporter,
        restore_config(deps, settings, config_path, config_excluded || !in_repo).await?,
    );

    if in_repo && !key_setup_skipped {
        deps.reporter.step("Unsetting git config");
        for key in [IDENTITY_EMAIL_KEY, IDENTITY_NAME_KEY, SSH_COMMAND_KEY] {
            log_skip(deps.reporter, unset_git_config(deps.runner, key).await?);
        }

        deps.reporter.step("Restoring git remote url");
        let origin = git::https_remote(&settings.repository);
        checked(deps.runner, "git", &["remote", "set-url", "origin", origin.as_str()]).await?;
    }

    deps.reporter.success("npm publish credentials removed");
    Ok(())
}

/// Whether the working directory is inside a git work tree.
///
/// Any failure, including git not being installed, means "no".
pub async fn is_inside_work_tree(runner: &impl CommandRunner) -> bool {
    match runner.run("git", &["rev-parse", "--is-inside-work-tree"]).await {
        Ok(out) => out.status.success() && String::from_utf8_lossy(&out.stdout).trim() == "true",
        Err(e) => {
            tracing::debug!(error = %e, "git work tree check did not run");
            false
        }
    }
}

/// Shred `path` if it exists.
async fn shred<R, F, S, P>(
    deps: &Deps<'_, R, F, S, P>,
    path: &Path,
    mode: Shred,
) -> Result<StepOutcome>
where
    R: CommandRunner,
    F: LocalFs,
{
    if !deps.fs.exists(path) {
        return Ok(StepOutcome::skipped(format!(
            "{} does not exist; nothing to shred",
            path.display()
        )));
    }
    let shown = path.to_string_lossy().into_owned();
    checked(deps.runner, "shred", &[mode.flags(), shown.as_str()]).await?;
    Ok(StepOutcome::Done)
}

/// Delete an untracked config file, or wipe a tracked one and check it out
/// again from the index.
async fn restore_config<R, F, S, P>(
    deps: &Deps<'_, R, F, S, P>,
    settings: &Settings,
    config_path: &Path,
    delete: bool,
) -> Result<StepOutcome>
where
    R: CommandRunner,
    F: LocalFs,
    P: ProgressReporter,
{
    let shown = config_path.to_string_lossy().into_owned();
    if !deps.fs.exists(&settings.resolve(config_path)) {
        return Ok(StepOutcome::skipped(format!(
            "{shown} does not exist; nothing to restore"
        )));
    }

    if delete {
        deps.reporter.step(&format!("Removing {shown}"));
        checked(
            deps.runner,
            "shred",
            &[Shred::RemoveUntracked.flags(), shown.as_str()],
        )
        .await?;
        return Ok(StepOutcome::Done);
    }

    deps.reporter.step(&format!("Restoring {shown} from the git index"));
    checked(deps.runner, "shred", &[Shred::KeepPath.flags(), shown.as_str()]).await?;
    checked(
        deps.runner,
        "git",
        &["update-index", "--no-assume-unchanged", shown.as_str()],
    )
    .await?;
    checked(deps.runner, "git", &["checkout", "--", shown.as_str()]).await?;
    Ok(StepOutcome::Done)
}

/// Unset a git config key; a key that is already unset is skipped.
async fn unset_git_config(runner: &impl CommandRunner, key: &str) -> Result<StepOutcome> {
    let args = ["config", "--unset", key];
    let output = runner.run("git", &args).await?;
    if output.status.code() == Some(GIT_CONFIG_KEY_MISSING) {
        return Ok(StepOutcome::skipped(format!("git config {key} was not set")));
    }
    ensure_success(&command_line("git", &args), output)?;
    Ok(StepOutcome::Done)
}

fn log_skip(reporter: &impl ProgressReporter, outcome: StepOutcome) {
    if let StepOutcome::Skipped(reason) = outcome {
        reporter.step(&reason);
    }
}

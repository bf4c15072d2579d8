//! Application service — credential setup use-case.
//!
//! Runs before the publish step. Everything cleanup needs to know about what
//! was done here is recorded in the [`StateStore`] before the first side
//! effect, so a partial failure still leaves cleanup enough to undo it.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter, StateStore};
use crate::application::services::exec::checked;
use crate::application::services::host_keys::fetch_host_keys;
use crate::application::services::npm_config::merge_config;
use crate::application::services::{Deps, NPMRC_EXCLUDED_STATE, SKIP_DEPLOY_KEY_STATE};
use crate::domain::git::{
    self, GITHUB_HOST, IDENTITY_EMAIL_KEY, IDENTITY_NAME_KEY, SSH_COMMAND_KEY,
};
use crate::domain::{CredentialBundle, Settings, StepOutcome, UNSAFE_PERM};

/// The project npm config file targeted by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    /// Path as supplied by the user, relative to the working directory.
    pub path: PathBuf,
    /// Whether the file was present before this run touched it.
    pub existed_before: bool,
}

impl ConfigFile {
    /// Describe `path`, checking `fs` for whether it already exists.
    pub fn detect(fs: &impl LocalFs, settings: &Settings, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let existed_before = fs.exists(&settings.resolve(&path));
        Self { path, existed_before }
    }
}

/// Provision npm config and, when a deploy key is supplied, SSH push access.
///
/// # Errors
///
/// Returns an error on the first failed command or file write; later steps
/// do not run.
pub async fn setup_npm_publish<R, F, S, P>(
    deps: &Deps<'_, R, F, S, P>,
    settings: &Settings,
    credentials: &CredentialBundle,
    config: &ConfigFile,
) -> Result<()>
where
    R: CommandRunner,
    F: LocalFs,
    S: StateStore,
    P: ProgressReporter,
{
    if credentials.deploy_key.is_none() {
        deps.state.set(SKIP_DEPLOY_KEY_STATE, "true")?;
    }
    if !config.existed_before {
        deps.state.set(NPMRC_EXCLUDED_STATE, "true")?;
    }

    let ssh_dir = settings.ssh_dir();
    deps.fs.create_dir_all(&ssh_dir)?;

    let config_file = settings.resolve(&config.path);
    if let StepOutcome::Skipped(reason) = write_config(deps, &config_file, credentials).await? {
        deps.reporter.step(&reason);
    }

    if let StepOutcome::Skipped(reason) = hide_config_changes(deps, settings, config).await? {
        deps.reporter.step(&reason);
    }

    match credentials.deploy_key.as_deref() {
        Some(key) => setup_git_push(deps, settings, credentials, key).await?,
        None => deps
            .reporter
            .step("Skipping git setup: GIT_DEPLOY_KEY not provided"),
    }

    deps.reporter.success("npm publish credentials ready");
    Ok(())
}

/// Merge the supplied config and append the baseline `unsafe-perm` entry.
async fn write_config<R, F, S, P>(
    deps: &Deps<'_, R, F, S, P>,
    config_file: &Path,
    credentials: &CredentialBundle,
) -> Result<StepOutcome>
where
    R: CommandRunner,
    F: LocalFs,
    P: ProgressReporter,
{
    let outcome = merge_config(
        deps.runner,
        deps.fs,
        deps.reporter,
        config_file,
        credentials.npm_config.as_deref(),
    )
    .await?;
    if let StepOutcome::Skipped(reason) = &outcome {
        deps.reporter.step(reason);
    }

    let dir_missing = config_file
        .parent()
        .is_some_and(|p| !p.as_os_str().is_empty() && !deps.fs.exists(p));
    if dir_missing {
        return Ok(StepOutcome::skipped(format!(
            "Not writing {}: its directory does not exist",
            config_file.display()
        )));
    }
    deps.fs.append(config_file, &format!("\n{UNSAFE_PERM}\n"))?;
    Ok(StepOutcome::Done)
}

/// Keep the config edits out of anything the publish step might commit.
async fn hide_config_changes<R, F, S, P>(
    deps: &Deps<'_, R, F, S, P>,
    settings: &Settings,
    config: &ConfigFile,
) -> Result<StepOutcome>
where
    R: CommandRunner,
    F: LocalFs,
    P: ProgressReporter,
{
    let shown = config.path.to_string_lossy().into_owned();
    deps.reporter
        .step(&format!("Marking {shown} as unmodified to avoid committing the keys"));

    if config.existed_before {
        checked(
            deps.runner,
            "git",
            &["update-index", "--assume-unchanged", shown.as_str()],
        )
        .await?;
        return Ok(StepOutcome::Done);
    }

    deps.reporter
        .step(&format!("{shown} did not exist before running the action"));
    let exclude = settings.git_exclude_path();
    if !deps.fs.exists(&exclude) {
        return Ok(StepOutcome::skipped(format!(
            "{} does not exist; not excluding {shown}",
            exclude.display()
        )));
    }
    deps.fs.append(&exclude, &format!("\n{shown}\n"))?;
    Ok(StepOutcome::Done)
}

/// Install the deploy key and point git at it.
async fn setup_git_push<R, F, S, P>(
    deps: &Deps<'_, R, F, S, P>,
    settings: &Settings,
    credentials: &CredentialBundle,
    deploy_key: &str,
) -> Result<()>
where
    R: CommandRunner,
    F: LocalFs,
    P: ProgressReporter,
{
    let key_path = settings.deploy_key_path();
    deps.reporter
        .step(&format!("Writing deploy key to {}", key_path.display()));
    deps.fs.write_private(&key_path, &format!("{deploy_key}\n"))?;

    deps.reporter.step(&format!("Running ssh-keyscan for {GITHUB_HOST}"));
    let host_keys = fetch_host_keys(deps.runner, deps.reporter, GITHUB_HOST).await?;
    deps.fs.write(&settings.known_hosts_path(), &host_keys)?;

    deps.reporter.step("Setting up git config for commit user");
    let email = credentials.email.as_str();
    let username = credentials.username.as_str();
    checked(deps.runner, "git", &["config", IDENTITY_EMAIL_KEY, email]).await?;
    checked(deps.runner, "git", &["config", IDENTITY_NAME_KEY, username]).await?;

    deps.reporter.step("Setting up git config for ssh command");
    let ssh_command = git::ssh_command(&settings.ssh_dir());
    checked(deps.runner, "git", &["config", SSH_COMMAND_KEY, ssh_command.as_str()]).await?;

    deps.reporter.step("Setting git remote url");
    let origin = git::ssh_remote(&settings.repository);
    checked(deps.runner, "git", &["remote", "set-url", "origin", origin.as_str()]).await?;
    Ok(())
}

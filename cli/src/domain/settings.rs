//! Immutable run settings resolved once from the process environment.

use std::path::{Path, PathBuf};

use crate::domain::error::ActionError;

/// Job-scoped temp directory provided by the runner.
pub const TEMP_DIR_VAR: &str = "RUNNER_TEMP";
/// `owner/name` of the repository the job runs for.
pub const REPOSITORY_VAR: &str = "GITHUB_REPOSITORY";

/// Subdirectory of the temp dir holding the deploy key and known hosts.
pub const SSH_DIR_NAME: &str = "setup-npm-publish-action";
pub const DEPLOY_KEY_FILE: &str = "id_rsa";
pub const KNOWN_HOSTS_FILE: &str = "known_hosts";

/// Read-only view of environment variables.
pub trait Environment {
    /// Return the variable's value, or `None` if it is unset.
    fn var(&self, name: &str) -> Option<String>;
}

/// Read a required variable.
///
/// # Errors
///
/// Returns [`ActionError::MissingEnvironment`] if the variable is unset.
pub fn require(env: &impl Environment, name: &str) -> Result<String, ActionError> {
    env.var(name)
        .ok_or_else(|| ActionError::MissingEnvironment(name.to_string()))
}

/// Settings shared by the setup and cleanup phases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base directory for ephemeral SSH material.
    pub temp_dir: PathBuf,
    /// Repository identifier in `owner/name` form.
    pub repository: String,
    /// Directory git and relative config paths are resolved against.
    pub workdir: PathBuf,
}

impl Settings {
    /// Build settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::MissingEnvironment`] if `RUNNER_TEMP` or
    /// `GITHUB_REPOSITORY` is unset.
    pub fn from_env(env: &impl Environment, workdir: PathBuf) -> Result<Self, ActionError> {
        Ok(Self {
            temp_dir: PathBuf::from(require(env, TEMP_DIR_VAR)?),
            repository: require(env, REPOSITORY_VAR)?,
            workdir,
        })
    }

    /// Location of a file inside the SSH material directory.
    #[must_use]
    pub fn ssh_path(&self, file_name: &str) -> PathBuf {
        self.ssh_dir().join(file_name)
    }

    #[must_use]
    pub fn ssh_dir(&self) -> PathBuf {
        self.temp_dir.join(SSH_DIR_NAME)
    }

    #[must_use]
    pub fn deploy_key_path(&self) -> PathBuf {
        self.ssh_path(DEPLOY_KEY_FILE)
    }

    #[must_use]
    pub fn known_hosts_path(&self) -> PathBuf {
        self.ssh_path(KNOWN_HOSTS_FILE)
    }

    /// Resolve a possibly relative path against the working directory.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workdir.join(path)
        }
    }

    /// The local, never-committed exclude list of the repository.
    #[must_use]
    pub fn git_exclude_path(&self) -> PathBuf {
        self.workdir.join(".git").join("info").join("exclude")
    }
}

//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::app::AppContext;
use crate::commands;
use crate::domain::CredentialBundle;
use crate::output::OutputContext;

const DEFAULT_NPMRC: &str = ".npmrc";

/// Provision npm publish credentials for a CI job and destroy them afterwards
#[derive(Parser)]
#[command(
    name = "setup-npm-publish",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub inputs: ActionInputs,

    #[command(subcommand)]
    pub command: Command,
}

/// Action inputs. The CI runner passes these as environment variables.
#[derive(Args, Clone, Default)]
pub struct ActionInputs {
    /// Commit email for pushes made with the deploy key
    #[arg(long, global = true, env = "INPUT_EMAIL", default_value = "")]
    pub email: String,

    /// Commit user name for pushes made with the deploy key
    #[arg(long, global = true, env = "INPUT_USERNAME", default_value = "")]
    pub username: String,

    /// npm config file to merge into, relative to the working directory
    #[arg(long, global = true, env = "INPUT_NPMRC_PATH")]
    pub npmrc_path: Option<PathBuf>,

    /// Repository checkout the job operates on
    #[arg(long, global = true, default_value = ".")]
    pub working_directory: PathBuf,

    /// SSH deploy key with push access to the repository
    #[arg(long, global = true, env = "GIT_DEPLOY_KEY", hide_env_values = true)]
    pub deploy_key: Option<String>,

    /// npm config lines (for example an auth token entry) to merge
    #[arg(long, global = true, env = "AUTH_TOKEN_STRING", hide_env_values = true)]
    pub auth_token: Option<String>,
}

impl ActionInputs {
    /// Config path, defaulting to `.npmrc` when unset or empty.
    #[must_use]
    pub fn npmrc_path(&self) -> PathBuf {
        self.npmrc_path
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NPMRC))
    }

    #[must_use]
    pub fn credentials(&self) -> CredentialBundle {
        CredentialBundle::new(
            self.email.clone(),
            self.username.clone(),
            self.deploy_key.clone(),
            self.auth_token.clone(),
        )
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Run setup, or cleanup when setup already ran in this job
    Run,

    /// Write npm config and deploy key, point git at SSH
    Setup,

    /// Shred secrets and restore git state
    Cleanup,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if required environment is missing or any phase fails.
    pub async fn run(self, output: &OutputContext) -> Result<()> {
        let Cli { inputs, command, .. } = self;
        let app = AppContext::new(output, inputs)?;
        match command {
            Command::Run => commands::run::run(&app).await,
            Command::Setup => commands::setup::run(&app).await,
            Command::Cleanup => commands::cleanup::run(&app).await,
        }
    }
}

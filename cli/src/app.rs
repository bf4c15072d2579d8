//! Application context — unified state passed to every command handler.
//!
//! Built once per process from the CLI inputs and the environment, then
//! passed as `&AppContext` to the phase handlers.

use anyhow::Result;

use crate::application::ProgressReporter;
use crate::application::services::Deps;
use crate::cli::ActionInputs;
use crate::domain::Settings;
use crate::infra::command_runner::{DEFAULT_CMD_TIMEOUT, TokioCommandRunner};
use crate::infra::env::ProcessEnv;
use crate::infra::fs::HostFs;
use crate::infra::state::ActionsStateStore;
use crate::output::OutputContext;

/// Unified application context passed to every command handler.
pub struct AppContext<'a> {
    /// Job log output.
    pub output: &'a OutputContext,
    /// Settings resolved from the environment.
    pub settings: Settings,
    /// Action inputs as parsed by clap.
    pub inputs: ActionInputs,
    pub runner: TokioCommandRunner,
    pub fs: HostFs,
    pub state: ActionsStateStore,
}

impl<'a> AppContext<'a> {
    /// Construct an `AppContext` from CLI inputs and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `RUNNER_TEMP` or `GITHUB_REPOSITORY` is unset.
    pub fn new(output: &'a OutputContext, inputs: ActionInputs) -> Result<Self> {
        let settings = Settings::from_env(&ProcessEnv, inputs.working_directory.clone())?;
        Ok(Self {
            output,
            runner: TokioCommandRunner::new(settings.workdir.clone(), DEFAULT_CMD_TIMEOUT),
            settings,
            inputs,
            fs: HostFs,
            state: ActionsStateStore::from_env(),
        })
    }

    /// Borrow the production ports for a phase.
    pub fn deps<'b, P: ProgressReporter>(
        &'b self,
        reporter: &'b P,
    ) -> Deps<'b, TokioCommandRunner, HostFs, ActionsStateStore, P> {
        Deps {
            runner: &self.runner,
            fs: &self.fs,
            state: &self.state,
            reporter,
        }
    }
}

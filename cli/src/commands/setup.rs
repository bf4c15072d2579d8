//! `setup` command — provision credentials before the publish step.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::setup::{ConfigFile, setup_npm_publish};
use crate::output::WorkflowReporter;

/// Run the setup phase.
///
/// # Errors
///
/// Returns an error if any setup step fails.
pub async fn run(app: &AppContext<'_>) -> Result<()> {
    let reporter = WorkflowReporter::new(app.output);
    let config = ConfigFile::detect(&app.fs, &app.settings, app.inputs.npmrc_path());
    let credentials = app.inputs.credentials();
    setup_npm_publish(&app.deps(&reporter), &app.settings, &credentials, &config).await
}

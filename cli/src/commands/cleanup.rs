//! `cleanup` command — destroy credentials after the publish step.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::StateStore;
use crate::application::services::NPMRC_EXCLUDED_STATE;
use crate::application::services::cleanup::cleanup_npm_publish;
use crate::output::WorkflowReporter;

/// Run the cleanup phase.
///
/// # Errors
///
/// Returns an error if shredding or restoring git state fails.
pub async fn run(app: &AppContext<'_>) -> Result<()> {
    let reporter = WorkflowReporter::new(app.output);
    let excluded = app.state.get(NPMRC_EXCLUDED_STATE).as_deref() == Some("true");
    cleanup_npm_publish(
        &app.deps(&reporter),
        &app.settings,
        &app.inputs.npmrc_path(),
        excluded,
    )
    .await
}

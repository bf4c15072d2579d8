//! `run` command — one entry point for both the main and the post step.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::StateStore;
use crate::application::services::IS_POST_STATE;

/// Phase selected for this invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Cleanup,
}

/// The post step sees the `isPost` state saved by the main step.
#[must_use]
pub fn detect_phase(state: &impl StateStore) -> Phase {
    if state.get(IS_POST_STATE).is_some_and(|v| !v.is_empty()) {
        Phase::Cleanup
    } else {
        Phase::Setup
    }
}

/// Run whichever phase applies.
///
/// # Errors
///
/// Returns an error if the selected phase fails.
pub async fn run(app: &AppContext<'_>) -> Result<()> {
    match detect_phase(&app.state) {
        Phase::Cleanup => super::cleanup::run(app).await,
        Phase::Setup => {
            app.state.set(IS_POST_STATE, "true")?;
            super::setup::run(app).await
        }
    }
}

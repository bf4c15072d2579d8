//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

/// Fatal failures that abort the running phase.
///
/// Best-effort steps never produce one of these; they report
/// [`StepOutcome::Skipped`] instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("No {0} environment variable set")]
    MissingEnvironment(String),

    #[error("`{command}` failed with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Step state value for '{key}' must be a single line")]
    InvalidStateValue { key: String },

    #[error("npm config set only writes .npmrc; cannot merge config into {path}")]
    UnsupportedConfigFile { path: String },
}

/// Result of a step that is allowed to be skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step ran to completion.
    Done,
    /// The step did not apply; the reason is logged and the phase continues.
    Skipped(String),
}

impl StepOutcome {
    #[must_use]
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped(reason.into())
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::Output;

use anyhow::Result;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// A nonzero exit is returned as `Ok(output)`; only spawn or wait failures
/// are errors. Callers decide whether a failed status is fatal.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program in the runner's working directory and capture its output.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with `dir` as its working directory.
    async fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── State and Filesystem Ports ────────────────────────────────────────────────

/// Key/value state carried from the setup invocation to the cleanup invocation.
pub trait StateStore {
    /// Value saved under `key` by an earlier invocation, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Persist `value` under `key` for later invocations.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be recorded.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Abstracts local filesystem access.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Create or truncate `path` and write `content`.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    /// Create or truncate `path` readable only by its owner (mode 0400).
    fn write_private(&self, path: &Path, content: &str) -> Result<()>;
    /// Append `content`, creating the file if missing.
    fn append(&self, path: &Path, content: &str) -> Result<()>;
}

//! Infrastructure implementation of the `StateStore` port.
//!
//! The runner hands state saved by the main step to the post step as
//! `STATE_<key>` environment variables. Saving appends `key=value` to the
//! file named by `GITHUB_STATE`; older runners without that file read the
//! `::save-state` workflow command from stdout instead.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::StateStore;
use crate::domain::{ActionError, Environment};

const STATE_PREFIX: &str = "STATE_";
const STATE_FILE_VAR: &str = "GITHUB_STATE";

/// Step state backed by the CI runner's save-state mechanism.
pub struct ActionsStateStore {
    saved: HashMap<String, String>,
    state_file: Option<PathBuf>,
}

impl ActionsStateStore {
    /// Snapshot state passed in by the runner from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            saved: saved_state(std::env::vars_os()),
            state_file: super::env::ProcessEnv.var(STATE_FILE_VAR).map(PathBuf::from),
        }
    }

    /// Create a store with explicit saved values and state file (used in tests).
    #[must_use]
    pub fn with_parts(saved: HashMap<String, String>, state_file: Option<PathBuf>) -> Self {
        Self { saved, state_file }
    }
}

/// Keep `STATE_*` variables, dropping any whose name or value is not UTF-8.
fn saved_state(vars: impl IntoIterator<Item = (OsString, OsString)>) -> HashMap<String, String> {
    vars.into_iter()
        .filter_map(|(k, v)| {
            let key = k.into_string().ok()?.strip_prefix(STATE_PREFIX)?.to_string();
            let value = v.into_string().ok()?;
            Some((key, value))
        })
        .collect()
}

impl StateStore for ActionsStateStore {
    fn get(&self, key: &str) -> Option<String> {
        self.saved.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if value.contains(['\n', '\r']) || key.contains(['\n', '\r', '=']) {
            return Err(ActionError::InvalidStateValue {
                key: key.to_string(),
            }
            .into());
        }
        match &self.state_file {
            Some(path) => {
                let mut file = OpenOptions::new()
                    .append(true)
                    .create(true)
                    .open(path)
                    .with_context(|| format!("opening state file {}", path.display()))?;
                writeln!(file, "{key}={value}")
                    .with_context(|| format!("writing state file {}", path.display()))?;
            }
            None => println!("::save-state name={key}::{value}"),
        }
        Ok(())
    }
}

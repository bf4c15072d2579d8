//! Process environment access for `Settings` construction.

use crate::domain::Environment;

/// Reads variables from the current process environment.
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

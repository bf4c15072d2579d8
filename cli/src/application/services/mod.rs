//! Application services — use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports` — never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod cleanup;
pub mod exec;
pub mod host_keys;
pub mod npm_config;
pub mod setup;

/// Step-state key marking that setup ran without a deploy key.
pub const SKIP_DEPLOY_KEY_STATE: &str = "skipGitDeployKey";
/// Step-state key marking that the config path was added to the exclude list.
pub const NPMRC_EXCLUDED_STATE: &str = "npmrcExcluded";
/// Step-state key present once the main phase has run.
pub const IS_POST_STATE: &str = "isPost";

/// Ports used by the setup and cleanup phases.
pub struct Deps<'a, R, F, S, P> {
    pub runner: &'a R,
    pub fs: &'a F,
    pub state: &'a S,
    pub reporter: &'a P,
}

//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `crate::output`, `tokio`, `std::fs`, `std::process`,
//! `std::env`, or `std::net`. All functions are synchronous and take data in,
//! returning data out. `tests/unit/architecture.rs` enforces both rules.

pub mod credentials;
pub mod error;
pub mod git;
pub mod npmrc;
pub mod settings;

pub use credentials::CredentialBundle;
pub use error::{ActionError, StepOutcome};
pub use npmrc::{NpmrcEntry, UNSAFE_PERM};
pub use settings::{Environment, Settings};

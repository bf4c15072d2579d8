//! Application layer — port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain` — never on `crate::infra`,
//! `crate::commands`, `crate::output`, or `crate::app`. Host access goes
//! through the ports, so `std::fs` and `std::env` stay out too
//! (checked by `tests/unit/architecture.rs`).

pub mod ports;
pub mod services;

pub use ports::{CommandRunner, LocalFs, ProgressReporter, StateStore};

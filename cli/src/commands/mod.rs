//! Command handlers, one per phase.

pub mod cleanup;
pub mod run;
pub mod setup;

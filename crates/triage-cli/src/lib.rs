//! Command-line driver for the triage core.
//!
//! This crate owns process concerns (argument parsing, environment loading,
//! tracing setup, error reporting) and replays scripted encounters through
//! the workflow.

pub mod cli;
pub mod script;
pub mod settings;
pub mod telemetry;

pub use script::*;

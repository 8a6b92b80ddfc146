//! Command Line Interface (CLI) layer for iconfit.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-source, icon-set and
//! batch flows. It wires user-provided options to the underlying library
//! functionality exposed via `iconfit::api`.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;

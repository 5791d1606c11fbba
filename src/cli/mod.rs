//! CLI layer
//!
//! Pieces of the `backoff` binary that are worth testing on their own.

pub mod output;
pub mod run;

pub use output::Output;
pub use run::{parse_payload, run_command, CommandError};

//! Textmend CLI library
//!
//! Command-line surface over the textmend repair pipeline: load a
//! JSON-serialized tree snapshot, run the pipeline to a fixed point, and
//! emit the repaired tree.

pub mod commands;
pub mod error;
pub mod snapshot;

pub use error::{CliError, CliResult};

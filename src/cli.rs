//! CLI argument parsing and command orchestration

pub mod args;
pub mod bump;
pub mod common;
pub mod prompt;

// Re-export types for convenient access
pub use args::{Cli, ColorChoice, OutputFormat};
pub use bump::{BumpOutcome, BumpRequest, Operation, execute, run_bump};

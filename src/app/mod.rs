//! Command execution for the `vanish` binary.
//!
//! This module ties the library components together per subcommand and
//! prints their results as aligned tables.

mod commands;
mod output;

// Re-export public API
pub use commands::run_command;

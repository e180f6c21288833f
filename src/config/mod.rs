//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (default URLs, paths, limits)
//! - The `Config` value handed to every component
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Command, FilterArgs, Opt, UpdateScope};
pub use constants::*;
pub use types::{Config, ConfigValidationError, LogFormat, LogLevel, OPTION_KEYS};

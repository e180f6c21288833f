//! Error handling.
//!
//! This module provides:
//! - Error type definitions for each failure domain
//! - Categorization of HTTP transport errors
//!
//! Catalog and profile sync errors are fatal to the caller. Probe failures are
//! recovered per server and connect failures are reported, not raised.

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{
    CatalogError, ConfigError, FetchError, InitializationError, ProbeError, SyncError,
};

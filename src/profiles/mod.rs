//! OpenVPN profile management.
//!
//! This module provides:
//! - The archive filename scheme and canonical profile names
//! - Zip extraction and renaming
//! - Full-replace synchronization of the local profile directory

mod extract;
mod naming;
mod sync;

// Re-export public API
pub use extract::RenameOutcome;
pub use naming::{is_profile_suffix, profile_path, ProfileName, PROFILE_EXTENSION};
pub use sync::{ProfileSync, SyncReport};

//! Server catalog.
//!
//! This module provides:
//! - Server records and the catalog they form
//! - Feed normalization
//! - The on-disk snapshot and its refresh
//! - Cascade filtering and hierarchical listings

mod filter;
mod index;
mod normalize;
mod store;
mod types;

// Re-export public API
pub use filter::{GeoFilter, Terms};
pub use index::{City, Continent, Country, Region, ServerIndex};
pub use store::CatalogStore;
pub use types::{Catalog, ServerRecord};

//! vanish library: IPVanish server directory, profile sync, and connection
//!
//! This library keeps a local catalog of the provider's VPN servers, answers
//! cascading geographic queries over it, measures server reachability, syncs
//! the provider's OpenVPN profiles, and launches the VPN client.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vanish::{CatalogStore, Config, GeoFilter, ServerIndex};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = Arc::new(reqwest::Client::new());
//!
//! let catalog = CatalogStore::from_config(client, &config).load_or_init().await?;
//! let index = ServerIndex::new(&catalog);
//! for country in index.countries(&GeoFilter::new().continents(&["EU"])) {
//!     println!("{} {}", country.code, country.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! Network, probe, and connect operations require a Tokio runtime.

pub mod app;
pub mod catalog;
pub mod config;
pub mod connect;
mod error_handling;
mod fetch;
pub mod initialization;
pub mod probe;
pub mod profiles;

// Re-export public API
pub use catalog::{Catalog, CatalogStore, GeoFilter, ServerIndex, ServerRecord};
pub use config::Config;
pub use connect::{ConnectOutcome, Connector};
pub use error_handling::{
    CatalogError, ConfigError, FetchError, InitializationError, ProbeError, SyncError,
};
pub use probe::{ProbeReport, Prober};
pub use profiles::{ProfileSync, SyncReport};

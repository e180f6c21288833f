//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the shared HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - A `vanish/<version>` User-Agent
/// - The configured request timeout
/// - Redirect following (the archive URL redirects to a CDN)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .user_agent(concat!("vanish/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(Arc::new(client))
}

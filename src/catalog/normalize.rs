//! Feed ingestion.
//!
//! Turns the provider's feature list into catalog records: presentation keys
//! are dropped and the feed's "GB" country code becomes "UK", which is what
//! profile filenames use.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::{FEED_UK_COUNTRY_CODE, PRESENTATION_KEYS, PROFILE_UK_COUNTRY_CODE};
use crate::error_handling::CatalogError;

use super::types::{Catalog, ServerRecord};

/// Fields that must be present and non-empty for a record to be usable.
const REQUIRED_KEYS: [&str; 4] = ["ip", "countryCode", "continentCode", "city"];

#[derive(Debug, Deserialize)]
struct Feature {
    properties: Map<String, Value>,
}

/// Parses a raw feed body fetched from `url` into a catalog.
///
/// Entries lacking a required field are skipped with a warning rather than
/// failing the whole refresh.
pub(crate) fn parse_feed(body: &[u8], url: &str) -> Result<Catalog, CatalogError> {
    let features: Vec<Feature> =
        serde_json::from_slice(body).map_err(|source| CatalogError::MalformedFeed {
            url: url.to_string(),
            source,
        })?;

    let total = features.len();
    let servers: Vec<ServerRecord> = features
        .into_iter()
        .enumerate()
        .filter_map(|(position, feature)| match normalize(feature.properties) {
            Ok(server) => Some(server),
            Err(reason) => {
                log::warn!("Skipping feed entry {}: {}", position, reason);
                None
            }
        })
        .collect();

    if servers.len() < total {
        log::warn!(
            "Kept {} of {} feed entries from {}",
            servers.len(),
            total,
            url
        );
    }
    Ok(Catalog::new(servers))
}

/// Normalizes one feature's properties into a record.
pub(crate) fn normalize(mut properties: Map<String, Value>) -> Result<ServerRecord, String> {
    for key in PRESENTATION_KEYS {
        properties.remove(key);
    }

    for key in REQUIRED_KEYS {
        match properties.get(key).and_then(Value::as_str) {
            Some(value) if !value.trim().is_empty() => {}
            _ => return Err(format!("missing {}", key)),
        }
    }

    if properties.get("countryCode").and_then(Value::as_str) == Some(FEED_UK_COUNTRY_CODE) {
        properties.insert(
            "countryCode".to_string(),
            Value::String(PROFILE_UK_COUNTRY_CODE.to_string()),
        );
    }

    serde_json::from_value(Value::Object(properties)).map_err(|e| e.to_string())
}

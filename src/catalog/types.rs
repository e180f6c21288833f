//! Catalog data types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::profiles::is_profile_suffix;

/// One server from the provider's geographic feed.
///
/// Fields serialize in declaration order followed by any pass-through keys,
/// which keeps the snapshot layout stable between refreshes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerRecord {
    /// Continent name, e.g. "Europe"
    pub continent: String,
    /// Short continent code, e.g. "EU"
    pub continent_code: String,
    /// Country name
    pub country: String,
    /// Two-letter country code; the feed's "GB" is stored as "UK"
    pub country_code: String,
    /// Sub-country region name, empty for country-level servers
    #[serde(default, deserialize_with = "null_as_empty")]
    pub region: String,
    /// Region code, empty together with `region`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub region_code: String,
    /// Region abbreviation, empty together with `region`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub region_abbr: String,
    /// City name
    pub city: String,
    /// Server address, probe target and connection endpoint
    pub ip: String,
    /// Display name, e.g. "nyc-a01.ipvanish.com"
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hostname: String,
    /// Round-trip time in milliseconds, set only after a successful probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rtt: Option<f64>,
    /// Source metadata passed through unmodified
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ServerRecord {
    /// Whether the server sits in a sub-country region.
    pub fn has_region(&self) -> bool {
        !self.region.is_empty()
    }

    /// Canonical profile identifier (`{countrycode}-{xxx-cNN}`) for this server.
    ///
    /// Derived from the first hostname label; `None` when the hostname does
    /// not follow the provider's `xxx-cNN` naming.
    pub fn profile_id(&self) -> Option<String> {
        let label = self.hostname.split('.').next()?.to_lowercase();
        if !is_profile_suffix(&label) {
            return None;
        }
        Some(format!("{}-{}", self.country_code.to_lowercase(), label))
    }

    /// Whether `target` names this server by hostname, short hostname, IP, or profile id.
    pub fn is_named(&self, target: &str) -> bool {
        let lowered = target.trim().to_lowercase();
        let target = lowered.strip_suffix(".ovpn").unwrap_or(lowered.as_str());
        if target.is_empty() {
            return false;
        }
        let hostname = self.hostname.to_lowercase();
        hostname == target
            || hostname.split('.').next() == Some(target)
            || self.ip == target
            || self.profile_id().as_deref() == Some(target)
    }
}

/// The full ordered list of servers, in feed order.
///
/// Read-only once loaded; a refresh replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    servers: Vec<ServerRecord>,
}

impl Catalog {
    pub fn new(servers: Vec<ServerRecord>) -> Self {
        Self { servers }
    }

    pub fn servers(&self) -> &[ServerRecord] {
        &self.servers
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// First server named by `target` (see [`ServerRecord::is_named`]).
    pub fn find(&self, target: &str) -> Option<&ServerRecord> {
        self.servers.iter().find(|s| s.is_named(target))
    }
}

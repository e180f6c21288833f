//! Catalog snapshot management.
//!
//! The catalog lives in memory for the whole run and in a JSON snapshot on
//! disk between runs. A missing snapshot triggers a refresh; an existing one
//! is trusted until `refresh` is called explicitly.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::config::Config;
use crate::error_handling::CatalogError;
use crate::fetch::fetch_bytes;

use super::normalize::parse_feed;
use super::types::Catalog;

/// Indentation used in the snapshot so it stays readable by hand.
const SNAPSHOT_INDENT: &[u8] = b"    ";

/// Loads the catalog from its snapshot or refreshes it from the remote feed.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    client: Arc<reqwest::Client>,
    feed_url: String,
    cache_path: PathBuf,
}

impl CatalogStore {
    pub fn new(
        client: Arc<reqwest::Client>,
        feed_url: impl Into<String>,
        cache_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client,
            feed_url: feed_url.into(),
            cache_path: cache_path.into(),
        }
    }

    /// Store for the feed URL and snapshot path in `config`.
    pub fn from_config(client: Arc<reqwest::Client>, config: &Config) -> Self {
        Self::new(client, config.geo_feed_url.clone(), config.geo_cache_path.clone())
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Reads the snapshot if one exists, otherwise refreshes from the feed.
    ///
    /// # Errors
    ///
    /// - `CorruptSnapshot` if the snapshot is not a list of server records
    /// - any error from [`CatalogStore::refresh`] when no snapshot exists
    pub async fn load_or_init(&self) -> Result<Catalog, CatalogError> {
        if self.cache_path.exists() {
            self.load().await
        } else {
            log::info!(
                "No catalog snapshot at {}, fetching from {}",
                self.cache_path.display(),
                self.feed_url
            );
            self.refresh().await
        }
    }

    /// Reads the snapshot from disk.
    pub async fn load(&self) -> Result<Catalog, CatalogError> {
        let bytes =
            tokio::fs::read(&self.cache_path)
                .await
                .map_err(|source| CatalogError::SnapshotRead {
                    path: self.cache_path.clone(),
                    source,
                })?;
        let catalog: Catalog =
            serde_json::from_slice(&bytes).map_err(|source| CatalogError::CorruptSnapshot {
                path: self.cache_path.clone(),
                source,
            })?;
        log::debug!(
            "Loaded {} servers from {}",
            catalog.len(),
            self.cache_path.display()
        );
        Ok(catalog)
    }

    /// Refetches the feed, normalizes it, and replaces the snapshot.
    ///
    /// Nothing is merged with the previous catalog.
    ///
    /// # Errors
    ///
    /// - `Fetch` if the feed is unreachable or answers with a non-success status
    /// - `MalformedFeed` if the body is not a list of features
    /// - `SnapshotWrite` if the snapshot cannot be written (e.g. its directory
    ///   does not exist); the previous snapshot is left untouched
    pub async fn refresh(&self) -> Result<Catalog, CatalogError> {
        log::info!("Fetching server catalog from {}", self.feed_url);
        let body = fetch_bytes(&self.client, &self.feed_url).await?;
        let catalog = parse_feed(&body, &self.feed_url)?;

        write_snapshot(&self.cache_path, &catalog)?;
        log::info!(
            "Saved {} servers to {}",
            catalog.len(),
            self.cache_path.display()
        );
        Ok(catalog)
    }

    /// Time since the snapshot was last written, if it exists.
    pub fn snapshot_age(&self) -> Option<Duration> {
        std::fs::metadata(&self.cache_path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| modified.elapsed().ok())
    }
}

/// Writes `catalog` to `path` through a temporary file in the same directory.
///
/// The target only ever holds a complete document: the temporary file is
/// renamed over it once fully written.
pub(crate) fn write_snapshot(path: &Path, catalog: &Catalog) -> Result<(), CatalogError> {
    let write_error = |source: std::io::Error| CatalogError::SnapshotWrite {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(write_error)?;
    {
        let formatter = PrettyFormatter::with_indent(SNAPSHOT_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(tmp.as_file_mut(), formatter);
        catalog
            .serialize(&mut serializer)
            .map_err(|e| write_error(std::io::Error::other(e)))?;
    }
    tmp.write_all(b"\n").map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use serde_json::json;
    use tempfile::TempDir;

    fn feed_body() -> Vec<u8> {
        serde_json::to_vec(&json!([
            {
                "properties": {
                    "continent": "Europe",
                    "continentCode": "EU",
                    "country": "United Kingdom",
                    "countryCode": "GB",
                    "region": "",
                    "regionCode": "",
                    "regionAbbr": "",
                    "city": "London",
                    "ip": "192.0.2.1",
                    "hostname": "lon-a01.ipvanish.com",
                    "marker-color": "#fff",
                    "marker-cluster-small": 1
                }
            },
            {
                "properties": {
                    "continent": "North America",
                    "continentCode": "NA",
                    "country": "United States",
                    "countryCode": "US",
                    "region": "New York",
                    "regionCode": "NY",
                    "regionAbbr": "NY",
                    "city": "New York",
                    "ip": "192.0.2.2",
                    "hostname": "nyc-a01.ipvanish.com",
                    "marker-color": "#fff",
                    "marker-cluster-small": 1
                }
            }
        ]))
        .unwrap()
    }

    fn store(url: String, cache_path: PathBuf) -> CatalogStore {
        CatalogStore::new(Arc::new(reqwest::Client::new()), url, cache_path)
    }

    #[tokio::test]
    async fn test_refresh_writes_indented_snapshot() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/servers.geojson"))
                .respond_with(status_code(200).body(feed_body())),
        );
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache_path = temp_dir.path().join("servers.json");

        let catalog = store(server.url_str("/servers.geojson"), cache_path.clone())
            .refresh()
            .await
            .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.servers()[0].country_code, "UK");

        let text = std::fs::read_to_string(&cache_path).unwrap();
        assert!(text.starts_with("[\n    {\n        \"continent\""));
        assert!(!text.contains("marker-color"));
        assert!(!text.contains("\"GB\""));
    }

    #[tokio::test]
    async fn test_load_or_init_fetches_when_missing_then_uses_snapshot() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/servers.geojson"))
                .times(1)
                .respond_with(status_code(200).body(feed_body())),
        );
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache_path = temp_dir.path().join("servers.json");
        let store = store(server.url_str("/servers.geojson"), cache_path.clone());

        let first = store.load_or_init().await.unwrap();
        assert!(cache_path.exists());
        let second = store.load_or_init().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_load_or_init_reads_existing_snapshot_without_fetching() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache_path = temp_dir.path().join("servers.json");
        std::fs::write(
            &cache_path,
            serde_json::to_vec(&json!([{
                "continent": "Europe",
                "continentCode": "EU",
                "country": "France",
                "countryCode": "FR",
                "region": "",
                "regionCode": "",
                "regionAbbr": "",
                "city": "Paris",
                "ip": "192.0.2.9",
                "hostname": "par-a01.ipvanish.com"
            }]))
            .unwrap(),
        )
        .unwrap();

        // Nothing listens here; a fetch attempt would fail the test
        let store = store("http://127.0.0.1:1/servers.geojson".to_string(), cache_path);
        let catalog = store.load_or_init().await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.servers()[0].city, "Paris");
    }

    #[tokio::test]
    async fn test_corrupt_snapshot() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache_path = temp_dir.path().join("servers.json");
        std::fs::write(&cache_path, b"[{\"city\": 3}]").unwrap();

        let err = store("http://127.0.0.1:1/".to_string(), cache_path)
            .load_or_init()
            .await
            .unwrap_err();
        assert!(
            matches!(err, CatalogError::CorruptSnapshot { .. }),
            "Expected corrupt snapshot, got: {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_refresh_missing_parent_dir_is_write_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/servers.geojson"))
                .respond_with(status_code(200).body(feed_body())),
        );
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache_path = temp_dir.path().join("fake").join("path");

        let err = store(server.url_str("/servers.geojson"), cache_path.clone())
            .load_or_init()
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::SnapshotWrite { .. }));
        assert!(err.to_string().contains("fake"));
        assert!(!cache_path.exists());
        assert!(!temp_dir.path().join("fake").exists());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/servers.geojson"))
                .respond_with(status_code(503)),
        );
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache_path = temp_dir.path().join("servers.json");
        std::fs::write(&cache_path, b"[]").unwrap();

        let err = store(server.url_str("/servers.geojson"), cache_path.clone())
            .refresh()
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Fetch(_)));
        assert!(err.to_string().contains("503"));
        assert_eq!(std::fs::read(&cache_path).unwrap(), b"[]");
    }

    #[test]
    fn test_write_snapshot_replaces_existing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache_path = temp_dir.path().join("servers.json");
        std::fs::write(&cache_path, b"old").unwrap();

        write_snapshot(&cache_path, &Catalog::default()).unwrap();
        assert_eq!(std::fs::read_to_string(&cache_path).unwrap(), "[]\n");
        // Only the snapshot remains; the temporary file was renamed into place
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_snapshot_age() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache_path = temp_dir.path().join("servers.json");
        let store = store("http://127.0.0.1:1/".to_string(), cache_path.clone());
        assert!(store.snapshot_age().is_none());

        std::fs::write(&cache_path, b"[]").unwrap();
        assert!(store.snapshot_age().unwrap() < Duration::from_secs(60));
    }
}

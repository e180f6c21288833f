//! Integration tests for the catalog pipeline.
//!
//! These tests drive the public library API against a mock feed served by
//! `httptest`. They do not make real network requests.

mod helpers;

use tempfile::TempDir;
use vanish::{CatalogError, CatalogStore, GeoFilter, ServerIndex};

use helpers::{client, sample_feed, serve};

#[tokio::test]
async fn test_europe_listing_from_fresh_feed() {
    let server = serve("/servers.geojson", sample_feed(), 1);
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = CatalogStore::new(
        client(),
        server.url_str("/servers.geojson"),
        temp_dir.path().join("servers.json"),
    );

    let catalog = store.load_or_init().await.expect("Catalog should load");
    let index = ServerIndex::new(&catalog);
    let europe = GeoFilter::new().continents(&["EU"]);

    assert_eq!(index.servers(&europe).len(), 3);

    let countries = index.countries(&europe);
    let codes: Vec<&str> = countries.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["UK", "FR"]);
    assert!(!codes.contains(&"GB"));
}

#[tokio::test]
async fn test_snapshot_is_reused_across_stores() {
    let server = serve("/servers.geojson", sample_feed(), 1);
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let cache_path = temp_dir.path().join("servers.json");

    let first = CatalogStore::new(client(), server.url_str("/servers.geojson"), &cache_path)
        .load_or_init()
        .await
        .expect("First load should fetch");
    // The mock only answers once; a second fetch would fail the expectation
    let second = CatalogStore::new(client(), server.url_str("/servers.geojson"), &cache_path)
        .load_or_init()
        .await
        .expect("Second load should read the snapshot");

    assert_eq!(first, second);
    let text = std::fs::read_to_string(&cache_path).expect("Snapshot should exist");
    assert!(!text.contains("marker-color"));
    assert!(text.contains("\"countryCode\": \"UK\""));
}

#[tokio::test]
async fn test_cascade_listings() {
    let server = serve("/servers.geojson", sample_feed(), 1);
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let catalog = CatalogStore::new(
        client(),
        server.url_str("/servers.geojson"),
        temp_dir.path().join("servers.json"),
    )
    .load_or_init()
    .await
    .expect("Catalog should load");
    let index = ServerIndex::new(&catalog);

    let continents = index.continents();
    assert_eq!(continents.len(), 2);
    assert_eq!(continents[0].name, "Europe");

    let regions = index.regions(&GeoFilter::new());
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].code, "NY");

    let cities = index.cities(&GeoFilter::new().countries(&["united kingdom"]));
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].name, "London");

    let london = index.servers(&GeoFilter::new().cities(&["LONDON"]));
    let hosts: Vec<&str> = london.iter().map(|s| s.hostname.as_str()).collect();
    assert_eq!(hosts, vec!["lon-a01.ipvanish.com", "lon-a02.ipvanish.com"]);
}

#[tokio::test]
async fn test_unwritable_snapshot_location() {
    let server = serve("/servers.geojson", sample_feed(), 1);
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let cache_path = temp_dir.path().join("fake").join("path");

    let err = CatalogStore::new(client(), server.url_str("/servers.geojson"), &cache_path)
        .load_or_init()
        .await
        .expect_err("Writing into a missing directory should fail");

    assert!(matches!(err, CatalogError::SnapshotWrite { .. }));
    assert!(!cache_path.exists());
}

#[tokio::test]
async fn test_unreachable_feed() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let err = CatalogStore::new(
        client(),
        "http://127.0.0.1:1/servers.geojson",
        temp_dir.path().join("servers.json"),
    )
    .load_or_init()
    .await
    .expect_err("Nothing listens on port 1");

    assert!(matches!(err, CatalogError::Fetch(_)));
    assert!(err.to_string().contains("127.0.0.1:1"));
}

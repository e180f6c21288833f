// Shared test helpers for feed fixtures and mock servers.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::io::{Cursor, Write};
use std::sync::Arc;

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::{json, Value};

/// One feed feature as the provider publishes it, presentation keys included.
#[allow(dead_code)] // Used by other test files
pub fn feature(
    continent: (&str, &str),
    country: (&str, &str),
    region: (&str, &str),
    city: &str,
    hostname: &str,
    ip: &str,
) -> Value {
    json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
        "properties": {
            "continent": continent.0,
            "continentCode": continent.1,
            "country": country.0,
            "countryCode": country.1,
            "region": region.0,
            "regionCode": region.1,
            "regionAbbr": region.1,
            "city": city,
            "ip": ip,
            "hostname": hostname,
            "marker-color": "#70bb44",
            "marker-cluster-small": 1
        }
    })
}

/// Three European servers (two in the UK, reported as "GB") and one in the US.
#[allow(dead_code)] // Used by other test files
pub fn sample_feed() -> Vec<u8> {
    let eu = ("Europe", "EU");
    let na = ("North America", "NA");
    let none = ("", "");
    serde_json::to_vec(&json!([
        feature(eu, ("United Kingdom", "GB"), none, "London", "lon-a01.ipvanish.com", "192.0.2.1"),
        feature(eu, ("United Kingdom", "GB"), none, "London", "lon-a02.ipvanish.com", "192.0.2.2"),
        feature(eu, ("France", "FR"), none, "Paris", "par-a01.ipvanish.com", "192.0.2.3"),
        feature(na, ("United States", "US"), ("New York", "NY"), "New York", "nyc-a01.ipvanish.com", "192.0.2.4"),
    ]))
    .expect("Failed to serialize feed")
}

/// A mock server answering `GET path` with `body`, exactly `times` times.
#[allow(dead_code)] // Used by other test files
pub fn serve(path: &'static str, body: Vec<u8>, times: usize) -> Server {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", path))
            .times(times)
            .respond_with(status_code(200).body(body)),
    );
    server
}

/// Builds an in-memory zip archive from `(name, content)` pairs.
#[allow(dead_code)] // Used by other test files
pub fn zip_archive(files: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in files {
        writer
            .start_file(*name, zip::write::SimpleFileOptions::default())
            .expect("Failed to start zip member");
        writer
            .write_all(content.as_bytes())
            .expect("Failed to write zip member");
    }
    writer
        .finish()
        .expect("Failed to finish zip archive")
        .into_inner()
}

#[allow(dead_code)] // Used by other test files
pub fn client() -> Arc<reqwest::Client> {
    Arc::new(reqwest::Client::new())
}

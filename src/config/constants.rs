//! Configuration constants.
//!
//! This module defines the default endpoints, paths, and operational limits
//! used when no explicit option overrides them.

/// Remote geographic catalog of the server fleet
pub const DEFAULT_GEO_FEED_URL: &str = "https://www.ipvanish.com/api/servers.geojson";

/// Zip archive holding one OpenVPN profile per server
pub const DEFAULT_OVPN_CONFIGS_URL: &str = "https://www.ipvanish.com/software/configs/configs.zip";

/// Directory (relative to `$HOME`) holding the snapshot and profiles
pub const DEFAULT_DATA_DIR: &str = ".vanish";

/// File name of the catalog snapshot inside the data directory
pub const DEFAULT_GEO_CACHE_FILE: &str = "servers.json";

/// Directory name of the synced profiles inside the data directory
pub const DEFAULT_OVPN_CONFIGS_DIR: &str = "ovpn";

/// Certificate authority file shipped inside the profile archive
pub const DEFAULT_CA_FILE: &str = "ca.ipvanish.com.crt";

/// External VPN client binary
pub const DEFAULT_OPENVPN_COMMAND: &str = "openvpn";

/// External reachability probe binary
pub const DEFAULT_PROBE_COMMAND: &str = "ping";

/// Placeholder substituted with the server address in probe arguments
pub const PROBE_TARGET_PLACEHOLDER: &str = "{ip}";

/// Maximum number of probes in flight at once
pub const DEFAULT_PROBE_CONCURRENCY: usize = 16;

/// Per-probe reply timeout in seconds (passed to `ping -W`)
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 1;

/// Grace period added on top of the probe timeout before the child is abandoned
pub const PROBE_TIMEOUT_GRACE_SECS: u64 = 2;

/// Time the VPN client gets to tear down after Ctrl-C before it is killed
pub const CONNECT_SHUTDOWN_GRACE_SECS: u64 = 5;

/// Snapshot age after which listings suggest `vanish update`
pub const SNAPSHOT_STALE_AFTER_DAYS: u64 = 7;

/// HTTP request timeout in seconds
/// The profile archive is a few megabytes, so this is generous
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Keys dropped from every feed entry; they only style map markers
pub const PRESENTATION_KEYS: [&str; 2] = ["marker-color", "marker-cluster-small"];

/// Provider country code that profile filenames spell differently
pub const FEED_UK_COUNTRY_CODE: &str = "GB";

/// Country code used by the profile naming scheme for the United Kingdom
pub const PROFILE_UK_COUNTRY_CODE: &str = "UK";

//! Error type definitions.
//!
//! Catalog and sync errors are fatal for the caller. Probe errors are
//! collected per server and never abort a batch.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::StatusCode;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

/// Errors raised while applying named configuration options.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The key is not one of the recognized option names.
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// The value could not be parsed for this key.
    #[error("invalid value '{value}' for option '{key}'")]
    InvalidValue { key: String, value: String },

    /// `--option` was given something other than `key=value`.
    #[error("expected KEY=VALUE, got '{0}'")]
    MalformedAssignment(String),
}

/// A remote feed or archive could not be retrieved.
///
/// Surfaced to the caller as is; nothing retries automatically.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("GET {url} returned {status}")]
    Status { url: String, status: StatusCode },

    /// The request did not complete in time.
    #[error("GET {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No connection could be established.
    #[error("GET {url} could not connect")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Any other transport or body error.
    #[error("GET {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors from loading or refreshing the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The feed could not be downloaded.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The feed body is not a JSON array of feature objects.
    #[error("server feed from {url} is malformed")]
    MalformedFeed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The cached snapshot exists but is not a list of server records.
    #[error("catalog snapshot {} is corrupt; run `vanish update --scope catalog` to rebuild it", path.display())]
    CorruptSnapshot {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The cached snapshot exists but could not be read.
    #[error("failed to read catalog snapshot {}", path.display())]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be written, typically because its directory is missing.
    #[error("failed to write catalog snapshot {}", path.display())]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from synchronizing the profile directory.
///
/// After any of these the destination directory is in an indeterminate state.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The archive could not be downloaded.
    #[error("profile sync failed")]
    Fetch(#[from] FetchError),

    /// A filesystem operation on the working area or destination failed.
    #[error("profile sync failed: {action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The downloaded archive could not be read or extracted.
    #[error("profile sync failed: cannot extract archive from {url}")]
    Extract {
        url: String,
        #[source]
        source: zip::result::ZipError,
    },

    /// The extraction task panicked or was cancelled.
    #[error("profile sync failed: extraction task aborted")]
    Aborted(#[from] tokio::task::JoinError),
}

/// Why a single reachability probe produced no round-trip time.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probe program could not be started.
    #[error("failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The probe exited unsuccessfully (host unreachable, timeout, ...).
    #[error("probe exited with {status}")]
    Exit { status: std::process::ExitStatus },

    /// The probe succeeded but printed no `time=` value.
    #[error("no round-trip time in probe output")]
    Unparsable,

    /// The probe did not finish within its deadline.
    #[error("probe did not finish within {0}s")]
    Timeout(u64),
}

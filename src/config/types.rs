//! Configuration types.
//!
//! This module defines the library configuration value and the logging
//! options shared with the CLI.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::config::constants::*;
use crate::error_handling::ConfigError;

/// `--log-level` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// `--log-format` values: colored text for terminals, or one JSON object per line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Plain,
    Json,
}

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigValidationError {}

/// Library configuration.
///
/// Every component receives the pieces it needs from this value at
/// construction time; nothing reads process-wide settings.
///
/// # Examples
///
/// ```no_run
/// use vanish::Config;
///
/// let mut config = Config::default();
/// config.set_option("geo.cache.path", "/tmp/servers.json").unwrap();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the geographic server feed (`geo.feed.url`)
    pub geo_feed_url: String,

    /// Catalog snapshot location (`geo.cache.path`)
    pub geo_cache_path: PathBuf,

    /// URL of the profile archive (`ovpn.configs.url`)
    pub ovpn_configs_url: String,

    /// Directory holding the synced profiles (`ovpn.configs.path`)
    pub ovpn_configs_path: PathBuf,

    /// Certificate authority passed to the VPN client (`ovpn.ca.path`).
    /// Defaults to the CA file inside the profile directory.
    pub ovpn_ca_path: Option<PathBuf>,

    /// VPN client binary (`openvpn.command`)
    pub openvpn_command: String,

    /// Maximum probes in flight (`probe.concurrency`)
    pub probe_concurrency: usize,

    /// Probe reply timeout in seconds (`probe.timeout.secs`)
    pub probe_timeout_secs: u64,

    /// HTTP request timeout in seconds (`http.timeout.secs`)
    pub http_timeout_secs: u64,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

/// Option keys understood by [`Config::set_option`].
pub const OPTION_KEYS: [&str; 9] = [
    "geo.feed.url",
    "geo.cache.path",
    "ovpn.configs.url",
    "ovpn.configs.path",
    "ovpn.ca.path",
    "openvpn.command",
    "probe.concurrency",
    "probe.timeout.secs",
    "http.timeout.secs",
];

impl Default for Config {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            geo_feed_url: DEFAULT_GEO_FEED_URL.to_string(),
            geo_cache_path: data_dir.join(DEFAULT_GEO_CACHE_FILE),
            ovpn_configs_url: DEFAULT_OVPN_CONFIGS_URL.to_string(),
            ovpn_configs_path: data_dir.join(DEFAULT_OVPN_CONFIGS_DIR),
            ovpn_ca_path: None,
            openvpn_command: DEFAULT_OPENVPN_COMMAND.to_string(),
            probe_concurrency: DEFAULT_PROBE_CONCURRENCY,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DATA_DIR)
}

impl Config {
    /// `$HOME/.vanish`, parent of the default snapshot and profile directory.
    pub fn default_data_dir() -> PathBuf {
        default_data_dir()
    }

    /// Applies a single named option such as `geo.cache.path=/tmp/servers.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownOption` for keys outside [`OPTION_KEYS`] and
    /// `ConfigError::InvalidValue` when a numeric option does not parse.
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "geo.feed.url" => self.geo_feed_url = value.to_string(),
            "geo.cache.path" => self.geo_cache_path = PathBuf::from(value),
            "ovpn.configs.url" => self.ovpn_configs_url = value.to_string(),
            "ovpn.configs.path" => self.ovpn_configs_path = PathBuf::from(value),
            "ovpn.ca.path" => self.ovpn_ca_path = Some(PathBuf::from(value)),
            "openvpn.command" => self.openvpn_command = value.to_string(),
            "probe.concurrency" => self.probe_concurrency = parse_number(key, value)?,
            "probe.timeout.secs" => self.probe_timeout_secs = parse_number(key, value)?,
            "http.timeout.secs" => self.http_timeout_secs = parse_number(key, value)?,
            _ => return Err(ConfigError::UnknownOption(key.to_string())),
        }
        Ok(())
    }

    /// Applies a `key=value` pair as accepted by `--option`.
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), ConfigError> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedAssignment(assignment.to_string()))?;
        self.set_option(key.trim(), value.trim())
    }

    /// The CA file handed to the VPN client.
    pub fn ca_path(&self) -> PathBuf {
        self.ovpn_ca_path
            .clone()
            .unwrap_or_else(|| self.ovpn_configs_path.join(DEFAULT_CA_FILE))
    }

    /// Checks the configuration for values no component can work with.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        validate_http_url("geo_feed_url", &self.geo_feed_url)?;
        validate_http_url("ovpn_configs_url", &self.ovpn_configs_url)?;
        validate_path("geo_cache_path", &self.geo_cache_path)?;
        validate_path("ovpn_configs_path", &self.ovpn_configs_path)?;

        if self.openvpn_command.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "openvpn_command",
                message: "must name an executable".to_string(),
            });
        }
        if self.probe_concurrency == 0 {
            return Err(ConfigValidationError {
                field: "probe_concurrency",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.probe_timeout_secs == 0 {
            return Err(ConfigValidationError {
                field: "probe_timeout_secs",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.http_timeout_secs == 0 {
            return Err(ConfigValidationError {
                field: "http_timeout_secs",
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn validate_http_url(field: &'static str, value: &str) -> Result<(), ConfigValidationError> {
    let parsed = url::Url::parse(value).map_err(|e| ConfigValidationError {
        field,
        message: format!("'{}' is not a valid URL ({})", value, e),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigValidationError {
            field,
            message: format!("scheme '{}' is not supported, use http or https", other),
        }),
    }
}

fn validate_path(field: &'static str, value: &Path) -> Result<(), ConfigValidationError> {
    if value.as_os_str().is_empty() {
        return Err(ConfigValidationError {
            field,
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

//! Command-line options.
//!
//! Every configuration option can be given as a flag, through a `VANISH_*`
//! environment variable (a `.env` file is loaded first by the binary), or as
//! a dotted `--option key=value` assignment.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::catalog::GeoFilter;
use crate::config::types::{Config, LogFormat, LogLevel};
use crate::error_handling::ConfigError;

/// Command-line options for the `vanish` binary.
#[derive(Debug, Parser)]
#[command(
    name = "vanish",
    version,
    about = "Browse IPVanish servers, sync their OpenVPN profiles, and connect"
)]
pub struct Opt {
    /// URL of the geographic server feed
    #[arg(long, env = "VANISH_GEO_FEED_URL", global = true)]
    pub geo_feed_url: Option<String>,

    /// Where the catalog snapshot is cached
    #[arg(long, env = "VANISH_GEO_CACHE_PATH", global = true)]
    pub geo_cache_path: Option<PathBuf>,

    /// URL of the OpenVPN profile archive
    #[arg(long, env = "VANISH_OVPN_CONFIGS_URL", global = true)]
    pub ovpn_configs_url: Option<String>,

    /// Directory the profiles are synced into
    #[arg(long, env = "VANISH_OVPN_CONFIGS_PATH", global = true)]
    pub ovpn_configs_path: Option<PathBuf>,

    /// Set a named option, e.g. `--option probe.concurrency=8` (repeatable)
    #[arg(long = "option", short = 'o', value_name = "KEY=VALUE", global = true)]
    pub options: Vec<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "warn", env = "VANISH_LOG_LEVEL", global = true)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain", global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// What to do.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List servers, optionally filtered
    Servers {
        #[command(flatten)]
        filter: FilterArgs,

        /// Measure round-trip time to every listed server
        #[arg(long)]
        ping: bool,
    },
    /// List continents
    Continents,
    /// List countries (continent filter applies)
    Countries {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List regions (continent and country filters apply)
    Regions {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List cities (continent, country and region filters apply)
    Cities {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Refresh the catalog snapshot and/or the profile directory
    Update {
        #[arg(long, value_enum, default_value = "all")]
        scope: UpdateScope,
    },
    /// Connect to a server by hostname, IP, or profile id (e.g. `us-nyc-a01`)
    Connect {
        target: String,

        /// Certificate authority file (defaults to the one in the profile directory)
        #[arg(long)]
        ca: Option<PathBuf>,

        /// Extra arguments passed verbatim to the VPN client
        #[arg(last = true)]
        extra: Vec<String>,
    },
}

/// Which stores `update` refreshes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum UpdateScope {
    /// Catalog snapshot and profiles
    All,
    /// Catalog snapshot only
    Catalog,
    /// Profiles only
    Profiles,
}

/// Cascade filter flags; each may be repeated and matches names or codes.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Continent name or code
    #[arg(long = "continent")]
    pub continents: Vec<String>,

    /// Country name or code
    #[arg(long = "country")]
    pub countries: Vec<String>,

    /// Region name, code, or abbreviation
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// City name
    #[arg(long = "city")]
    pub cities: Vec<String>,
}

impl From<&FilterArgs> for GeoFilter {
    fn from(args: &FilterArgs) -> Self {
        GeoFilter::new()
            .continents(&args.continents)
            .countries(&args.countries)
            .regions(&args.regions)
            .cities(&args.cities)
    }
}

impl Opt {
    /// Builds the library configuration: defaults, then flags, then `--option`.
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config {
            log_level: self.log_level,
            log_format: self.log_format,
            ..Default::default()
        };

        if let Some(url) = &self.geo_feed_url {
            config.geo_feed_url = url.clone();
        }
        if let Some(path) = &self.geo_cache_path {
            config.geo_cache_path = path.clone();
        }
        if let Some(url) = &self.ovpn_configs_url {
            config.ovpn_configs_url = url.clone();
        }
        if let Some(path) = &self.ovpn_configs_path {
            config.ovpn_configs_path = path.clone();
        }
        for assignment in &self.options {
            config.apply_assignment(assignment)?;
        }
        Ok(config)
    }
}

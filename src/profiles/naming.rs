//! Profile filename scheme.
//!
//! The archive names files `ipvanish-{CC}-{Descriptive-Text}-{xxx-cNN}.ovpn`.
//! Locally they are kept as `{cc}-{xxx-cNN}.ovpn`, which can be derived from
//! a catalog record's country code and hostname.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// The provider's archive naming contract; must stay bit-exact.
const ARCHIVE_NAME_PATTERN: &str = r"^ipvanish-([A-Z]{2})-.+-([a-z]{3}-[a-c][0-9]{2}\.ovpn)$";

static ARCHIVE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(ARCHIVE_NAME_PATTERN).expect("archive name pattern is a valid regex")
});

static SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{3}-[a-c][0-9]{2}$").expect("suffix pattern is a valid regex"));

/// Extension of every profile file.
pub const PROFILE_EXTENSION: &str = "ovpn";

/// Fields parsed out of an archive profile filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileName {
    /// Upper-case country code as written in the archive, e.g. "US"
    pub country_code: String,
    /// City and cluster with extension, e.g. "nyc-a01.ovpn"
    pub suffix: String,
}

impl ProfileName {
    /// Parses an archive filename; `None` when it does not follow the scheme.
    pub fn parse(file_name: &str) -> Option<Self> {
        let captures = ARCHIVE_NAME.captures(file_name)?;
        Some(Self {
            country_code: captures[1].to_string(),
            suffix: captures[2].to_string(),
        })
    }

    /// Local filename, e.g. `us-nyc-a01.ovpn`.
    pub fn canonical(&self) -> String {
        format!("{}-{}", self.country_code, self.suffix).to_lowercase()
    }
}

/// Whether `label` looks like a server's `xxx-cNN` city/cluster code.
pub fn is_profile_suffix(label: &str) -> bool {
    SUFFIX.is_match(label)
}

/// Path of the profile for `profile_id` (with or without extension) inside `dir`.
pub fn profile_path(dir: &Path, profile_id: &str) -> PathBuf {
    let extension = format!(".{}", PROFILE_EXTENSION);
    if profile_id.ends_with(&extension) {
        dir.join(profile_id)
    } else {
        dir.join(format!("{}{}", profile_id, extension))
    }
}

//! Profile directory synchronization.
//!
//! A sync is a destructive full replace: the destination is deleted, the
//! archive downloaded and extracted, and profiles renamed to their canonical
//! names. Locally edited profiles do not survive it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use crate::config::Config;
use crate::error_handling::SyncError;
use crate::fetch::fetch_bytes;

use super::extract::{extract_archive, rename_profiles};

/// File name the archive is saved under inside the working area
const ARCHIVE_FILE_NAME: &str = "configs.zip";

/// Summary of a completed sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Members extracted from the archive
    pub extracted: usize,
    /// Profiles renamed to `{cc}-{xxx-cNN}.ovpn`
    pub renamed: usize,
    /// Profile files whose names did not follow the archive scheme
    pub untouched: Vec<String>,
}

/// Replaces a local profile directory with the contents of a remote archive.
#[derive(Debug, Clone)]
pub struct ProfileSync {
    client: Arc<reqwest::Client>,
    archive_url: String,
    destination: PathBuf,
}

impl ProfileSync {
    pub fn new(
        client: Arc<reqwest::Client>,
        archive_url: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            client,
            archive_url: archive_url.into(),
            destination: destination.into(),
        }
    }

    /// Sync for the archive URL and profile directory in `config`.
    pub fn from_config(client: Arc<reqwest::Client>, config: &Config) -> Self {
        Self::new(
            client,
            config.ovpn_configs_url.clone(),
            config.ovpn_configs_path.clone(),
        )
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Downloads the archive and rebuilds the destination directory from it.
    ///
    /// The temporary working area is removed whether or not the sync succeeds.
    ///
    /// # Errors
    ///
    /// Any `SyncError`. After an error the destination directory may be
    /// missing or partially populated; run the sync again rather than
    /// relying on what is there.
    pub async fn update(&self) -> Result<SyncReport, SyncError> {
        let work = TempDir::new().map_err(|source| SyncError::Io {
            action: "create working area in",
            path: std::env::temp_dir(),
            source,
        })?;

        if self.destination.exists() {
            log::info!("Removing {}", self.destination.display());
            tokio::fs::remove_dir_all(&self.destination)
                .await
                .map_err(|source| SyncError::Io {
                    action: "remove",
                    path: self.destination.clone(),
                    source,
                })?;
        }

        log::info!("Downloading profiles from {}", self.archive_url);
        let bytes = fetch_bytes(&self.client, &self.archive_url).await?;

        let archive_path = work.path().join(ARCHIVE_FILE_NAME);
        tokio::fs::write(&archive_path, &bytes)
            .await
            .map_err(|source| SyncError::Io {
                action: "write",
                path: archive_path.clone(),
                source,
            })?;

        let destination = self.destination.clone();
        let url = self.archive_url.clone();
        let report = tokio::task::spawn_blocking(move || -> Result<SyncReport, SyncError> {
            let extracted = extract_archive(&archive_path, &destination)
                .map_err(|source| SyncError::Extract { url, source })?;
            let outcome = rename_profiles(&destination)?;
            Ok(SyncReport {
                extracted,
                renamed: outcome.renamed,
                untouched: outcome.untouched,
            })
        })
        .await??;

        if !report.untouched.is_empty() {
            log::warn!(
                "{} profile file(s) did not match the expected naming scheme and kept their names",
                report.untouched.len()
            );
        }
        log::info!(
            "Synced {} profiles into {}",
            report.renamed,
            self.destination.display()
        );

        // `work` is dropped here, and on every early return above
        Ok(report)
    }
}

//! Archive extraction and renaming.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use zip::result::ZipResult;
use zip::ZipArchive;

use crate::error_handling::SyncError;

use super::naming::{ProfileName, PROFILE_EXTENSION};

/// Extracts every member of the zip at `archive_path` into `destination`.
///
/// Returns the number of archive members. Member paths that would escape
/// `destination` are rejected by the zip reader.
pub(crate) fn extract_archive(archive_path: &Path, destination: &Path) -> ZipResult<usize> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let members = archive.len();
    archive.extract(destination)?;
    log::debug!(
        "Extracted {} archive members into {}",
        members,
        destination.display()
    );
    Ok(members)
}

/// Outcome of renaming the extracted profiles.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenameOutcome {
    /// Files moved to their canonical name
    pub renamed: usize,
    /// Profile-looking files left under their original name
    pub untouched: Vec<String>,
}

/// Renames every top-level profile in `dir` to its canonical name.
///
/// Only names containing "ovpn" are considered. Names that do not follow the
/// archive scheme keep their original name.
pub(crate) fn rename_profiles(dir: &Path) -> Result<RenameOutcome, SyncError> {
    let io_error = |action: &'static str, path: &Path| {
        let path = path.to_path_buf();
        move |source| SyncError::Io {
            action,
            path,
            source,
        }
    };

    let mut outcome = RenameOutcome::default();
    // Renamed files land in the same directory; list it fully before renaming
    let entries = std::fs::read_dir(dir)
        .map_err(io_error("list", dir))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error("list", dir))?;

    for entry in entries {
        let file_type = entry.file_type().map_err(io_error("inspect", &entry.path()))?;
        if !file_type.is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !file_name.contains(PROFILE_EXTENSION) {
            continue;
        }

        match ProfileName::parse(&file_name) {
            Some(name) => {
                let target = dir.join(name.canonical());
                std::fs::rename(entry.path(), &target).map_err(io_error("rename", &entry.path()))?;
                log::trace!("{} -> {}", file_name, name.canonical());
                outcome.renamed += 1;
            }
            None => {
                log::debug!("Leaving {} under its original name", file_name);
                outcome.untouched.push(file_name);
            }
        }
    }

    outcome.untouched.sort();
    Ok(outcome)
}

//! Pre-mutation snapshots of configuration files.
//!
//! A snapshot copies a file's raw bytes and permissions to `<file name>.bak`
//! next to it. Losing the ability to roll back is never fatal: a failed snapshot
//! is logged and the update proceeds without a safety net. Backups are left in
//! place afterwards.

use crate::constants::BACKUP_SUFFIX;
use crate::core::RestoreStatus;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Restore point taken before a file is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backup {
    /// The file did not exist, so there is nothing to restore.
    Absent,
    /// The original bytes were copied to `path`.
    Saved {
        /// Location of the backup copy
        path: PathBuf,
    },
    /// The file existed but could not be copied.
    Failed {
        /// Why the snapshot failed
        reason: String,
    },
}

impl Backup {
    /// Copies `path` to its sibling backup location.
    ///
    /// Never fails: a missing file yields [`Backup::Absent`], a copy error yields
    /// [`Backup::Failed`] after logging a warning.
    pub fn snapshot(path: &Path) -> Self {
        if !path.exists() {
            return Self::Absent;
        }

        let backup_path = backup_path_for(path);
        match fs::copy(path, &backup_path) {
            Ok(_) => {
                tracing::debug!("Backed up {} to {}", path.display(), backup_path.display());
                Self::Saved {
                    path: backup_path,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to create backup of {}: {e}; continuing without one",
                    path.display()
                );
                Self::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Location of the backup copy, if one was made.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Saved { path } => Some(path),
            Self::Absent | Self::Failed { .. } => None,
        }
    }

    /// Copies the backup bytes back over `target`.
    ///
    /// Restore failures are logged and reported in the returned status.
    pub fn restore(&self, target: &Path) -> RestoreStatus {
        match self {
            Self::Absent => RestoreStatus::NotNeeded,
            Self::Failed { .. } => RestoreStatus::NoBackup,
            Self::Saved { path } => {
                match fs::copy(path, target) {
                    Ok(_) => {
                        tracing::info!("Restored {} from {}", target.display(), path.display());
                        RestoreStatus::Restored
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to restore {} from {}: {e}",
                            target.display(),
                            path.display()
                        );
                        RestoreStatus::Failed(e.to_string())
                    }
                }
            }
        }
    }
}

/// `settings.json` → `settings.json.bak`, `.claude.json` → `.claude.json.bak`.
#[must_use]
pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map_or_else(OsString::new, OsString::from);
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

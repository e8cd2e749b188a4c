//! Read-mutate-write lifecycle for a single JSON configuration file.
//!
//! [`apply`] is best-effort on the way in and careful on the way out:
//!
//! 1. **Read**: a missing or empty file becomes `{}`. A file that cannot be read or
//!    parsed also becomes `{}`, with a warning logged and recorded on the outcome.
//!    A corrupt file never blocks installation.
//! 2. **Backup**: an existing file is copied to `<file>.bak` ([`Backup`]).
//! 3. **Mutate**: the caller's shape function edits the in-memory document. If it
//!    fails nothing is written.
//! 4. **Persist**: parent directories are created and the document is written
//!    atomically as 2-space indented JSON with a trailing newline.
//! 5. **Recover**: if persisting fails, the backup is copied back and the error
//!    carries the restore outcome.

use super::backup::Backup;
use super::shapes::ShapeError;
use crate::core::MutationError;
use crate::utils::fs::atomic_write;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Successful update of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// File that was written
    pub path: PathBuf,
    /// The file did not exist before
    pub created: bool,
    /// Set when existing content was discarded because it could not be read or parsed
    pub parse_warning: Option<String>,
    /// Where the previous content was saved, if anywhere
    pub backup_path: Option<PathBuf>,
}

/// A configuration document as loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    /// Parsed content, `{}` when missing, empty or unparsable
    pub document: Value,
    /// The file existed on disk
    pub existed: bool,
    /// Why existing content was discarded, if it was
    pub warning: Option<String>,
}

/// Loads `path` tolerantly. Never fails; problems become a warning and `{}`.
pub fn read_document(path: &Path) -> LoadedDocument {
    let empty = || Value::Object(Map::new());

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return LoadedDocument {
                document: empty(),
                existed: false,
                warning: None,
            };
        }
        Err(e) => {
            let warning = format!("Failed to read existing {}: {e}", path.display());
            tracing::warn!("{warning}; starting from an empty document");
            return LoadedDocument {
                document: empty(),
                existed: path.exists(),
                warning: Some(warning),
            };
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return LoadedDocument {
            document: empty(),
            existed: true,
            warning: None,
        };
    }

    match serde_json::from_slice(&bytes) {
        Ok(document) => LoadedDocument {
            document,
            existed: true,
            warning: None,
        },
        Err(e) => {
            let warning = format!("Failed to parse existing {}: {e}", path.display());
            tracing::warn!("{warning}; starting from an empty document");
            LoadedDocument {
                document: empty(),
                existed: true,
                warning: Some(warning),
            }
        }
    }
}

/// Applies `mutate` to the JSON document stored at `path`.
///
/// Errors are confined to this one file: [`MutationError::Shape`] when the shape
/// function refuses the document (the file is left as it was), and
/// [`MutationError::Write`] when persisting failed (after a restore attempt).
pub fn apply<F>(path: &Path, mutate: F) -> Result<ApplyOutcome, MutationError>
where
    F: FnOnce(&mut Value) -> Result<(), ShapeError>,
{
    let LoadedDocument {
        mut document,
        existed,
        warning,
    } = read_document(path);

    let backup = if existed {
        Backup::snapshot(path)
    } else {
        Backup::Absent
    };

    mutate(&mut document).map_err(|e| MutationError::Shape {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let persisted = serde_json::to_string_pretty(&document)
        .map_err(anyhow::Error::from)
        .and_then(|mut rendered| {
            rendered.push('\n');
            atomic_write(path, rendered.as_bytes())
        });

    if let Err(source) = persisted {
        tracing::warn!("Failed to write {}: {source:#}", path.display());
        let restore = backup.restore(path);
        return Err(MutationError::Write {
            path: path.to_path_buf(),
            restore,
            source,
        });
    }

    tracing::debug!("Updated {}", path.display());
    Ok(ApplyOutcome {
        path: path.to_path_buf(),
        created: !existed,
        parse_warning: warning,
        backup_path: backup.path().map(Path::to_path_buf),
    })
}

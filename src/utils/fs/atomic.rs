//! Atomic file writes using a temp-and-rename strategy.
//!
//! A configuration file either holds its old content or its new content, never a
//! partial write, as long as the rename itself succeeds. Symlinked files are
//! written through to the file they point at, and an existing file keeps its
//! permissions.

use crate::utils::fs::dirs::ensure_parent_dir;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically writes bytes to a file.
///
/// 1. Follows `path` if it is a symlink
/// 2. Creates missing parent directories
/// 3. Writes `content` to a uniquely named temp file in the same directory
/// 4. Copies the existing file's permissions onto it and syncs it to disk
/// 5. Renames it over the target
///
/// The temporary file is removed if any step fails. New files are created
/// readable by the owner only.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let target = crate::utils::platform::windows_long_path(&resolve_target(path));

    ensure_parent_dir(&target)?;

    let parent = target
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let existing_permissions = fs::metadata(&target).ok().map(|meta| meta.permissions());

    let prefix = temp_prefix(&target);
    let temp = tempfile::Builder::new().prefix(&prefix).suffix(".tmp").tempfile_in(parent);
    let mut temp = temp.with_context(|| {
        let platform_help = if crate::utils::platform::is_windows() {
            "On Windows: Check file permissions, path length, and that directory exists"
        } else {
            "Check file permissions and that directory exists"
        };

        format!("Failed to create temp file in: {}\n\n{}", parent.display(), platform_help)
    })?;

    temp.write_all(content)
        .with_context(|| format!("Failed to write to temp file: {}", temp.path().display()))?;

    if let Some(permissions) = existing_permissions {
        temp.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("Failed to copy permissions of {}", target.display()))?;
    }

    temp.as_file().sync_all().with_context(|| "Failed to sync file to disk")?;

    temp.persist(&target)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", target.display()))?;

    Ok(())
}

/// The file a write to `path` should land in: the link target for symlinks,
/// `path` itself otherwise. Dangling links resolve to where they point.
fn resolve_target(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => fs::canonicalize(path)
            .or_else(|_| {
                fs::read_link(path).map(|link| match path.parent() {
                    Some(parent) => parent.join(link),
                    None => link,
                })
            })
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

/// `.claude.json` → `..claude.json.` (temp files are `<prefix>XXXXXX.tmp`)
fn temp_prefix(target: &Path) -> String {
    let name = target.file_name().map_or_else(
        || "file".to_string(),
        |name| name.to_string_lossy().into_owned(),
    );
    format!(".{name}.")
}

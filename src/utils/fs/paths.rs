//! Path discovery helpers.

use crate::constants::PROJECT_MARKER;
use std::path::{Path, PathBuf};

/// Finds the server's source checkout by walking up from `start`.
///
/// Returns the first ancestor (including `start`) that contains [`PROJECT_MARKER`],
/// or `start` itself when no ancestor does.
#[must_use]
pub fn find_project_root(start: &Path) -> PathBuf {
    let mut current = std::path::absolute(start).unwrap_or_else(|_| start.to_path_buf());

    loop {
        if current.join(PROJECT_MARKER).exists() {
            tracing::debug!("Project root found at {}", current.display());
            return current;
        }

        if !current.pop() {
            tracing::debug!(
                "No {PROJECT_MARKER} above {}, using it as project root",
                start.display()
            );
            return start.to_path_buf();
        }
    }
}

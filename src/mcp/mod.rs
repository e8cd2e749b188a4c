//! MCP server configuration merge engine.
//!
//! This module updates third-party configuration files with MCP server entries
//! without disturbing anything else they contain:
//! - [`McpServerEntry`] is the canonical `{command, args, env}` object
//! - [`TargetShape`] adapters know where each consumer keeps its servers
//! - [`apply`] owns the tolerant read, backup, mutate, atomic write and restore
//!   lifecycle for one file
//!
//! Updates are upserts keyed by server name, so re-running the installer for the
//! same name is idempotent.

pub mod backup;
pub mod models;
pub mod mutator;
pub mod shapes;

#[cfg(test)]
mod tests;

pub use backup::{Backup, backup_path_for};
pub use models::McpServerEntry;
pub use mutator::{ApplyOutcome, LoadedDocument, apply, read_document};
pub use shapes::{ShapeError, TargetShape};

use std::path::Path;

/// Upserts `entry` as `name` into the file at `path` using `shape`.
pub fn upsert_server(
    path: &Path,
    shape: TargetShape,
    name: &str,
    entry: &McpServerEntry,
) -> Result<ApplyOutcome, crate::core::MutationError> {
    tracing::debug!("Writing server '{name}' to {} as {shape:?}", path.display());
    apply(path, |document| shape.apply(document, name, entry))
}

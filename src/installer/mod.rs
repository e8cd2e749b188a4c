//! Writes every selected server into every selected target.
//!
//! # Installation Process
//!
//! 1. **Preparation**: names are checked for duplicates and each record's
//!    invocation and entry are built. A missing local binary aborts the run here,
//!    before any file is touched.
//! 2. **Targets**: each (server, target) pair is planned and upserted through
//!    [`upsert_server`]. VS Code tries the workspace file first and, if that write
//!    fails for any reason, the user settings file once.
//! 3. **Tally**: every pair produces a [`PairResult`]. A failing pair never stops
//!    the others; the caller decides the exit status from [`InstallReport`].
//!
//! Pairs are processed sequentially. Each upsert owns its document and backup.

use crate::constants::DOCKER_COMMAND;
use crate::core::{InstallerError, MutationError};
use crate::mcp::{ApplyOutcome, McpServerEntry, upsert_server};
use crate::server::{
    InvocationMode, InvocationSettings, ServerRecord, apply_read_only, build_invocation, entry_for,
    ensure_unique_names,
};
use crate::targets::{PlatformDirs, Target, TargetPlan};
use std::path::{Path, PathBuf};


/// Run-level values shared by every server in one installation.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Directory holding `bin/<binary>` for local mode
    pub project_root: PathBuf,
    /// Binary and image names
    pub invocation: InvocationSettings,
    /// Base directories for target paths
    pub platform: PlatformDirs,
}

/// A record together with the entry written for it.
#[derive(Debug, Clone)]
pub struct PreparedServer {
    /// Validated input
    pub record: ServerRecord,
    /// Entry upserted into every target
    pub entry: McpServerEntry,
}

/// Why one (server, target) pair failed.
#[derive(Debug, thiserror::Error)]
pub enum PairFailure {
    /// The target's file location could not be determined
    #[error(transparent)]
    Unavailable(#[from] InstallerError),
    /// Reading, shaping or writing the file failed
    #[error(transparent)]
    Mutation(#[from] MutationError),
}

/// A successful upsert.
#[derive(Debug)]
pub struct Configured {
    /// What the mutator did
    pub outcome: ApplyOutcome,
    /// Primary-file error when the fallback file was used instead
    pub fallback_from: Option<MutationError>,
}

/// Result for one (server, target) pair.
#[derive(Debug)]
pub struct PairResult {
    /// Server name
    pub server: String,
    /// Target written
    pub target: Target,
    /// Outcome of the write
    pub result: Result<Configured, PairFailure>,
}

/// Final tally of an installation.
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Servers in input order
    pub servers: Vec<PreparedServer>,
    /// One entry per (server, target) pair, server-major
    pub pairs: Vec<PairResult>,
    /// Container mode was requested but `docker` is not on `PATH`
    pub docker_missing: bool,
}

impl InstallReport {
    /// Number of pairs written.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.pairs.iter().filter(|pair| pair.result.is_ok()).count()
    }

    /// Number of pairs that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.pairs.len() - self.succeeded()
    }

    /// Whether at least one pair was written.
    #[must_use]
    pub fn any_succeeded(&self) -> bool {
        self.succeeded() > 0
    }
}

/// Builds the entry for every record.
///
/// # Errors
///
/// Returns the first duplicate name or missing local binary. Nothing has been
/// written when this fails.
pub fn prepare_servers(
    records: Vec<ServerRecord>,
    project_root: &Path,
    settings: &InvocationSettings,
) -> Result<Vec<PreparedServer>, InstallerError> {
    ensure_unique_names(&records)?;

    records
        .into_iter()
        .map(|record| {
            let mut invocation = build_invocation(&record, project_root, settings)?;
            if record.read_only {
                apply_read_only(&mut invocation, record.mode);
            }
            let entry = entry_for(&record, invocation);
            tracing::debug!("Prepared entry for '{}': {entry:?}", record.name);
            Ok(PreparedServer {
                record,
                entry,
            })
        })
        .collect()
}

/// Upserts `name → entry` into one target, falling back once when a fallback exists.
pub fn configure_target(
    plan: &TargetPlan,
    name: &str,
    entry: &McpServerEntry,
) -> Result<Configured, MutationError> {
    let primary = &plan.primary;
    match upsert_server(&primary.path, primary.shape, name, entry) {
        Ok(outcome) => Ok(Configured {
            outcome,
            fallback_from: None,
        }),
        Err(error) => {
            let Some(fallback) = &plan.fallback else {
                return Err(error);
            };
            tracing::warn!(
                "{} write to {} failed ({error}), trying {}",
                plan.target,
                primary.path.display(),
                fallback.path.display()
            );
            let outcome = upsert_server(&fallback.path, fallback.shape, name, entry)?;
            Ok(Configured {
                outcome,
                fallback_from: Some(error),
            })
        }
    }
}

/// Whether the docker CLI can be found on `PATH`.
#[must_use]
pub fn docker_available() -> bool {
    which::which(DOCKER_COMMAND).is_ok()
}

/// Runs a full installation.
///
/// # Errors
///
/// Only preparation errors are returned; per-pair failures are recorded in the
/// report.
pub fn install(
    records: Vec<ServerRecord>,
    targets: &[Target],
    settings: &RunSettings,
) -> Result<InstallReport, InstallerError> {
    let servers = prepare_servers(records, &settings.project_root, &settings.invocation)?;

    let docker_missing = servers.iter().any(|server| server.record.mode == InvocationMode::Container)
        && !docker_available();
    if docker_missing {
        tracing::warn!("`{DOCKER_COMMAND}` was not found on PATH");
    }

    let mut pairs = Vec::with_capacity(servers.len() * targets.len());
    for server in &servers {
        tracing::debug!("Configuring server '{}'", server.record.name);
        for &target in targets {
            let result = settings
                .platform
                .plan(target)
                .map_err(PairFailure::from)
                .and_then(|plan| {
                    configure_target(&plan, &server.record.name, &server.entry)
                        .map_err(PairFailure::from)
                });

            match &result {
                Ok(_) => tracing::debug!("{target} configured for '{}'", server.record.name),
                Err(e) => tracing::warn!("{target} failed for '{}': {e}", server.record.name),
            }

            pairs.push(PairResult {
                server: server.record.name.clone(),
                target,
                result,
            });
        }
    }

    Ok(InstallReport {
        servers,
        pairs,
        docker_missing,
    })
}

//! Builds the runtime invocation and the final entry for a server record.
//!
//! The pipeline for one record is:
//!
//! 1. [`build_invocation`]: the command and fixed arguments for its mode
//! 2. [`apply_read_only`]: read-only environment and, for containers, the
//!    pass-through flag before the image argument
//! 3. [`entry_for`]: adds the token and (non-default) host to produce the
//!    [`McpServerEntry`] written into targets

use super::{InvocationMode, ServerRecord};
use crate::constants::{
    DEFAULT_BINARY_NAME, DEFAULT_DOCKER_IMAGE, DOCKER_COMMAND, ENV_HOST, ENV_READ_ONLY, ENV_TOKEN,
    STDIO_ARG,
};
use crate::core::InstallerError;
use crate::mcp::McpServerEntry;
use std::collections::BTreeMap;
use std::path::Path;

/// Environment-specific constants the invocation is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSettings {
    /// Binary file name under `<project root>/bin`
    pub binary_name: String,
    /// Image tag passed to `docker run`
    pub docker_image: String,
}

impl Default for InvocationSettings {
    fn default() -> Self {
        Self {
            binary_name: DEFAULT_BINARY_NAME.to_string(),
            docker_image: DEFAULT_DOCKER_IMAGE.to_string(),
        }
    }
}

/// Command line and environment an editor uses to start the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInvocation {
    /// Executable
    pub command: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Environment variables
    pub env: BTreeMap<String, String>,
}

/// Builds the invocation for `record`'s mode.
///
/// Local mode requires `<project_root>/bin/<binary>` to exist; otherwise
/// [`InstallerError::BinaryNotFound`] is returned and no invocation is produced.
pub fn build_invocation(
    record: &ServerRecord,
    project_root: &Path,
    settings: &InvocationSettings,
) -> Result<RuntimeInvocation, InstallerError> {
    match record.mode {
        InvocationMode::Local => {
            let binary = project_root.join("bin").join(&settings.binary_name);
            if !binary.is_file() {
                return Err(InstallerError::BinaryNotFound {
                    path: binary,
                });
            }

            let absolute = std::path::absolute(&binary).map_err(|e| InstallerError::Other {
                message: format!("Failed to resolve {}: {e}", binary.display()),
            })?;
            tracing::debug!("Using local server binary {}", absolute.display());

            Ok(RuntimeInvocation {
                command: absolute.to_string_lossy().into_owned(),
                args: vec![STDIO_ARG.to_string()],
                env: BTreeMap::new(),
            })
        }
        InvocationMode::Container => {
            let args = ["run", "-i", "--rm", "-e", ENV_TOKEN, "-e", ENV_HOST]
                .into_iter()
                .map(str::to_string)
                .chain(std::iter::once(settings.docker_image.clone()))
                .collect();

            Ok(RuntimeInvocation {
                command: DOCKER_COMMAND.to_string(),
                args,
                env: BTreeMap::new(),
            })
        }
    }
}

/// Switches an invocation to read-only.
///
/// Sets `GITLAB_READ_ONLY=true`; container invocations also get `-e
/// GITLAB_READ_ONLY` right before the trailing image argument so docker passes
/// the variable through.
pub fn apply_read_only(invocation: &mut RuntimeInvocation, mode: InvocationMode) {
    if mode == InvocationMode::Container {
        let image_index = invocation.args.len().saturating_sub(1);
        invocation.args.splice(
            image_index..image_index,
            ["-e".to_string(), ENV_READ_ONLY.to_string()],
        );
    }
    invocation.env.insert(ENV_READ_ONLY.to_string(), "true".to_string());
}

/// Produces the entry for `record` from its prepared invocation.
///
/// `GITLAB_TOKEN` is always set; `GITLAB_HOST` only for non-default hosts.
#[must_use]
pub fn entry_for(record: &ServerRecord, invocation: RuntimeInvocation) -> McpServerEntry {
    let RuntimeInvocation {
        command,
        args,
        mut env,
    } = invocation;

    env.insert(ENV_TOKEN.to_string(), record.token.expose().to_string());
    if !record.uses_default_host() {
        env.insert(ENV_HOST.to_string(), record.host.clone());
    }

    McpServerEntry {
        command,
        args,
        env,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::Token;
    use tempfile::tempdir;

    fn record(mode: InvocationMode, read_only: bool, host: &str) -> ServerRecord {
        ServerRecord::new("gitlab", host, Token::new("glpat-t"), read_only, mode).unwrap()
    }

    fn project_with_binary() -> tempfile::TempDir {
        let temp = tempdir().unwrap();
        let bin = temp.path().join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        std::fs::write(bin.join(DEFAULT_BINARY_NAME), "#!/bin/sh\n").unwrap();
        temp
    }

    #[test]
    fn test_local_invocation_uses_absolute_binary_path() {
        let project = project_with_binary();

        let invocation = build_invocation(
            &record(InvocationMode::Local, false, ""),
            project.path(),
            &InvocationSettings::default(),
        )
        .unwrap();

        let command = Path::new(&invocation.command);
        assert!(command.is_absolute());
        assert!(command.ends_with(Path::new("bin").join(DEFAULT_BINARY_NAME)));
        assert_eq!(invocation.args, vec!["stdio"]);
        assert!(invocation.env.is_empty());
    }

    #[test]
    fn test_local_invocation_missing_binary() {
        let project = tempdir().unwrap();

        let result = build_invocation(
            &record(InvocationMode::Local, false, ""),
            project.path(),
            &InvocationSettings::default(),
        );

        match result {
            Err(InstallerError::BinaryNotFound { path }) => {
                assert_eq!(path, project.path().join("bin").join(DEFAULT_BINARY_NAME));
            }
            other => panic!("expected BinaryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_container_invocation() {
        let invocation = build_invocation(
            &record(InvocationMode::Container, false, ""),
            Path::new("/nonexistent"),
            &InvocationSettings::default(),
        )
        .unwrap();

        assert_eq!(invocation.command, "docker");
        assert_eq!(
            invocation.args,
            vec!["run", "-i", "--rm", "-e", "GITLAB_TOKEN", "-e", "GITLAB_HOST", "gitlab-mcp-server:latest"]
        );
    }

    #[test]
    fn test_container_invocation_uses_configured_image() {
        let settings = InvocationSettings {
            docker_image: "registry.example.com/gitlab-mcp:1.2".to_string(),
            ..InvocationSettings::default()
        };
        let invocation = build_invocation(
            &record(InvocationMode::Container, false, ""),
            Path::new("."),
            &settings,
        )
        .unwrap();

        assert_eq!(invocation.args.last().unwrap(), "registry.example.com/gitlab-mcp:1.2");
    }

    #[test]
    fn test_read_only_local_sets_env() {
        let project = project_with_binary();
        let record = record(InvocationMode::Local, true, "");
        let mut invocation =
            build_invocation(&record, project.path(), &InvocationSettings::default()).unwrap();

        apply_read_only(&mut invocation, record.mode);
        let entry = entry_for(&record, invocation);

        assert_eq!(entry.env.get("GITLAB_READ_ONLY").map(String::as_str), Some("true"));
        assert_eq!(entry.args, vec!["stdio"]);
    }

    #[test]
    fn test_read_only_container_inserts_flag_before_image() {
        let record = record(InvocationMode::Container, true, "");
        let mut invocation =
            build_invocation(&record, Path::new("."), &InvocationSettings::default()).unwrap();

        apply_read_only(&mut invocation, record.mode);

        let args = &invocation.args;
        let n = args.len();
        assert_eq!(args[n - 1], "gitlab-mcp-server:latest");
        assert_eq!(args[n - 3..n - 1], ["-e", "GITLAB_READ_ONLY"]);
        assert_eq!(invocation.env.get("GITLAB_READ_ONLY").map(String::as_str), Some("true"));
    }

    #[test]
    fn test_entry_for_default_host_omits_host_env() {
        let record = record(InvocationMode::Container, false, "");
        let invocation =
            build_invocation(&record, Path::new("."), &InvocationSettings::default()).unwrap();

        let entry = entry_for(&record, invocation);

        assert_eq!(entry.env.get("GITLAB_TOKEN").map(String::as_str), Some("glpat-t"));
        assert!(!entry.env.contains_key("GITLAB_HOST"));
        assert!(!entry.env.contains_key("GITLAB_READ_ONLY"));
    }

    #[test]
    fn test_entry_for_custom_host() {
        let record = record(InvocationMode::Container, false, "https://gitlab.internal");
        let invocation =
            build_invocation(&record, Path::new("."), &InvocationSettings::default()).unwrap();

        let entry = entry_for(&record, invocation);

        assert_eq!(
            entry.env.get("GITLAB_HOST").map(String::as_str),
            Some("https://gitlab.internal")
        );
    }
}

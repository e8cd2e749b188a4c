//! User-wide installer configuration.
//!
//! Stored at `~/.gitlab-mcp-installer/config.toml` (`%LOCALAPPDATA%\gitlab-mcp-installer\config.toml`
//! on Windows). Every field is optional; a missing file yields the defaults.
//!
//! ```toml
//! binary_name = "gitlab-mcp-server"
//! docker_image = "registry.example.com/gitlab-mcp-server:1.4"
//! default_host = "https://gitlab.com"
//! default_mode = "container"
//! targets = ["vscode", "claude-code"]
//!
//! [servers.work]
//! host = "https://gitlab.example.com"
//! token_env = "WORK_GITLAB_TOKEN"
//!
//! [servers.personal]
//! read_only = true
//! ```
//!
//! Tokens are never stored here. A `[servers.<name>]` table names the
//! environment variable the token is read from (`GITLAB_TOKEN` by default).

use crate::constants::{
    CONFIG_PATH_ENV, DEFAULT_BINARY_NAME, DEFAULT_DOCKER_IMAGE, DEFAULT_GITLAB_HOST, ENV_TOKEN,
};
use crate::core::InstallerError;
use crate::server::{InvocationMode, InvocationSettings, ServerRecord, Token};
use crate::targets::Target;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;

fn default_binary_name() -> String {
    DEFAULT_BINARY_NAME.to_string()
}

fn default_docker_image() -> String {
    DEFAULT_DOCKER_IMAGE.to_string()
}

fn default_host() -> String {
    DEFAULT_GITLAB_HOST.to_string()
}

fn default_targets() -> Vec<Target> {
    Target::ALL.to_vec()
}

/// Installer settings loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallerConfig {
    /// Binary looked up under `<project root>/bin` in local mode
    #[serde(default = "default_binary_name")]
    pub binary_name: String,

    /// Image used in container mode
    #[serde(default = "default_docker_image")]
    pub docker_image: String,

    /// Host offered when none is given
    #[serde(default = "default_host")]
    pub default_host: String,

    /// Mode used when none is given
    #[serde(default)]
    pub default_mode: InvocationMode,

    /// Targets configured when none are selected
    #[serde(default = "default_targets")]
    pub targets: Vec<Target>,

    /// Servers installed by `install --from-config`, keyed by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub servers: BTreeMap<String, ServerSpec>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            binary_name: default_binary_name(),
            docker_image: default_docker_image(),
            default_host: default_host(),
            default_mode: InvocationMode::default(),
            targets: default_targets(),
            servers: BTreeMap::new(),
        }
    }
}

/// A `[servers.<name>]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSpec {
    /// GitLab instance; falls back to `default_host`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Restrict to read-only tools
    #[serde(default)]
    pub read_only: bool,

    /// Environment variable holding the token; `GITLAB_TOKEN` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Overrides `default_mode` for this server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<InvocationMode>,
}

impl InstallerConfig {
    /// Loads from `path` if given, else from the `GITLAB_MCP_INSTALLER_CONFIG`
    /// variable, else from [`Self::default_path`]. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path.or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)) {
            Some(path) => path,
            None => match Self::default_path() {
                Ok(path) => path,
                Err(e) => {
                    tracing::debug!("No default config location: {e}");
                    return Ok(Self::default());
                }
            },
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!("Config file {} not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid config TOML.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Default config location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or, on Windows, local data) directory is unknown.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("gitlab-mcp-installer")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".gitlab-mcp-installer")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Binary and image names the entry builder uses.
    #[must_use]
    pub fn invocation_settings(&self) -> InvocationSettings {
        InvocationSettings {
            binary_name: self.binary_name.clone(),
            docker_image: self.docker_image.clone(),
        }
    }

    /// Builds records for every `[servers.<name>]` table, in name order.
    ///
    /// `lookup` resolves environment variables; tokens come from each table's
    /// `token_env` (or `GITLAB_TOKEN`).
    ///
    /// # Errors
    ///
    /// Fails on the first invalid name or unset/empty token variable.
    pub fn server_records(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Vec<ServerRecord>, InstallerError> {
        self.servers
            .iter()
            .map(|(name, spec)| {
                let variable = spec.token_env.as_deref().unwrap_or(ENV_TOKEN);
                let token = lookup(variable).ok_or_else(|| InstallerError::Other {
                    message: format!(
                        "Server '{name}' reads its token from {variable}, which is not set"
                    ),
                })?;

                ServerRecord::new(
                    name,
                    spec.host.as_deref().unwrap_or(&self.default_host),
                    Token::new(token),
                    spec.read_only,
                    spec.mode.unwrap_or(self.default_mode),
                )
            })
            .collect()
    }
}

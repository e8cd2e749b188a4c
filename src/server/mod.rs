//! Validated GitLab MCP server records and the entries built from them.
//!
//! A [`ServerRecord`] is what input collection produces for each server: its
//! name, GitLab host, access token, read-only flag and how editors should launch
//! it. The [`invocation`] module turns a record into the `command`/`args`/`env`
//! triple that is written into every target.

pub mod invocation;

pub use invocation::{
    InvocationSettings, RuntimeInvocation, apply_read_only, build_invocation, entry_for,
};

use crate::constants::DEFAULT_GITLAB_HOST;
use crate::core::InstallerError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// How editors launch the server.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum InvocationMode {
    /// The compiled binary in `<project root>/bin`
    #[default]
    Local,
    /// `docker run` of the server image
    #[serde(alias = "docker")]
    #[value(alias = "docker")]
    Container,
}

impl fmt::Display for InvocationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "Local binary"),
            Self::Container => write!(f, "Docker"),
        }
    }
}

/// GitLab access token. Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wraps a token, trimming surrounding whitespace.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// The raw token, for embedding into a server entry.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// One server to configure. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRecord {
    /// Key the entry is stored under in every target
    pub name: String,
    /// GitLab instance URL
    pub host: String,
    /// Personal access token
    pub token: Token,
    /// Restrict the server to read-only tools
    pub read_only: bool,
    /// How editors launch the server
    pub mode: InvocationMode,
}

impl ServerRecord {
    /// Validates and builds a record.
    ///
    /// The name is trimmed and checked with [`validate_server_name`]; an empty host
    /// becomes [`DEFAULT_GITLAB_HOST`]; the token must not be empty.
    pub fn new(
        name: &str,
        host: &str,
        token: Token,
        read_only: bool,
        mode: InvocationMode,
    ) -> Result<Self, InstallerError> {
        let name = validate_server_name(name)?;
        if token.is_empty() {
            return Err(InstallerError::EmptyToken {
                name,
            });
        }

        let host = host.trim().trim_end_matches('/');
        let host = if host.is_empty() {
            DEFAULT_GITLAB_HOST.to_string()
        } else {
            host.to_string()
        };

        Ok(Self {
            name,
            host,
            token,
            read_only,
            mode,
        })
    }

    /// Whether the record points at the default public GitLab instance.
    #[must_use]
    pub fn uses_default_host(&self) -> bool {
        self.host == DEFAULT_GITLAB_HOST
    }
}

/// Checks a server name and returns it trimmed.
///
/// Names key JSON objects and are typed into editor UIs, so they must be
/// non-empty and free of whitespace.
pub fn validate_server_name(name: &str) -> Result<String, InstallerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(InstallerError::EmptyServerName);
    }

    if name.chars().any(char::is_whitespace) {
        return Err(InstallerError::InvalidServerName {
            name: name.to_string(),
            reason: "whitespace is not allowed".to_string(),
        });
    }

    Ok(name.to_string())
}

/// Fails on the first name that appears twice.
pub fn ensure_unique_names(records: &[ServerRecord]) -> Result<(), InstallerError> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.name.as_str()) {
            return Err(InstallerError::DuplicateServerName {
                name: record.name.clone(),
            });
        }
    }
    Ok(())
}

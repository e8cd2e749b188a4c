//! Error types and user-facing error presentation.
//!
//! Two error families exist:
//!
//! - [`InstallerError`] covers run-level failures: bad input, a missing server
//!   binary, an unresolvable target path. [`InstallerError::BinaryNotFound`] is the
//!   only variant that halts a whole run.
//! - [`MutationError`] covers the failure of one configuration file update. These
//!   are isolated to the file they concern; the installer keeps processing the
//!   remaining targets and servers.
//!
//! Problems the merge engine recovers from on its own (unparsable existing files,
//! failed backups) are not errors at all: they are logged with `tracing::warn!` and
//! recorded on the [`ApplyOutcome`](crate::mcp::ApplyOutcome).
//!
//! [`user_friendly_error`] turns any `anyhow::Error` reaching `main` into an
//! [`ErrorContext`] with details and a suggestion, printed in colour.

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Run-level errors raised while collecting input or preparing entries.
#[derive(Error, Debug, Clone)]
pub enum InstallerError {
    /// The local server binary does not exist under the project root.
    #[error("Server binary not found at {path}")]
    BinaryNotFound {
        /// Path that was probed
        path: PathBuf,
    },

    /// A server name was empty after trimming.
    #[error("Server name cannot be empty")]
    EmptyServerName,

    /// A server name contains characters the targets cannot key on.
    #[error("Invalid server name '{name}': {reason}")]
    InvalidServerName {
        /// Offending name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Two servers in one run share a name.
    #[error("Server '{name}' already configured in this run")]
    DuplicateServerName {
        /// Name that appeared twice
        name: String,
    },

    /// No access token was supplied for a server.
    #[error("Access token for server '{name}' cannot be empty")]
    EmptyToken {
        /// Server missing a token
        name: String,
    },

    /// A platform path for a target could not be determined.
    #[error("Configuration path for {target} is not available on this platform")]
    PathUnavailable {
        /// Display name of the target
        target: String,
    },

    /// Catch-all for conditions with no dedicated variant.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Whether a backup was put back after a failed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreStatus {
    /// The file did not exist beforehand, so there was nothing to restore.
    NotNeeded,
    /// No backup could be taken before the write.
    NoBackup,
    /// The original bytes were written back.
    Restored,
    /// Restoring failed; the file may be partially written or missing.
    Failed(String),
}

impl fmt::Display for RestoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotNeeded => write!(f, "no previous file to restore"),
            Self::NoBackup => write!(f, "no backup was available to restore"),
            Self::Restored => write!(f, "previous contents restored"),
            Self::Failed(reason) => write!(f, "restore failed: {reason}"),
        }
    }
}

/// Failure to update a single configuration file.
#[derive(Error, Debug)]
pub enum MutationError {
    /// The document could not take the entry without overwriting user data.
    #[error("Cannot update {path}: {reason}")]
    Shape {
        /// File being updated
        path: PathBuf,
        /// What the adapter refused to overwrite
        reason: String,
    },

    /// Serializing or persisting the document failed.
    #[error("Failed to write {path} ({restore}): {source}")]
    Write {
        /// File being updated
        path: PathBuf,
        /// Outcome of the restore attempt
        restore: RestoreStatus,
        /// Underlying cause
        #[source]
        source: anyhow::Error,
    },
}

impl MutationError {
    /// Path of the file the failed mutation was aimed at.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Shape { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// Error wrapper carrying optional details and a suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    /// The error message shown first
    pub message: String,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no details or suggestion.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: message in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with actionable suggestions.
///
/// Walks the error chain looking for an [`InstallerError`] or an I/O error and
/// falls back to the top-level message with its causes as details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(installer_error) = cause.downcast_ref::<InstallerError>() {
            return create_error_context(installer_error);
        }

        if let Some(mutation_error) = cause.downcast_ref::<MutationError>() {
            return ErrorContext::new(mutation_error.to_string()).with_suggestion(format!(
                "Check permissions on {} and that its parent directory is writable",
                mutation_error.path().display()
            ));
        }

        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            match io_error.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    return ErrorContext::new(error.to_string())
                        .with_details(io_error.to_string())
                        .with_suggestion("Check file ownership and permissions");
                }
                std::io::ErrorKind::NotFound => {
                    return ErrorContext::new(error.to_string())
                        .with_details(io_error.to_string())
                        .with_suggestion(
                            "Check that the file or directory exists and the path is correct",
                        );
                }
                _ => {}
            }
        }

        if cause.downcast_ref::<toml::de::Error>().is_some() {
            return ErrorContext::new(error.to_string())
                .with_details(cause.to_string())
                .with_suggestion("Check the installer config file for TOML syntax errors");
        }

        if cause.downcast_ref::<inquire::InquireError>().is_some() {
            return ErrorContext::new("Installation cancelled");
        }
    }

    let details: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let context = ErrorContext::new(error.to_string());
    if details.is_empty() {
        context
    } else {
        context.with_details(details.join(": "))
    }
}

fn create_error_context(error: &InstallerError) -> ErrorContext {
    let context = ErrorContext::new(error.to_string());
    match error {
        InstallerError::BinaryNotFound { .. } => context
            .with_suggestion("Run 'make build' first, or install with --mode container")
            .with_details("Local mode points editors at the compiled server binary in <project>/bin"),
        InstallerError::DuplicateServerName { .. } => {
            context.with_suggestion("Give every server a different name")
        }
        InstallerError::EmptyToken { .. } => context
            .with_suggestion("Pass --token, set GITLAB_TOKEN, or set token_env in the config file"),
        InstallerError::PathUnavailable { .. } => {
            context.with_details("The home or application data directory could not be determined")
        }
        InstallerError::EmptyServerName
        | InstallerError::InvalidServerName { .. }
        | InstallerError::Other { .. } => context,
    }
}

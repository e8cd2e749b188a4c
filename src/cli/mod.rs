//! Command-line interface for the GitLab MCP installer.
//!
//! # Commands
//!
//! - `install` - Register one or more GitLab MCP servers in editor configs
//! - `list` - Show the servers each target currently knows about
//! - `paths` - Print where each target's configuration lives
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging on stderr
//! - `--quiet` / `-q` - No logging
//! - `--config` / `-c` - Use a specific `config.toml`
//!
//! `RUST_LOG` overrides the level chosen by the flags.

mod install;
mod list;
mod paths;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::InstallerConfig;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter directive; `None` disables logging
    pub log_level: Option<String>,
    /// Explicit config file
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Installs the global tracing subscriber writing to stderr.
    ///
    /// `RUST_LOG` wins over the level chosen by the flags.
    pub fn init_logging(&self) {
        let filter = match (std::env::var("RUST_LOG").is_ok(), &self.log_level) {
            (true, _) => EnvFilter::from_default_env(),
            (false, Some(level)) => EnvFilter::new(level),
            (false, None) => return,
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Registers GitLab MCP servers with VS Code, Claude Desktop, Claude Code and Cursor.
#[derive(Parser)]
#[command(
    name = "gitlab-mcp-install",
    about = "Register GitLab MCP servers with editors and desktop apps",
    version,
    long_about = "Adds GitLab MCP server entries to VS Code, Claude Desktop, Claude Code and \
                  Cursor configuration files without touching anything else in them. \
                  Existing files are backed up to <file>.bak before they are changed."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable logging
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the installer config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add GitLab MCP servers to the selected targets
    Install(install::InstallCommand),

    /// List servers configured in each target
    List(list::ListCommand),

    /// Show configuration file locations
    Paths(paths::PathsCommand),
}

impl Cli {
    /// Runs the parsed command.
    ///
    /// # Errors
    ///
    /// Returns config loading errors and whatever the command fails with.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();

        let installer_config = InstallerConfig::load_with_optional(config.config_path.clone()).await?;

        match self.command {
            Commands::Install(cmd) => cmd.execute(&installer_config, self.quiet),
            Commands::List(cmd) => cmd.execute(&installer_config),
            Commands::Paths(cmd) => cmd.execute(),
        }
    }

    /// Maps the global flags to a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("error".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }
}

//! The `install` command.
//!
//! Servers come from one of three sources:
//!
//! - **Prompts** (default on a terminal when neither `--name` nor `--token` is given)
//! - **Flags**: `--name`, `--token` (or `GITLAB_TOKEN`), `--host`, `--read-only`, `--mode`
//! - **Config**: `--from-config` installs every `[servers.<name>]` table
//!
//! Targets default to the config file's `targets` list (all targets unless set).

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::config::InstallerConfig;
use crate::constants::{DEFAULT_SERVER_NAME, ENV_TOKEN};
use crate::installer::{self, InstallReport, RunSettings};
use crate::prompts::{self, InstallRequest, PromptDefaults};
use crate::server::{InvocationMode, ServerRecord, Token};
use crate::targets::{PlatformDirs, Target};
use crate::utils::fs::find_project_root;

/// Add GitLab MCP servers to the selected targets.
#[derive(Args, Debug)]
pub struct InstallCommand {
    /// Server name used as the entry key
    #[arg(long, conflicts_with = "from_config")]
    pub name: Option<String>,

    /// GitLab personal access token
    #[arg(long, env = ENV_TOKEN, hide_env_values = true)]
    pub token: Option<String>,

    /// GitLab instance URL
    #[arg(long, conflicts_with = "from_config")]
    pub host: Option<String>,

    /// Restrict the server to read-only tools
    #[arg(long, conflicts_with = "from_config")]
    pub read_only: bool,

    /// How editors start the server
    #[arg(long, value_enum)]
    pub mode: Option<InvocationMode>,

    /// Targets to configure (repeatable or comma-separated)
    #[arg(long = "target", value_enum, value_delimiter = ',')]
    pub targets: Vec<Target>,

    /// Install the servers declared in the config file
    #[arg(long)]
    pub from_config: bool,

    /// Directory containing `bin/<binary>` (defaults to the nearest `go.mod` ancestor)
    #[arg(long)]
    pub project_root: Option<PathBuf>,
}

impl InstallCommand {
    /// Collects servers, writes every target and prints the results.
    ///
    /// # Errors
    ///
    /// Fails on invalid input, a missing local binary, or when no target was
    /// written.
    pub fn execute(self, config: &InstallerConfig, quiet: bool) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let project_root = match &self.project_root {
            Some(root) => root.clone(),
            None => find_project_root(&cwd),
        };

        if !quiet {
            println!("{}", "GitLab MCP Server Installer".bold());
        }

        let request = self.collect(config)?;
        if request.targets.is_empty() {
            bail!("No targets selected");
        }

        let settings = RunSettings {
            project_root,
            invocation: config.invocation_settings(),
            platform: PlatformDirs::detect(&cwd),
        };
        let report = installer::install(request.servers, &request.targets, &settings)?;

        print_report(&report, &request.targets, config);

        if !report.any_succeeded() {
            bail!("No configuration files were updated");
        }
        Ok(())
    }

    fn collect(&self, config: &InstallerConfig) -> Result<InstallRequest> {
        let mut request = if self.from_config {
            if config.servers.is_empty() {
                bail!("The config file declares no [servers.<name>] tables");
            }
            let mut servers = config.server_records(|variable| std::env::var(variable).ok())?;
            if let Some(mode) = self.mode {
                servers.iter_mut().for_each(|server| server.mode = mode);
            }
            InstallRequest {
                servers,
                targets: Vec::new(),
            }
        } else if self.name.is_none() && self.token.is_none() && std::io::stdin().is_terminal() {
            let defaults = PromptDefaults {
                host: config.default_host.clone(),
                mode: self.mode.unwrap_or(config.default_mode),
                targets: self.targets_or(config),
            };
            return prompts::collect_interactive(&defaults);
        } else {
            let Some(token) = &self.token else {
                bail!("A token is required: pass --token or set {ENV_TOKEN}");
            };
            let record = ServerRecord::new(
                self.name.as_deref().unwrap_or(DEFAULT_SERVER_NAME),
                self.host.as_deref().unwrap_or(&config.default_host),
                Token::new(token.as_str()),
                self.read_only,
                self.mode.unwrap_or(config.default_mode),
            )?;
            InstallRequest {
                servers: vec![record],
                targets: Vec::new(),
            }
        };

        request.targets = self.targets_or(config);
        Ok(request)
    }

    fn targets_or(&self, config: &InstallerConfig) -> Vec<Target> {
        let mut targets = if self.targets.is_empty() {
            config.targets.clone()
        } else {
            self.targets.clone()
        };
        let mut seen = Vec::with_capacity(targets.len());
        targets.retain(|target| {
            let first = !seen.contains(target);
            seen.push(*target);
            first
        });
        targets
    }
}

fn print_report(report: &InstallReport, targets: &[Target], config: &InstallerConfig) {
    if report.docker_missing {
        println!(
            "\n{} `docker` was not found on PATH; container entries will not start until it is installed",
            "Warning:".yellow().bold()
        );
    }

    for server in &report.servers {
        println!("\n{} {}", "Server".bold(), server.record.name.cyan());

        for pair in report.pairs.iter().filter(|pair| pair.server == server.record.name) {
            match &pair.result {
                Ok(configured) => {
                    let outcome = &configured.outcome;
                    println!(
                        "  {} {} configured ({})",
                        "✓".green(),
                        pair.target,
                        outcome.path.display()
                    );
                    if let Some(primary) = &configured.fallback_from {
                        println!("    {} {primary}; used the fallback file instead", "note:".dimmed());
                    }
                    if let Some(warning) = &outcome.parse_warning {
                        println!("    {} {warning}; it was replaced", "warning:".yellow());
                    }
                    if !outcome.created && outcome.backup_path.is_none() {
                        println!("    {} no backup could be taken", "warning:".yellow());
                    }
                }
                Err(failure) => {
                    println!("  {} Error configuring {}: {failure}", "✗".red(), pair.target);
                }
            }
        }
    }

    println!("\n{}", "Installation complete".bold());
    println!("Configured {} GitLab server(s):", report.servers.len());
    for server in &report.servers {
        let record = &server.record;
        println!("  - {}: {} ({})", record.name, record.host, record.mode);
    }
    println!(
        "Updated {} of {} target configuration(s) across {} environment(s)",
        report.succeeded(),
        report.pairs.len(),
        targets.len()
    );

    println!("\nNext steps:");
    println!("  1. Restart your development environment(s)");
    println!("  2. The MCP server(s) are available under the name(s) above");
    let uses_container = report
        .servers
        .iter()
        .any(|server| server.record.mode == InvocationMode::Container);
    if uses_container {
        println!(
            "  3. Make sure the image exists: docker build -t {} .",
            config.docker_image
        );
    } else {
        println!("  3. Keep the server binary at the configured path");
    }
}

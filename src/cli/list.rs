//! The `list` command: servers found in each target's configuration.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::Value;

use crate::config::InstallerConfig;
use crate::mcp::read_document;
use crate::targets::{PlatformDirs, Target, TargetDescriptor};

/// List servers configured in each target.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// Only list these targets
    #[arg(long = "target", value_enum, value_delimiter = ',')]
    pub targets: Vec<Target>,
}

impl ListCommand {
    /// Prints every server name per target file. Files are read tolerantly.
    ///
    /// # Errors
    ///
    /// Fails only when the working directory cannot be determined.
    pub fn execute(self, config: &InstallerConfig) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let platform = PlatformDirs::detect(&cwd);
        let targets = if self.targets.is_empty() {
            Target::ALL.to_vec()
        } else {
            self.targets
        };

        for target in targets {
            println!("{}", target.to_string().bold());
            let plan = match platform.plan(target) {
                Ok(plan) => plan,
                Err(e) => {
                    println!("  {}", e.to_string().red());
                    continue;
                }
            };

            print_file(&plan.primary, config);
            if let Some(fallback) = &plan.fallback {
                print_file(fallback, config);
            }
        }
        Ok(())
    }
}

fn print_file(descriptor: &TargetDescriptor, config: &InstallerConfig) {
    let loaded = read_document(&descriptor.path);
    if !loaded.existed {
        println!("  {} {}", descriptor.path.display(), "(not found)".dimmed());
        return;
    }

    println!("  {}", descriptor.path.display());
    if let Some(warning) = loaded.warning {
        println!("    {} {warning}", "warning:".yellow());
        return;
    }

    match descriptor.shape.servers(&loaded.document) {
        Some(servers) if !servers.is_empty() => {
            for (name, entry) in servers {
                if is_gitlab_entry(entry, config) {
                    println!("    {} {}", name.green(), "(gitlab-mcp-server)".dimmed());
                } else {
                    println!("    {name}");
                }
            }
        }
        _ => println!("    {}", "no servers".dimmed()),
    }
}

/// Whether an entry starts this server, either as the local binary or the docker image.
pub(crate) fn is_gitlab_entry(entry: &Value, config: &InstallerConfig) -> bool {
    let command = entry.get("command").and_then(Value::as_str).unwrap_or_default();
    let binary = std::path::Path::new(command)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem == config.binary_name);
    if binary {
        return true;
    }

    entry
        .get("args")
        .and_then(Value::as_array)
        .is_some_and(|args| {
            args.iter()
                .filter_map(Value::as_str)
                .any(|arg| arg == config.docker_image)
        })
}

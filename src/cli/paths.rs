//! The `paths` command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::targets::{PlatformDirs, Target};

/// Show configuration file locations.
#[derive(Args, Debug)]
pub struct PathsCommand {}

impl PathsCommand {
    /// Prints the resolved file of every target on this platform.
    ///
    /// # Errors
    ///
    /// Fails only when the working directory cannot be determined.
    pub fn execute(self) -> Result<()> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        let platform = PlatformDirs::detect(&cwd);

        for target in Target::ALL {
            match platform.plan(target) {
                Ok(plan) => {
                    println!("{} {}", label(target).bold(), plan.primary.path.display());
                    if let Some(fallback) = plan.fallback {
                        println!("{} {} {}", label_pad(""), fallback.path.display(), "(fallback)".dimmed());
                    }
                }
                Err(e) => println!("{} {}", label(target).bold(), e.to_string().red()),
            }
        }
        Ok(())
    }
}

fn label(target: Target) -> String {
    label_pad(target.display_name())
}

fn label_pad(text: &str) -> String {
    format!("{text:<16}")
}

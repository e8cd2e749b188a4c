//! gitlab-mcp-install entry point
//!
//! Parses the command line, runs the command, and renders errors with
//! suggestions. The commands are:
//! - `install` - Register GitLab MCP servers with the selected targets
//! - `list` - Show servers configured in each target
//! - `paths` - Show configuration file locations

use anyhow::Result;
use clap::Parser;
use gitlab_mcp_installer::cli;
use gitlab_mcp_installer::core::error::user_friendly_error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

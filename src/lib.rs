//! gitlab-mcp-installer - register GitLab MCP servers with editors and desktop apps
//!
//! The installer writes named MCP server entries into the configuration files
//! of VS Code, Claude Desktop, Claude Code and Cursor. Each file is updated
//! through a safe, idempotent merge: the existing document is read tolerantly,
//! backed up, changed only at the entry being written, and replaced atomically.
//!
//! # Architecture Overview
//!
//! Leaf modules first:
//!
//! - [`utils`] - Atomic writes, directory helpers, project root discovery, platform dirs
//! - [`mcp`] - The merge engine: backups, the safe file mutator and the target shape adapters
//! - [`server`] - Validated server records and the entries built from them
//! - [`targets`] - Supported targets and their per-platform file locations
//! - [`installer`] - Applies every server to every target and tallies the results
//! - [`config`] - User-wide `config.toml` defaults and pre-declared servers
//! - [`prompts`] - Interactive input collection
//! - [`cli`] - The `gitlab-mcp-install` command line
//!
//! # Entry Shapes
//!
//! | Target | File | Container |
//! |---|---|---|
//! | VS Code | `.vscode/mcp.json` (fallback: user `settings.json`) | `servers` (fallback: `mcp.servers`) |
//! | Claude Desktop | `claude_desktop_config.json` | `mcpServers` |
//! | Claude Code | `~/.claude.json` | `mcpServers`, entries tagged `"type": "stdio"` |
//! | Cursor | `mcp.json` | `mcpServers` |

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod installer;
pub mod mcp;
pub mod prompts;
pub mod server;
pub mod targets;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

//! Integration tests for `gitlab-mcp-install`.
//!
//! Every test runs the compiled binary with `HOME`, the working directory and
//! the config file pointed into a temporary directory, so real editor
//! configurations are never touched.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **install**: writing entries, backups, fallbacks, failure handling
//! - **list**: listing configured servers
//! - **paths**: printing target locations

#[path = "../common/mod.rs"]
mod common;

mod install;
mod list;
mod paths;

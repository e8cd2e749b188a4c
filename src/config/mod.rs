//! Installer configuration.
//!
//! The only configuration file is the user-wide `config.toml` handled by
//! [`global`]. It supplies defaults (binary name, docker image, host, mode,
//! targets) and optional pre-declared servers for `install --from-config`.
//! Command-line flags always take precedence over values loaded here.

pub mod global;

pub use global::{InstallerConfig, ServerSpec};

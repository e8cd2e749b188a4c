//! Shared helpers for the integration suite.

use assert_cmd::Command;
use gitlab_mcp_installer::test_utils::TestEnvironment;
use std::path::PathBuf;

/// The installer binary, isolated to `env`'s home, project and config file.
pub fn installer(env: &TestEnvironment) -> Command {
    let mut cmd = Command::cargo_bin("gitlab-mcp-install").unwrap();
    cmd.current_dir(&env.project_dir)
        .env("HOME", &env.home_dir)
        .env("USERPROFILE", &env.home_dir)
        .env("GITLAB_MCP_INSTALLER_CONFIG", config_path(env))
        .env("NO_COLOR", "1")
        .env_remove("GITLAB_TOKEN")
        .env_remove("RUST_LOG")
        .env_remove("XDG_CONFIG_HOME");
    cmd
}

/// Where [`installer`] looks for `config.toml`.
pub fn config_path(env: &TestEnvironment) -> PathBuf {
    env.temp_dir.path().join("config.toml")
}

/// Writes the installer config used by [`installer`].
pub fn write_config(env: &TestEnvironment, content: &str) {
    std::fs::write(config_path(env), content).unwrap();
}

#![cfg(unix)]

use gitlab_mcp_installer::test_utils::TestEnvironment;
use predicates::prelude::*;

use crate::common::installer;

#[test]
fn test_paths_lists_every_target() {
    let env = TestEnvironment::new().unwrap();
    let home = env.home_dir.display().to_string();

    installer(&env)
        .arg("paths")
        .assert()
        .success()
        .stdout(predicate::str::contains("VS Code"))
        .stdout(predicate::str::contains(".vscode/mcp.json"))
        .stdout(predicate::str::contains("(fallback)"))
        .stdout(predicate::str::contains("Claude Desktop"))
        .stdout(predicate::str::contains(format!("{home}/.claude.json")))
        .stdout(predicate::str::contains(format!("{home}/.cursor/mcp.json")));
}

#[test]
fn test_help_mentions_commands() {
    let env = TestEnvironment::new().unwrap();

    installer(&env)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("paths"));
}

#![cfg(unix)]

use gitlab_mcp_installer::test_utils::TestEnvironment;
use predicates::prelude::*;

use crate::common::installer;

#[test]
fn test_list_shows_servers_and_marks_gitlab_entries() {
    let env = TestEnvironment::new().unwrap();
    env.write_home_file(
        ".claude.json",
        r#"{"mcpServers": {
            "filesystem": {"command": "npx", "args": ["-y", "server-filesystem"]},
            "work": {"command": "docker", "args": ["run", "-i", "--rm", "gitlab-mcp-server:latest"], "env": {"GITLAB_TOKEN": "glpat-hidden"}}
        }}"#,
    )
    .unwrap();

    installer(&env)
        .args(["list", "--target", "claude-code"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Claude Code"))
        .stdout(predicate::str::contains("filesystem"))
        .stdout(predicate::str::contains("work"))
        .stdout(predicate::str::contains("(gitlab-mcp-server)"))
        .stdout(predicate::str::contains("glpat-hidden").not());
}

#[test]
fn test_list_reports_missing_and_corrupt_files() {
    let env = TestEnvironment::new().unwrap();
    env.write_home_file(".cursor/mcp.json", "not json").unwrap();

    installer(&env)
        .args(["list", "--target", "cursor,claude-code"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(not found)"))
        .stdout(predicate::str::contains("Failed to parse"));
}

#[test]
fn test_list_after_install() {
    let env = TestEnvironment::new().unwrap();

    installer(&env)
        .args(["install", "--token", "glpat-x", "--mode", "container", "--target", "cursor"])
        .assert()
        .success();

    installer(&env)
        .args(["list", "--target", "cursor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gitlab"))
        .stdout(predicate::str::contains("no servers").not());
}

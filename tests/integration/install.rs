#![cfg(unix)]

use gitlab_mcp_installer::test_utils::TestEnvironment;
use predicates::prelude::*;
use serde_json::json;
use std::fs;

use crate::common::{installer, write_config};

const TOKEN: &str = "glpat-integration-secret";

#[test]
fn test_install_local_mode_writes_every_target() {
    let env = TestEnvironment::with_binary().unwrap();

    installer(&env)
        .args(["install", "--token", TOKEN])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ VS Code configured"))
        .stdout(predicate::str::contains("✓ Claude Code configured"))
        .stdout(predicate::str::contains("✓ Cursor configured"))
        .stdout(predicate::str::contains("gitlab: https://gitlab.com (Local binary)"))
        .stdout(predicate::str::contains(TOKEN).not())
        .stderr(predicate::str::contains(TOKEN).not());

    let workspace = env.read_json(env.project_dir.join(".vscode/mcp.json")).unwrap();
    let entry = &workspace["servers"]["gitlab"];
    assert!(entry["command"].as_str().unwrap().ends_with("/bin/gitlab-mcp-server"));
    assert_eq!(entry["args"], json!(["stdio"]));
    assert_eq!(entry["env"], json!({"GITLAB_TOKEN": TOKEN}));

    let claude_code = env.read_json(env.home_path(".claude.json")).unwrap();
    assert_eq!(claude_code["mcpServers"]["gitlab"]["type"], "stdio");

    let cursor = env.read_json(env.home_path(".cursor/mcp.json")).unwrap();
    assert!(cursor["mcpServers"]["gitlab"].get("type").is_none());
}

#[test]
fn test_install_token_from_environment() {
    let env = TestEnvironment::with_binary().unwrap();

    installer(&env)
        .env("GITLAB_TOKEN", TOKEN)
        .args(["install", "--target", "cursor"])
        .assert()
        .success();

    let cursor = env.read_json(env.home_path(".cursor/mcp.json")).unwrap();
    assert_eq!(cursor["mcpServers"]["gitlab"]["env"]["GITLAB_TOKEN"], TOKEN);
}

#[test]
fn test_missing_binary_fails_before_touching_files() {
    let env = TestEnvironment::new().unwrap();

    installer(&env)
        .args(["install", "--token", TOKEN])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Server binary not found"))
        .stderr(predicate::str::contains("make build"));

    assert!(!env.project_dir.join(".vscode").exists());
    assert!(!env.home_path(".claude.json").exists());
    assert!(!env.home_path(".cursor").exists());
}

#[test]
fn test_container_read_only_custom_host() {
    let env = TestEnvironment::new().unwrap();

    installer(&env)
        .args([
            "install",
            "--name",
            "work",
            "--token",
            TOKEN,
            "--host",
            "https://gitlab.example.com/",
            "--mode",
            "container",
            "--read-only",
            "--target",
            "claude-code",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("work: https://gitlab.example.com (Docker)"));

    let document = env.read_json(env.home_path(".claude.json")).unwrap();
    assert_eq!(
        document["mcpServers"]["work"],
        json!({
            "command": "docker",
            "args": [
                "run", "-i", "--rm",
                "-e", "GITLAB_TOKEN",
                "-e", "GITLAB_HOST",
                "-e", "GITLAB_READ_ONLY",
                "gitlab-mcp-server:latest"
            ],
            "env": {
                "GITLAB_HOST": "https://gitlab.example.com",
                "GITLAB_READ_ONLY": "true",
                "GITLAB_TOKEN": TOKEN
            },
            "type": "stdio"
        })
    );
}

#[test]
fn test_existing_content_is_preserved_and_backed_up() {
    let env = TestEnvironment::with_binary().unwrap();
    let original = r#"{"numStartups": 12, "mcpServers": {"filesystem": {"command": "npx"}}}"#;
    let path = env.write_home_file(".claude.json", original).unwrap();

    installer(&env)
        .args(["install", "--token", TOKEN, "--target", "claude-code"])
        .assert()
        .success();

    let document = env.read_json(&path).unwrap();
    assert_eq!(document["numStartups"], 12);
    assert_eq!(document["mcpServers"]["filesystem"], json!({"command": "npx"}));
    assert!(document["mcpServers"]["gitlab"].is_object());
    assert_eq!(fs::read_to_string(env.home_path(".claude.json.bak")).unwrap(), original);
}

#[test]
fn test_corrupt_file_is_replaced_with_warning() {
    let env = TestEnvironment::with_binary().unwrap();
    let path = env.write_home_file(".cursor/mcp.json", "{ this is not json").unwrap();

    installer(&env)
        .args(["install", "--token", TOKEN, "--target", "cursor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to parse"));

    let document = env.read_json(&path).unwrap();
    assert!(document["mcpServers"]["gitlab"].is_object());
    assert_eq!(
        fs::read_to_string(env.home_path(".cursor/mcp.json.bak")).unwrap(),
        "{ this is not json"
    );
}

#[test]
fn test_rerun_produces_identical_files() {
    let env = TestEnvironment::with_binary().unwrap();
    let run = || {
        installer(&env)
            .args(["install", "--token", TOKEN, "--target", "vscode,claude-code"])
            .assert()
            .success();
    };

    run();
    let workspace = fs::read_to_string(env.project_dir.join(".vscode/mcp.json")).unwrap();
    let claude = fs::read_to_string(env.home_path(".claude.json")).unwrap();
    run();

    assert_eq!(fs::read_to_string(env.project_dir.join(".vscode/mcp.json")).unwrap(), workspace);
    assert_eq!(fs::read_to_string(env.home_path(".claude.json")).unwrap(), claude);
    assert!(workspace.ends_with("}\n"));
}

#[test]
fn test_all_targets_failing_exits_nonzero() {
    let env = TestEnvironment::with_binary().unwrap();
    let original = "[1, 2, 3]";
    let path = env.write_home_file(".claude.json", original).unwrap();

    installer(&env)
        .args(["install", "--token", TOKEN, "--target", "claude-code"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("✗ Error configuring Claude Code"))
        .stderr(predicate::str::contains("No configuration files were updated"));

    assert_eq!(fs::read_to_string(path).unwrap(), original);
}

#[test]
fn test_one_failing_target_does_not_fail_the_run() {
    let env = TestEnvironment::with_binary().unwrap();
    env.write_home_file(".claude.json", r#"{"mcpServers": "broken"}"#).unwrap();

    installer(&env)
        .args(["install", "--token", TOKEN, "--target", "claude-code,cursor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✗ Error configuring Claude Code"))
        .stdout(predicate::str::contains("✓ Cursor configured"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_vscode_falls_back_to_user_settings() {
    let env = TestEnvironment::with_binary().unwrap();
    fs::create_dir_all(env.project_dir.join(".vscode")).unwrap();
    fs::write(env.project_dir.join(".vscode/mcp.json"), r#"{"servers": ["keep"]}"#).unwrap();
    let settings = env
        .write_home_file(".config/Code/User/settings.json", r#"{"editor.fontSize": 13}"#)
        .unwrap();

    installer(&env)
        .args(["install", "--token", TOKEN, "--target", "vscode"])
        .assert()
        .success()
        .stdout(predicate::str::contains("used the fallback file instead"));

    let document = env.read_json(&settings).unwrap();
    assert_eq!(document["editor.fontSize"], 13);
    assert!(document["mcp"]["servers"]["gitlab"].is_object());
}

#[test]
fn test_missing_token_non_interactive() {
    let env = TestEnvironment::with_binary().unwrap();

    installer(&env)
        .args(["install", "--name", "work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("A token is required"));
}

#[test]
fn test_invalid_server_name_rejected() {
    let env = TestEnvironment::with_binary().unwrap();

    installer(&env)
        .args(["install", "--name", "my server", "--token", TOKEN])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid server name"));

    assert!(!env.home_path(".claude.json").exists());
}

#[test]
fn test_install_from_config() {
    let env = TestEnvironment::with_binary().unwrap();
    write_config(
        &env,
        r#"
targets = ["claude-code"]

[servers.work]
host = "https://gitlab.example.com"
token_env = "WORK_GITLAB_TOKEN"
mode = "container"

[servers.personal]
read_only = true
"#,
    );

    installer(&env)
        .env("WORK_GITLAB_TOKEN", "glpat-work")
        .env("GITLAB_TOKEN", "glpat-personal")
        .args(["install", "--from-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configured 2 GitLab server(s)"))
        .stdout(predicate::str::contains("glpat-").not());

    let servers = &env.read_json(env.home_path(".claude.json")).unwrap()["mcpServers"];
    assert_eq!(servers["work"]["command"], "docker");
    assert_eq!(servers["work"]["env"]["GITLAB_TOKEN"], "glpat-work");
    assert_eq!(servers["personal"]["args"], json!(["stdio"]));
    assert_eq!(servers["personal"]["env"]["GITLAB_READ_ONLY"], "true");
    assert!(!env.project_dir.join(".vscode").exists());
}

#[test]
fn test_invalid_config_reports_toml_error() {
    let env = TestEnvironment::with_binary().unwrap();
    write_config(&env, "targets = [\"vscode\"");

    installer(&env)
        .args(["install", "--token", TOKEN])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn thinkloop(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("thinkloop").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENROUTER_API_KEY")
        .env_remove("GEMINI_API_KEY")
        .env_remove("THINKLOOP_PROVIDER")
        .env_remove("THINKLOOP_MODEL")
        .env_remove("THINKLOOP_AGENT_MODE")
        .env_remove("THINKLOOP_MAX_TOOL_ITERATIONS");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    thinkloop(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("tools"));
}

#[test]
fn test_tools_lists_builtins_in_order() {
    let dir = TempDir::new().unwrap();
    thinkloop(&dir)
        .arg("tools")
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)list_files.*read_file.*write_file.*create_directory.*ask_human_for_clarification.*analyze_reasoning.*review_decision").unwrap());
}

#[test]
fn test_run_without_credentials_fails() {
    let dir = TempDir::new().unwrap();
    thinkloop(&dir)
        .args(["run", "--prompt", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing credentials"));
}

#[test]
fn test_invalid_agent_mode_is_rejected() {
    let dir = TempDir::new().unwrap();
    thinkloop(&dir)
        .args(["run", "--prompt", "hello", "--agent", "turbo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown agent mode"));
}

#[test]
fn test_config_file_is_validated() {
    let (_guard, config_path) = common::temp_config_file("agent:\n  max_tool_iterations: 0\n");
    let dir = TempDir::new().unwrap();
    thinkloop(&dir)
        .arg("--config")
        .arg(&config_path)
        .arg("tools")
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_tool_iterations"));
}

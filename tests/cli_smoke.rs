//! Smoke tests for the `atlas` binary, run against the built-in model list.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `atlas` with an empty config dir and no upstream key
fn atlas(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("atlas").expect("atlas binary should build");
    cmd.current_dir(config_home.path())
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("OPENROUTER_API_KEY")
        .env_remove("RUST_LOG")
        .arg("--offline");
    cmd
}

#[test]
fn models_list_by_category() {
    let home = TempDir::new().unwrap();

    atlas(&home)
        .args(["models", "list", "--category", "coding"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Coding & Development ("))
        .stdout(predicate::str::contains("anthropic/claude-3-opus"))
        .stdout(predicate::str::contains("openai/dall-e-3").not());

    atlas(&home)
        .args(["models", "list", "-c", "media"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stability/stable-diffusion-xl"));
}

#[test]
fn models_info_unknown_model_fails() {
    let home = TempDir::new().unwrap();

    atlas(&home)
        .args(["models", "info", "nobody/nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("atlas models search"));
}

#[test]
fn recommend_as_json() {
    let home = TempDir::new().unwrap();

    atlas(&home)
        .args(["recommend", "debug my python code", "-f", "accuracy", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"categories\""))
        .stdout(predicate::str::contains("\"matchScore\""));
}

#[test]
fn explicit_config_file_must_exist() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("missing.toml");

    atlas(&home)
        .arg("--config")
        .arg(&missing)
        .args(["models", "list"])
        .assert()
        .failure();
}

#[test]
fn invalid_env_override_is_reported() {
    let home = TempDir::new().unwrap();

    atlas(&home)
        .env("PORT", "not-a-port")
        .args(["models", "search", "claude"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ignoring invalid PORT"));
}

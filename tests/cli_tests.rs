//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn llmdeck_bin() -> Command {
    Command::cargo_bin("llmdeck").expect("binary built")
}

/// Binary isolated from the user's config and runtime dirs
fn isolated(dir: &TempDir) -> Command {
    let mut cmd = llmdeck_bin();
    cmd.env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env("XDG_RUNTIME_DIR", dir.path())
        .env("HOME", dir.path())
        .env_remove("LLMDECK_API_KEY");
    cmd
}

#[test]
fn help_output() {
    llmdeck_bin()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--stdin"))
        .stdout(predicate::str::contains("--provider"))
        .stdout(predicate::str::contains("--step"))
        .stdout(predicate::str::contains("press"))
        .stdout(predicate::str::contains("rotate"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn version_output() {
    llmdeck_bin()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("llmdeck"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("llmdeck"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_help() {
    llmdeck_bin()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("path"));
}

#[test]
fn config_set_then_get() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .args(["config", "set", "provider", "LLAMA"])
        .assert()
        .success();

    isolated(&dir)
        .args(["config", "get", "provider"])
        .assert()
        .success()
        .stdout(predicate::str::diff("llama\n"));
}

#[test]
fn config_get_masks_api_key() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .args(["config", "set", "api.api_key", "sk-abcdefghijklmnop"])
        .assert()
        .success();

    isolated(&dir)
        .args(["config", "get", "api.api_key"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sk-a...mnop"))
        .stdout(predicate::str::contains("bcdefgh").not());
}

#[test]
fn config_init_twice_fails() {
    let dir = TempDir::new().unwrap();

    isolated(&dir).args(["config", "init"]).assert().success();
    isolated(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_list_shows_every_key() {
    let dir = TempDir::new().unwrap();

    isolated(&dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keymap"))
        .stdout(predicate::str::contains("providers.llama"))
        .stdout(predicate::str::contains("(not set)"));
}

#[test]
fn invalid_provider_flag() {
    llmdeck_bin()
        .args(["--provider", "claude"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn press_out_of_range_slot() {
    llmdeck_bin()
        .args(["press", "9"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn press_without_running_deck() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .args(["press", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No deck running"));
}

#[test]
fn status_without_running_deck() {
    let dir = TempDir::new().unwrap();
    isolated(&dir)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No deck running"));
}

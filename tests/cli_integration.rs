//! Integration tests for the SafePass CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Secrets are passed through `SAFEPASS_SECRET` and confirmations are
//! skipped with `--force`, so nothing waits on a terminal.

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: get a Command pointing at the safepass binary, isolated from
/// any store or config the developer running the tests may have.
fn safepass() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("safepass").expect("binary should exist");
    cmd.env_remove("SAFEPASS_STORE")
        .env_remove("SAFEPASS_CONFIG")
        .env_remove("SAFEPASS_SECRET");
    cmd
}

/// Helper: a safepass command pointed at a store and config inside `tmp`.
fn safepass_in(tmp: &TempDir) -> Command {
    let mut cmd = safepass();
    cmd.arg("--store")
        .arg(tmp.path().join("passwords.spv"))
        .arg("--config")
        .arg(tmp.path().join("config.json"))
        .current_dir(tmp.path());
    cmd
}

#[test]
fn help_flag_shows_usage() {
    safepass()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Local credential manager"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("folders"));
}

#[test]
fn version_flag_shows_version() {
    safepass()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("safepass"));
}

#[test]
fn no_args_shows_help() {
    safepass()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn generate_prints_secret_of_requested_length() {
    let tmp = TempDir::new().unwrap();
    let assert = safepass_in(&tmp)
        .args(["generate", "--length", "12"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.trim_end_matches('\n').chars().count(), 12);
}

#[test]
fn generate_without_any_class_fails() {
    let tmp = TempDir::new().unwrap();
    safepass_in(&tmp)
        .args(["generate", "--no-alpha", "--no-digits", "--no-special"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("character class"));
}

#[test]
fn list_on_missing_store_fails() {
    let tmp = TempDir::new().unwrap();
    safepass_in(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not_found"));
}

#[test]
fn init_creates_store_and_config() {
    let tmp = TempDir::new().unwrap();
    safepass_in(&tmp).arg("init").assert().success();

    assert!(tmp.path().join("passwords.spv").exists());
    assert!(tmp.path().join("config.json").exists());
}

#[test]
fn init_twice_fails() {
    let tmp = TempDir::new().unwrap();
    safepass_in(&tmp).arg("init").assert().success();
    safepass_in(&tmp).arg("init").assert().failure();
}

#[test]
fn add_list_remove_flow() {
    let tmp = TempDir::new().unwrap();
    safepass_in(&tmp).arg("init").assert().success();

    safepass_in(&tmp)
        .args(["add", "JohnDoe", "Website A"])
        .env("SAFEPASS_SECRET", "password123")
        .assert()
        .success();

    // Secrets are masked unless --show is given.
    safepass_in(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("JohnDoe"))
        .stdout(predicate::str::contains("Website A"))
        .stdout(predicate::str::contains("password123").not());

    safepass_in(&tmp)
        .args(["list", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("password123"));

    safepass_in(&tmp)
        .args(["remove", "JohnDoe", "Website A", "--force"])
        .assert()
        .success();

    safepass_in(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("JohnDoe").not());
}

#[test]
fn duplicate_add_fails() {
    let tmp = TempDir::new().unwrap();
    safepass_in(&tmp).arg("init").assert().success();

    for expect_ok in [true, false] {
        let assert = safepass_in(&tmp)
            .args(["add", "JohnDoe", "Website A"])
            .env("SAFEPASS_SECRET", "password123")
            .assert();
        if expect_ok {
            assert.success();
        } else {
            assert
                .failure()
                .stderr(predicate::str::contains("duplicate_entry"));
        }
    }
}

#[test]
fn remove_unknown_credential_fails() {
    let tmp = TempDir::new().unwrap();
    safepass_in(&tmp).arg("init").assert().success();

    safepass_in(&tmp)
        .args(["remove", "nobody", "nowhere", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not_found"));
}

#[test]
fn add_with_unknown_folder_fails() {
    let tmp = TempDir::new().unwrap();
    safepass_in(&tmp).arg("init").assert().success();

    safepass_in(&tmp)
        .args(["add", "u", "site", "--folder", "Nope"])
        .env("SAFEPASS_SECRET", "pw")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown folder"));
}

#[test]
fn show_finds_by_target_case_insensitively() {
    let tmp = TempDir::new().unwrap();
    safepass_in(&tmp).arg("init").assert().success();
    safepass_in(&tmp)
        .args(["add", "alice", "GitHub", "--folder", "Websites"])
        .env("SAFEPASS_SECRET", "s3cret")
        .assert()
        .success();

    safepass_in(&tmp)
        .args(["show", "github"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice"))
        .stdout(predicate::str::contains("s3cret"));
}

#[test]
fn clear_empties_the_store() {
    let tmp = TempDir::new().unwrap();
    safepass_in(&tmp).arg("init").assert().success();
    safepass_in(&tmp)
        .args(["add", "u", "site"])
        .env("SAFEPASS_SECRET", "pw")
        .assert()
        .success();

    safepass_in(&tmp).args(["clear", "--force"]).assert().success();

    safepass_in(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 credential(s)"));
}

#[test]
fn folders_lists_defaults() {
    let tmp = TempDir::new().unwrap();
    safepass_in(&tmp)
        .arg("folders")
        .assert()
        .success()
        .stdout(predicate::str::contains("Websites"))
        .stdout(predicate::str::contains("Applications"))
        .stdout(predicate::str::contains("Email Accounts"));
}

#[test]
fn hash_then_verify_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let assert = safepass_in(&tmp)
        .arg("hash")
        .env("SAFEPASS_SECRET", "hunter2")
        .assert()
        .success();
    let printed: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("hash prints JSON");
    let salt = printed["salt"].as_str().unwrap().to_string();
    let hash = printed["hash"].as_str().unwrap().to_string();

    safepass_in(&tmp)
        .args(["verify", &salt, &hash])
        .env("SAFEPASS_SECRET", "hunter2")
        .assert()
        .success();

    safepass_in(&tmp)
        .args(["verify", &salt, &hash])
        .env("SAFEPASS_SECRET", "wrong")
        .assert()
        .failure();
}

#[test]
fn completions_bash_outputs_script() {
    safepass()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("safepass"));
}

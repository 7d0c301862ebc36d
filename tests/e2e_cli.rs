//! CLI end-to-end tests
//!
//! Tests for the imgforged command-line interface.

mod common;

use assert_cmd::prelude::*;
use common::{dimensions, write_config, write_image};
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the imgforged binary
#[allow(deprecated)]
fn imgforged_cmd() -> Command {
    Command::cargo_bin("imgforged").unwrap()
}

#[test]
fn test_cli_no_args_shows_help() {
    let mut cmd = imgforged_cmd();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    let mut cmd = imgforged_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("imgforged"))
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version_command() {
    let mut cmd = imgforged_cmd();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_run_help() {
    let mut cmd = imgforged_cmd();
    cmd.args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Process a single file"));
}

#[test]
fn test_cli_validate_good_config() {
    let temp = tempdir().unwrap();
    let photos = temp.path().join("photos");
    fs::create_dir(&photos).unwrap();
    let config = write_config(
        temp.path(),
        &format!(
            "Folders:\n  - path: {}\n    size: \"640x480\"\n    thumb: \"64x48\"\n",
            photos.display()
        ),
    );

    let mut cmd = imgforged_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("size: 640x480, thumb: 64x48"));
}

#[test]
fn test_cli_validate_rule_without_specs() {
    let temp = tempdir().unwrap();
    let photos = temp.path().join("photos");
    fs::create_dir(&photos).unwrap();
    let config = write_config(
        temp.path(),
        &format!("Folders:\n  - path: {}\n", photos.display()),
    );

    let mut cmd = imgforged_cmd();
    cmd.args(["--config"])
        .arg(&config)
        .arg("validate")
        .assert()
        .failure()
        .stderr(predicate::str::contains(photos.display().to_string()));
}

#[test]
fn test_cli_validate_missing_folder() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("not-there");
    let config = write_config(
        temp.path(),
        &format!("Folders:\n  - path: {}\n    thumb: \"10x10\"\n", missing.display()),
    );

    let mut cmd = imgforged_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not-there"));
}

#[test]
fn test_cli_validate_malformed_yaml() {
    let temp = tempdir().unwrap();
    let config = write_config(temp.path(), "Folders: [ this is : not yaml");

    let mut cmd = imgforged_cmd();
    cmd.arg("validate")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_cli_start_without_config_fails() {
    let temp = tempdir().unwrap();

    let mut cmd = imgforged_cmd();
    cmd.current_dir(temp.path())
        .env("HOME", temp.path())
        .arg("start")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No config file found"));
}

#[test]
fn test_cli_start_invalid_rule_touches_nothing() {
    let temp = tempdir().unwrap();
    let photos = temp.path().join("photos");
    fs::create_dir(&photos).unwrap();
    let src = photos.join("a.png");
    write_image(&src, 40, 40);
    let config = write_config(
        temp.path(),
        &format!("Folders:\n  - path: {}\n    size: \"oops\"\n", photos.display()),
    );

    let mut cmd = imgforged_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("start")
        .assert()
        .failure()
        .stderr(predicate::str::contains(photos.display().to_string()));

    assert_eq!(dimensions(&src), (40, 40));
}

#[test]
fn test_cli_run_nonexistent_file() {
    let temp = tempdir().unwrap();
    let config = write_config(
        temp.path(),
        &format!("Folders:\n  - path: {}\n    thumb: \"10x10\"\n", temp.path().display()),
    );

    let mut cmd = imgforged_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args(["run", "/nonexistent/path/photo.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_cli_run_processes_file() {
    let temp = tempdir().unwrap();
    let photos = temp.path().join("photos");
    fs::create_dir(&photos).unwrap();
    let src = photos.join("cat.png");
    write_image(&src, 60, 40);
    let config = write_config(
        temp.path(),
        &format!(
            "Folders:\n  - path: {}\n    size: \"30x20\"\n    thumb: \"6x4\"\n",
            photos.display()
        ),
    );

    let mut cmd = imgforged_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("run")
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("Thumbnail: wrote"));

    assert_eq!(dimensions(&src), (30, 20));
    assert_eq!(dimensions(&photos.join("cat_thumb.png")), (6, 4));

    // Second run is gated by the thumbnail.
    let mut cmd = imgforged_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("run")
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("thumbnail already exists"));
}

#[test]
fn test_cli_run_dry_run_writes_nothing() {
    let temp = tempdir().unwrap();
    let photos = temp.path().join("photos");
    fs::create_dir(&photos).unwrap();
    let src = photos.join("cat.jpg");
    write_image(&src, 60, 40);
    let config = write_config(
        temp.path(),
        &format!("Folders:\n  - path: {}\n    thumb: \"6x4\"\n", photos.display()),
    );

    let mut cmd = imgforged_cmd();
    cmd.arg("--config")
        .arg(&config)
        .args(["run", "--dry-run"])
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("[DRY RUN]"))
        .stdout(predicate::str::contains("cat_thumb.jpg"));

    assert!(!photos.join("cat_thumb.jpg").exists());
}

#[test]
fn test_cli_run_outside_configured_folders() {
    let temp = tempdir().unwrap();
    let photos = temp.path().join("photos");
    let other = temp.path().join("other");
    fs::create_dir(&photos).unwrap();
    fs::create_dir(&other).unwrap();
    let src = other.join("stray.png");
    write_image(&src, 20, 20);
    let config = write_config(
        temp.path(),
        &format!("Folders:\n  - path: {}\n    size: \"10x10\"\n", photos.display()),
    );

    let mut cmd = imgforged_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("run")
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("not under any configured folder"));

    assert_eq!(dimensions(&src), (20, 20));
}

#[test]
fn test_cli_run_with_no_folders_fails() {
    let temp = tempdir().unwrap();
    let src = temp.path().join("cat.jpg");
    write_image(&src, 20, 20);
    let config = write_config(temp.path(), "Folders: []\n");

    let mut cmd = imgforged_cmd();
    cmd.arg("--config")
        .arg(&config)
        .arg("run")
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No folders configured"));

    assert_eq!(dimensions(&src), (20, 20));
}

//! End-to-end tests of the towr-replay binary

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture, load_fixture};

/// Binary with config lookups pointed at an empty directory.
fn towr_replay(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("towr-replay").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn info_summarises_trajectory() {
    let home = TempDir::new().unwrap();
    towr_replay(&home)
        .arg("info")
        .arg(fixture("quadruped_walk.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Samples:    40"))
        .stdout(predicate::str::contains("Effectors:  4"))
        .stdout(predicate::str::contains("Timestep:   2.500 ms"))
        .stdout(predicate::str::contains("Layout:     interleaved"));
}

#[test]
fn info_requires_a_file() {
    let home = TempDir::new().unwrap();
    towr_replay(&home).arg("info").assert().code(2);
}

#[test]
fn info_reports_malformed_row() {
    let home = TempDir::new().unwrap();
    towr_replay(&home)
        .arg("info")
        .arg(fixture("bad_number.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load trajectory"))
        .stderr(predicate::str::contains("abc"));
}

#[test]
fn play_prints_requested_frames() {
    let home = TempDir::new().unwrap();
    let output = towr_replay(&home)
        .args(["play", "--frames", "2", "--fps", "60"])
        .arg(fixture("quadruped_walk.csv"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("idx=    6"));
    assert!(lines[0].contains("base=(6.00, 0.00, 50.00)"));
    assert!(lines[1].contains("idx=   12"));
}

#[test]
fn play_runs_until_last_sample() {
    let home = TempDir::new().unwrap();
    let output = towr_replay(&home)
        .args(["play", "--fps", "30"])
        .arg(fixture("quadruped_walk.csv"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    // 13 samples per frame at 30 fps reaches sample 39 on the third frame
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.lines().last().unwrap().contains("idx=   39"));
}

#[test]
fn play_refuses_frames_shorter_than_a_sample() {
    let home = TempDir::new().unwrap();
    towr_replay(&home)
        .args(["play", "--fps", "1000"])
        .arg(fixture("quadruped_walk.csv"))
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--accumulate"));
}

#[test]
fn play_accumulates_short_frames_to_the_end() {
    let home = TempDir::new().unwrap();
    let output = towr_replay(&home)
        .args(["play", "--fps", "1000", "--accumulate"])
        .arg(fixture("quadruped_walk.csv"))
        .timeout(std::time::Duration::from_secs(30))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    // 0.4 samples per frame, 39 samples to cover
    let frames = stdout.lines().count();
    assert!((97..=99).contains(&frames), "{frames} frames");
    assert!(stdout.lines().last().unwrap().contains("idx=   39"));
}

#[test]
fn play_with_frame_limit_allows_short_frames() {
    let home = TempDir::new().unwrap();
    towr_replay(&home)
        .args(["play", "--fps", "1000", "--frames", "3"])
        .arg(fixture("quadruped_walk.csv"))
        .assert()
        .success()
        .stdout(predicate::str::contains("idx=    0"));
}

#[test]
fn play_json_emits_one_object_per_frame() {
    let home = TempDir::new().unwrap();
    let output = towr_replay(&home)
        .args(["play", "--json", "--grouped", "--fps", "100"])
        .arg(fixture("biped_grouped.csv"))
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let frames: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    // 10 ms frames over 5 ms samples: indices 2 then 4
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0]["frame"], 1);
    assert_eq!(frames[0]["index"], 2);
    assert_eq!(frames[1]["index"], 4);
    assert_eq!(frames[1]["feet"].as_array().unwrap().len(), 2);

    let right_y = frames[1]["feet"][1][1].as_f64().unwrap();
    assert!((right_y + 10.0).abs() < 1e-3);
}

#[test]
fn play_uses_configured_trajectory_below_content_dir() {
    let home = TempDir::new().unwrap();
    let content = TempDir::new().unwrap();
    let dir = content.path().join("TowrTrajectories");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("anymal_wall_new3.txt"),
        load_fixture("quadruped_walk.csv"),
    )
    .unwrap();

    towr_replay(&home)
        .args(["play", "--frames", "1", "--content-dir"])
        .arg(content.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("idx=    6"));
}

#[test]
fn play_missing_file_fails_with_path() {
    let home = TempDir::new().unwrap();
    towr_replay(&home)
        .args(["play", "/nonexistent/walk.csv"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("/nonexistent/walk.csv"));
}

#[test]
fn play_rejects_zero_fps() {
    let home = TempDir::new().unwrap();
    towr_replay(&home)
        .args(["play", "--fps", "0"])
        .arg(fixture("quadruped_walk.csv"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1 fps"));
}

#[test]
fn config_path_points_into_config_dir() {
    let home = TempDir::new().unwrap();
    towr_replay(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("towr-replay"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn completions_generate_for_bash() {
    let home = TempDir::new().unwrap();
    towr_replay(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("towr-replay"));
}

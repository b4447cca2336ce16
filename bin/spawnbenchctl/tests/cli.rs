//! ---
//! sb_section: "05-external-interfaces"
//! sb_subsection: "tests"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Black-box tests for the control CLI."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
#![cfg(unix)]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn spawnbenchctl() -> Command {
    let mut cmd = Command::cargo_bin("spawnbenchctl").expect("binary built");
    cmd.env_remove("SPAWNBENCH_CONFIG")
        .env("SPAWNBENCH_LOG", "warn");
    cmd
}

#[test]
fn prints_version() {
    spawnbenchctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("spawnbenchctl "));
}

#[test]
fn serial_run_prints_progress_and_one_duration_line() {
    let dir = tempfile::tempdir().unwrap();
    let output = spawnbenchctl()
        .current_dir(dir.path())
        .args(["--mode", "serial", "--count", "3", "--", "sh", "-c", "exit 0"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Running serial scenario\n"));
    assert_eq!(stdout.matches("finished #").count(), 3);
    assert_eq!(stdout.matches(" seconds ---").count(), 1);
}

#[test]
fn child_failure_is_reported_without_failing_the_process() {
    let dir = tempfile::tempdir().unwrap();
    spawnbenchctl()
        .current_dir(dir.path())
        .args(["--mode", "both", "-n", "2", "--", "sh", "-c", "exit 4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: FAIL 4"))
        .stdout(predicate::str::contains("seconds ---").not());
}

#[test]
fn reads_configuration_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bench.toml");
    fs::write(
        &config,
        "count = 2\nmode = \"concurrent\"\nmax_in_flight = 1\n\n[target]\nprogram = \"sh\"\nargs = [\"-c\", \"exit 0\"]\n",
    )
    .unwrap();

    let output = spawnbenchctl()
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("Running concurrent scenario\n"));
    assert_eq!(stdout.matches("launched #").count(), 2);
    assert_eq!(stdout.matches("waiting #").count(), 2);
}

#[test]
fn zero_in_flight_bound_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    spawnbenchctl()
        .current_dir(dir.path())
        .args(["--max-in-flight", "0", "--", "sh", "-c", "exit 0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_in_flight"));
}

#[test]
fn missing_target_program_fails_the_process() {
    let dir = tempfile::tempdir().unwrap();
    spawnbenchctl()
        .current_dir(dir.path())
        .args(["-n", "1", "--", "spawnbench-no-such-program"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("spawnbench-no-such-program"));
}

#[test]
fn cli_flag_repairs_an_invalid_file_value() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bench.toml");
    fs::write(&config, "max_in_flight = 0\n").unwrap();

    spawnbenchctl()
        .arg("--config")
        .arg(&config)
        .args(["--max-in-flight", "2", "-n", "1", "--", "sh", "-c", "exit 0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("launched #0"));
}

#[test]
fn capture_output_prints_each_child_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let output = spawnbenchctl()
        .current_dir(dir.path())
        .args(["--mode", "concurrent", "-n", "2", "--capture-output"])
        .args(["--", "sh", "-c", "echo hello"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let captured: Vec<&str> = stdout.lines().filter(|l| l.starts_with("output #")).collect();
    assert_eq!(
        captured,
        [
            "output #0 (exit status: 0): \"hello\\n\"",
            "output #1 (exit status: 0): \"hello\\n\"",
        ]
    );
}

#[test]
fn outputs_are_not_printed_without_capture() {
    let dir = tempfile::tempdir().unwrap();
    spawnbenchctl()
        .current_dir(dir.path())
        .args(["-n", "1", "--", "sh", "-c", "echo hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("output #").not());
}

#[test]
fn configuration_source_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bench.toml");
    fs::write(
        &config,
        "count = 1\n\n[target]\nprogram = \"sh\"\nargs = [\"-c\", \"exit 0\"]\n",
    )
    .unwrap();

    spawnbenchctl()
        .env("SPAWNBENCH_LOG", "info")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stderr(predicate::str::contains("configuration loaded"))
        .stderr(predicate::str::contains(config.to_string_lossy().into_owned()));
}

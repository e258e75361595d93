//! Integration tests for the boxcount CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Write `contents` to a fresh input file, returning the dir guard and path
fn input_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("input.txt");
    fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

fn boxcount() -> Command {
    Command::cargo_bin("boxcount").unwrap()
}

#[test]
fn test_cli_help() {
    boxcount()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("boxes"));
}

#[test]
fn test_cli_version() {
    boxcount()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("boxcount"));
}

#[test]
fn test_missing_argument_is_usage_error() {
    boxcount().assert().failure().code(2);
}

#[test]
fn test_each_box_size_totals_four() {
    let (_dir, path) = input_file("5\n16\n42\n59\n");
    boxcount()
        .arg(&path)
        .assert()
        .success()
        .stdout("Total boxes: 4\n");
}

#[test]
fn test_64_uses_two_boxes() {
    let (_dir, path) = input_file("64\n");
    boxcount()
        .arg(&path)
        .assert()
        .success()
        .stdout("Total boxes: 2\n");
}

#[test]
fn test_unpackable_target_reports_line() {
    let (_dir, path) = input_file("3\n");
    boxcount()
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Total boxes").not())
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn test_blank_lines_keep_physical_numbering() {
    let (_dir, path) = input_file("5\n\n16\n");
    boxcount()
        .arg(&path)
        .assert()
        .success()
        .stdout("Total boxes: 2\n");

    let (_dir, path) = input_file("5\n\n4\n");
    boxcount()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 3"));
}

#[test]
fn test_invalid_text_reports_line_and_text() {
    let (_dir, path) = input_file("abc\n");
    boxcount()
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("line 1").and(predicate::str::contains("\"abc\"")));
}

#[test]
fn test_negative_value_is_out_of_range() {
    let (_dir, path) = input_file("16\n-5\n");
    boxcount()
        .arg(&path)
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("line 2")
                .and(predicate::str::contains("-5"))
                .and(predicate::str::contains("out of range")),
        );
}

#[test]
fn test_oversized_value_is_out_of_range() {
    let (_dir, path) = input_file("99999999999999999999\n");
    boxcount()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    boxcount()
        .arg(temp_dir.path().join("does-not-exist.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn test_total_is_the_same_for_any_worker_count() {
    let contents: String = (0..300u64).map(|i| format!("{}\n", 60 + i * 11)).collect();
    let (_dir, path) = input_file(&contents);

    let totals: Vec<String> = ["1", "2", "16"]
        .iter()
        .map(|workers| {
            let output = boxcount()
                .arg("--workers")
                .arg(workers)
                .arg("--queue-capacity")
                .arg("2")
                .arg(&path)
                .output()
                .unwrap();
            assert!(output.status.success());
            String::from_utf8(output.stdout).unwrap()
        })
        .collect();

    assert!(totals[0].starts_with("Total boxes: "));
    assert!(totals.iter().all(|total| *total == totals[0]));
}

#[test]
fn test_json_format() {
    let (_dir, path) = input_file("5\n16\n42\n59\n");
    let output = boxcount()
        .args(["--format", "json", "--workers", "2"])
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["total_boxes"], 4);
    assert_eq!(value["lines"], 4);
    assert_eq!(value["workers"], 2);
}

#[test]
fn test_config_file_sets_workers() {
    let (dir, path) = input_file("64\n");
    let config_path = dir.path().join("boxcount.toml");
    fs::write(&config_path, "[pipeline]\nworkers = 3\n").unwrap();

    let output = boxcount()
        .args(["--format", "json", "--config"])
        .arg(&config_path)
        .arg(&path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["workers"], 3);
    assert_eq!(value["total_boxes"], 2);
}

#[test]
fn test_invalid_config_value_fails() {
    let (_dir, path) = input_file("5\n");
    boxcount()
        .args(["--queue-capacity", "0"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("queue_capacity"));
}

#[test]
fn test_unpackable_target_does_not_wait_for_expensive_line() {
    let (_dir, path) = input_file("3\n1000000000\n");
    boxcount()
        .args(["--workers", "2"])
        .arg(&path)
        .timeout(Duration::from_secs(20))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line 1"));
}

#[test]
fn test_bad_line_does_not_wait_for_expensive_line() {
    let (_dir, path) = input_file("1000000000\nabc\n");
    boxcount()
        .args(["--workers", "2"])
        .arg(&path)
        .timeout(Duration::from_secs(20))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line 2").and(predicate::str::contains("\"abc\"")));
}

#[test]
fn test_overlong_line_fails() {
    let mut contents = "9".repeat(2 * 1024 * 1024);
    contents.push('\n');
    let (_dir, path) = input_file(&contents);
    boxcount()
        .arg(&path)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("line 1").and(predicate::str::contains("longer than")));
}

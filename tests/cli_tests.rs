//! End-to-end tests for the `pomocycle` binary.
//!
//! Each test points the binary at a temporary progress file and drives the
//! interactive loop through stdin.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

fn progress_path(dir: &TempDir) -> PathBuf {
    dir.path().join("pomodoro_progress.txt")
}

fn pomocycle(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("pomocycle").unwrap();
    cmd.arg("--progress-file")
        .arg(progress_path(dir))
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Progress Command Tests
// ============================================================================

#[test]
fn test_progress_without_file_shows_zero() {
    let dir = TempDir::new().unwrap();

    pomocycle(&dir)
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("完了した作業セッション: 0"))
        .stdout(predicate::str::contains("完了したサイクル: 0"));
}

#[test]
fn test_progress_reads_saved_counters() {
    let dir = TempDir::new().unwrap();
    fs::write(progress_path(&dir), "3\n6\n").unwrap();

    pomocycle(&dir)
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("完了した作業セッション: 3"))
        .stdout(predicate::str::contains("完了したサイクル: 6"));
}

#[test]
fn test_progress_json() {
    let dir = TempDir::new().unwrap();
    fs::write(progress_path(&dir), "3 6").unwrap();

    let output = pomocycle(&dir)
        .args(["progress", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["work_sessions_completed"], 3);
    assert_eq!(value["cycles_completed"], 6);
}

// ============================================================================
// Interactive Loop Tests
// ============================================================================

#[test]
fn test_view_progress_then_quit() {
    let dir = TempDir::new().unwrap();
    fs::write(progress_path(&dir), "2\n5\n").unwrap();

    pomocycle(&dir)
        .write_stdin("v\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("完了した作業セッション: 2"))
        .stdout(predicate::str::contains("状態: 停止中"))
        .stdout(predicate::str::contains("お疲れさまでした"));
}

#[test]
fn test_quit_saves_progress() {
    let dir = TempDir::new().unwrap();
    assert!(!progress_path(&dir).exists());

    pomocycle(&dir).write_stdin("q\n").assert().success();

    assert_eq!(fs::read_to_string(progress_path(&dir)).unwrap(), "0\n0\n");
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    fs::write(progress_path(&dir), "1\n1\n").unwrap();

    pomocycle(&dir).write_stdin("v\n").assert().success();

    assert_eq!(fs::read_to_string(progress_path(&dir)).unwrap(), "1\n1\n");
}

#[test]
fn test_invalid_command_is_reported() {
    let dir = TempDir::new().unwrap();

    pomocycle(&dir)
        .write_stdin("x\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("無効なコマンド"));
}

#[test]
fn test_pause_when_idle_is_reported() {
    let dir = TempDir::new().unwrap();

    pomocycle(&dir)
        .write_stdin("p\nq\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("一時停止できるタイマーがありません"));
}

#[test]
fn test_start_then_pause() {
    let dir = TempDir::new().unwrap();

    pomocycle(&dir)
        .args(["run", "--no-sound"])
        .write_stdin("s\np\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("タイマーを開始しました"))
        .stdout(predicate::str::contains("タイマーを一時停止しました"));
}

#[test]
fn test_invalid_duration_is_rejected() {
    let dir = TempDir::new().unwrap();

    pomocycle(&dir)
        .write_stdin("set\n-5\n\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("時間設定を更新しました").not())
        .stderr(predicate::str::contains("作業時間が無効です"));
}

#[test]
fn test_set_durations_reports_new_values() {
    let dir = TempDir::new().unwrap();

    pomocycle(&dir)
        .write_stdin("set\n10\n90s\n\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("作業: 10:00"))
        .stdout(predicate::str::contains("短い休憩: 01:30"))
        .stdout(predicate::str::contains("長い休憩: 15:00"));
}

// ============================================================================
// Argument Tests
// ============================================================================

#[test]
fn test_zero_work_duration_is_rejected() {
    let dir = TempDir::new().unwrap();

    pomocycle(&dir).args(["run", "--work", "0"]).assert().failure();
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();

    pomocycle(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomocycle"));
}

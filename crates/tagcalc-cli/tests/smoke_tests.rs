//! Smoke tests for the tagcalc CLI

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the tagcalc binary bound to `dir`
fn tagcalc(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tagcalc").expect("tagcalc binary should exist");
    cmd.env("TAGCALC_DATA_DIR", dir.path())
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    tagcalc(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    tagcalc(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("press"))
        .stdout(predicate::str::contains("totals"))
        .stdout(predicate::str::contains("clear-history"));
}

#[test]
fn test_no_args_fails() {
    let dir = TempDir::new().unwrap();
    tagcalc(&dir).assert().failure();
}

// ============================================================================
// Calculator Tests
// ============================================================================

#[test]
fn test_press_records_rounded_result() {
    let dir = TempDir::new().unwrap();
    tagcalc(&dir)
        .args(["press", "7", "+", "3", "="])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "recorded [unselected] 7 + 3 = 1,000",
        ))
        .stdout(predicate::str::contains("display  1,000"));

    assert!(dir.path().join("calculatorHistory.json").exists());
}

#[test]
fn test_press_subtract_key() {
    let dir = TempDir::new().unwrap();
    tagcalc(&dir)
        .args(["press", "9000", "-", "1", "="])
        .assert()
        .success()
        .stdout(predicate::str::contains("9,000 - 1 = 9,000"));
}

#[test]
fn test_press_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    tagcalc(&dir)
        .args(["press", "7", "%", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Invalid argument: unknown key `%`"));
}

#[test]
fn test_history_and_memo_round_trip() {
    let dir = TempDir::new().unwrap();
    tagcalc(&dir).args(["tag", "add", "food"]).assert().success();
    tagcalc(&dir)
        .args(["press", "--tag", "food", "12*3="])
        .assert()
        .success();
    tagcalc(&dir)
        .args(["memo", "0", "lunch"])
        .assert()
        .success();

    tagcalc(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("[food] 12 * 3 = 1,000"))
        .stdout(predicate::str::contains("Memo: lunch"));

    tagcalc(&dir)
        .args(["history", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""memo": "lunch""#));
}

#[test]
fn test_memo_out_of_range_fails() {
    let dir = TempDir::new().unwrap();
    tagcalc(&dir)
        .args(["memo", "3", "nothing here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("history row 3 does not exist"));
}

#[test]
fn test_totals_ranking() {
    let dir = TempDir::new().unwrap();
    tagcalc(&dir)
        .args(["press", "--tag", "big", "200000+0="])
        .assert()
        .success();
    tagcalc(&dir)
        .args(["press", "--tag", "small", "50000+0="])
        .assert()
        .success();

    tagcalc(&dir)
        .arg("totals")
        .assert()
        .success()
        .stdout(predicate::str::contains("200,000  gold"))
        .stdout(predicate::str::contains("(-150,000)  gold-2"));

    tagcalc(&dir)
        .args(["totals", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""rank": "gold-2""#));
}

// ============================================================================
// Tag Tests
// ============================================================================

#[test]
fn test_tags_default_and_added() {
    let dir = TempDir::new().unwrap();
    tagcalc(&dir)
        .arg("tags")
        .assert()
        .success()
        .stdout("all-history\nunclassified\n");

    tagcalc(&dir)
        .args(["tag", "add", "trip"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Added tag `trip`"));

    tagcalc(&dir)
        .args(["tag", "add", "trip"])
        .assert()
        .success()
        .stderr(predicate::str::contains("already exists"));

    tagcalc(&dir)
        .arg("tags")
        .assert()
        .success()
        .stdout("all-history\nunclassified\ntrip\n");
}

#[test]
fn test_clear_history_keeps_memos() {
    let dir = TempDir::new().unwrap();
    tagcalc(&dir).args(["tag", "add", "x"]).assert().success();
    tagcalc(&dir).args(["press", "1+1="]).assert().success();
    tagcalc(&dir).args(["memo", "0", "kept"]).assert().success();

    tagcalc(&dir)
        .args(["clear-history", "-q"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    tagcalc(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("(no history)"));
    tagcalc(&dir)
        .arg("tags")
        .assert()
        .success()
        .stdout("all-history\nunclassified\n");

    let memos = fs::read_to_string(dir.path().join("calculatorHistoryMemos.json")).unwrap();
    assert_eq!(memos, r#"{"0":"kept"}"#);
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_config_shows_defaults() {
    let dir = TempDir::new().unwrap();
    tagcalc(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""memo_prompt": "Enter a memo:""#))
        .stdout(predicate::str::contains(r#""rounding_step": 1000.0"#));
}

#[test]
fn test_config_file_overrides() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("widget.json");
    fs::write(&config, r#"{"rounding_step": 10}"#).unwrap();

    tagcalc(&dir)
        .arg("--config")
        .arg(&config)
        .args(["press", "7+3="])
        .assert()
        .success()
        .stdout(predicate::str::contains("7 + 3 = 10"));
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("widget.json");
    fs::write(&config, r#"{"rounding_step": 0}"#).unwrap();

    tagcalc(&dir)
        .arg("--config")
        .arg(&config)
        .arg("tags")
        .assert()
        .failure()
        .stderr(predicate::str::contains("rounding_step"));
}

#[test]
fn test_malformed_store_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("calculatorHistory.json"), "{oops").unwrap();
    tagcalc(&dir)
        .arg("history")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed stored JSON"));
}

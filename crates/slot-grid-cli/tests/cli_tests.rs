//! Integration tests for the `slot-grid` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the layout,
//! fragments and week subcommands through the actual binary, including stdin
//! piping, file I/O and partial-failure reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the roster.json fixture.
fn roster_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/roster.json")
}

/// Helper: path to the invalid.json fixture.
fn invalid_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid.json")
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let output = Command::cargo_bin("slot-grid")
        .unwrap()
        .args(args)
        .output()
        .expect("binary must run");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn layout_stdin_to_stdout() {
    let input = r#"[{"start":"2026-03-02T09:00","end":"2026-03-02T10:00","label":"Visit"}]"#;

    Command::cargo_bin("slot-grid")
        .unwrap()
        .arg("layout")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"2/3/2026\""))
        .stdout(predicate::str::contains("\"Visit\""));
}

#[test]
fn layout_file_places_overlaps_in_columns() {
    let json = run_json(&["layout", "-i", roster_path()]);

    let day = &json["grid"]["2/3/2026"];
    let overlap = day["9:30"].as_array().unwrap();
    assert_eq!(overlap.len(), 2);
    assert_eq!(overlap[0]["label"], serde_json::Value::Null);
    assert_eq!(overlap[1]["label"], "Shower assist");
    assert_eq!(overlap[1]["column"], 1);
    assert_eq!(day["11:00"].as_array().unwrap().len(), 1);
    assert_eq!(json["grid"]["3/3/2026"]["0:00"][0]["is_head"], false);
    assert_eq!(json["rejected"], serde_json::json!([]));
}

#[test]
fn layout_week_projection_lists_seven_days() {
    let json = run_json(&["layout", "-i", roster_path(), "--week", "2026-03-04"]);

    assert_eq!(json["week"]["title"], "March 2026");
    assert_eq!(json["week"]["days"][0], "2/3/2026");
    assert_eq!(json["grid"].as_object().unwrap().len(), 7);
    assert_eq!(json["grid"]["8/3/2026"]["9:00"], serde_json::json!([]));
}

#[test]
fn layout_file_to_file() {
    let output_path = "/tmp/slot-grid-test-layout-output.json";
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("slot-grid")
        .unwrap()
        .args(["layout", "-i", roster_path(), "-o", output_path, "--pretty"])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    assert!(content.contains('\n'), "pretty output spans lines");
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert!(value["grid"]["2/3/2026"].is_object());

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn layout_reports_rejected_events_and_succeeds() {
    let json = run_json(&["layout", "-i", invalid_path()]);

    let rejected = json["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 2);
    assert_eq!(rejected[0]["input_index"], 1);
    assert_eq!(rejected[0]["label"], "Reversed");
    assert_eq!(rejected[1]["label"], "Garbled");
    assert_eq!(json["grid"]["2/3/2026"]["9:00"][0]["label"], "Valid visit");
}

#[test]
fn layout_strict_fails_on_rejections() {
    Command::cargo_bin("slot-grid")
        .unwrap()
        .args(["layout", "--strict", "-i", invalid_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 of 3 events rejected"));
}

#[test]
fn layout_max_span_days_flag() {
    let json = run_json(&["layout", "-i", roster_path(), "--max-span-days", "1"]);

    let rejected = json["rejected"].as_array().unwrap();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0]["label"], "Overnight");
}

#[test]
fn layout_rejects_non_array_input() {
    Command::cargo_bin("slot-grid")
        .unwrap()
        .arg("layout")
        .write_stdin(r#"{"start":"2026-03-02T09:00"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON array"));
}

#[test]
fn layout_missing_file_is_an_error() {
    Command::cargo_bin("slot-grid")
        .unwrap()
        .args(["layout", "-i", "/nonexistent/events.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Fragments subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fragments_show_midnight_split() {
    let json = run_json(&["fragments", "-i", roster_path()]);

    let fragments = json.as_array().unwrap();
    assert_eq!(fragments.len(), 5);

    let overnight: Vec<&serde_json::Value> = fragments
        .iter()
        .filter(|f| f["label"] == "Overnight")
        .collect();
    assert_eq!(overnight.len(), 2);
    assert_eq!(overnight[0]["day"], "2/3/2026");
    assert_eq!(overnight[0]["slots"], serde_json::json!(["23:00", "23:30"]));
    assert_eq!(overnight[1]["day"], "3/3/2026");
    assert_eq!(overnight[1]["weekday"], "Tue");
    assert_eq!(overnight[1]["is_tail"], true);
    assert_eq!(
        overnight[1]["slots"],
        serde_json::json!(["0:00", "0:30", "1:00", "1:30"])
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Week subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn week_prints_monday_first() {
    Command::cargo_bin("slot-grid")
        .unwrap()
        .args(["week", "--date", "2026-03-05"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("March 2026\nMon  2/3/2026\n"))
        .stdout(predicate::str::contains("Sun  8/3/2026"));
}

#[test]
fn week_offset_moves_backwards() {
    Command::cargo_bin("slot-grid")
        .unwrap()
        .args(["week", "--date", "2026-03-05", "--offset", "-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon  23/2/2026"))
        .stdout(predicate::str::starts_with("February - March 2026"));
}

#[test]
fn week_rejects_bad_date() {
    Command::cargo_bin("slot-grid")
        .unwrap()
        .args(["week", "--date", "05/03/2026"])
        .assert()
        .failure();
}

//! Integration tests for the `slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to run the `find` and
//! `meetings` subcommands against the roster fixture, via both file and stdin.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

const ALICE: &str = "11111111-1111-1111-1111-111111111111";
const BOB: &str = "22222222-2222-2222-2222-222222222222";
const CHARLIE: &str = "33333333-3333-3333-3333-333333333333";
const DIANA: &str = "44444444-4444-4444-4444-444444444444";
const EVE: &str = "55555555-5555-5555-5555-555555555555";

/// Helper: path to the roster.json fixture.
fn roster_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/roster.json")
}

/// Helper: read the roster.json fixture as a string.
fn roster_json() -> String {
    std::fs::read_to_string(roster_path()).expect("roster.json fixture must exist")
}

/// Helper: run `slots find` against the fixture and parse the JSON output.
fn find_slot(args: &[&str]) -> serde_json::Value {
    let output = Command::cargo_bin("slots")
        .unwrap()
        .args(["find", "-r", roster_path()])
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "slots find failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout must be JSON")
}

// ─────────────────────────────────────────────────────────────────────────────
// find subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn find_slot_after_shared_morning_meetings() {
    // Alice and Bob are busy 09:00-09:30 and 10:00-11:30 combined.
    let slot = find_slot(&[
        "-p", ALICE, "-p", BOB,
        "--duration", "60",
        "--earliest", "2025-06-20T09:00:00",
        "--latest", "2025-06-20T17:00:00",
    ]);

    assert_eq!(slot["start"], "2025-06-20T11:30:00+00:00");
    assert_eq!(slot["end"], "2025-06-20T12:30:00+00:00");
}

#[test]
fn find_short_slot_in_first_gap() {
    let slot = find_slot(&[
        "-p", ALICE, "-p", BOB,
        "--duration", "30",
        "--earliest", "2025-06-20T09:00:00Z",
        "--latest", "2025-06-20T17:00:00Z",
    ]);

    assert_eq!(slot["start"], "2025-06-20T09:30:00+00:00");
    assert_eq!(slot["end"], "2025-06-20T10:00:00+00:00");
}

#[test]
fn find_slot_before_first_meeting() {
    let slot = find_slot(&[
        "-p", CHARLIE, "-p", DIANA,
        "--duration", "60",
        "--earliest", "2025-06-20T09:00:00",
        "--latest", "2025-06-20T17:00:00",
    ]);

    assert_eq!(slot["start"], "2025-06-20T09:00:00+00:00");
}

#[test]
fn find_accepts_offsets_and_normalizes_to_utc() {
    // 12:00+02:00 is 10:00 UTC; Charlie is busy 10:00-10:30.
    let slot = find_slot(&[
        "-p", CHARLIE,
        "--duration", "60",
        "--earliest", "2025-06-20T12:00:00+02:00",
        "--latest", "2025-06-20T19:00:00+02:00",
    ]);

    assert_eq!(slot["start"], "2025-06-20T10:30:00+00:00");
}

#[test]
fn find_reads_roster_from_stdin() {
    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "find", "-p", EVE,
            "--duration", "30",
            "--earliest", "2025-06-20T10:00:00",
            "--latest", "2025-06-20T12:00:00",
        ])
        .write_stdin(roster_json())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""start":"2025-06-20T10:30:00+00:00""#));
}

#[test]
fn find_pretty_prints() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["find", "-r", roster_path(), "-p", ALICE, "--pretty"])
        .args(["--duration", "15", "--earliest", "2025-06-20T08:00:00", "--latest", "2025-06-20T09:00:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\n  \"start\""));
}

#[test]
fn find_reports_no_available_slot() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["find", "-r", roster_path()])
        .args(["-p", ALICE, "-p", BOB, "-p", CHARLIE, "-p", DIANA, "-p", EVE])
        .args([
            "--duration", "60",
            "--earliest", "2025-06-20T12:00:00",
            "--latest", "2025-06-20T17:00:00",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("scheduling.no_available_slot"));
}

#[test]
fn find_reports_unknown_participant() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["find", "-r", roster_path()])
        .args(["-p", ALICE, "-p", "99999999-9999-9999-9999-999999999999"])
        .args([
            "--duration", "30",
            "--earliest", "2025-06-20T09:00:00",
            "--latest", "2025-06-20T17:00:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scheduling.invalid_participants"))
        .stderr(predicate::str::contains("99999999-9999-9999-9999-999999999999"));
}

#[test]
fn find_rejects_zero_duration() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["find", "-r", roster_path(), "-p", ALICE])
        .args([
            "--duration", "0",
            "--earliest", "2025-06-20T09:00:00",
            "--latest", "2025-06-20T17:00:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scheduling.non_positive_duration"));
}

#[test]
fn find_rejects_duration_beyond_time_range() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["find", "-r", roster_path(), "-p", ALICE])
        .args([
            "--duration", "9223372036854775807",
            "--earliest", "2025-06-20T09:00:00",
            "--latest", "2025-06-20T17:00:00",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Duration out of range: 9223372036854775807 minutes"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn find_rejects_inverted_window() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["find", "-r", roster_path(), "-p", ALICE])
        .args([
            "--duration", "30",
            "--earliest", "2025-06-20T17:00:00",
            "--latest", "2025-06-20T09:00:00",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scheduling.invalid_window"));
}

#[test]
fn find_rejects_unparseable_datetime() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["find", "-r", roster_path(), "-p", ALICE])
        .args(["--duration", "30", "--earliest", "tomorrow", "--latest", "2025-06-20T09:00:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid datetime 'tomorrow'"));
}

#[test]
fn find_requires_a_participant() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["find", "-r", roster_path()])
        .args([
            "--duration", "30",
            "--earliest", "2025-06-20T09:00:00",
            "--latest", "2025-06-20T17:00:00",
        ])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// meetings subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn meetings_lists_participant_meetings_in_order() {
    let output = Command::cargo_bin("slots")
        .unwrap()
        .args(["meetings", "-r", roster_path(), "-p", BOB])
        .output()
        .unwrap();
    assert!(output.status.success());

    let meetings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let meetings = meetings.as_array().expect("array of meetings");
    assert_eq!(meetings.len(), 2);
    assert_eq!(meetings[0]["id"], "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa");
    assert_eq!(meetings[1]["id"], "cccccccc-cccc-cccc-cccc-cccccccccccc");
}

#[test]
fn meetings_for_unknown_participant_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["meetings", "-r", roster_path()])
        .args(["-p", "99999999-9999-9999-9999-999999999999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scheduling.participant_not_found"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Roster errors
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_roster_file_fails_with_path() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["meetings", "-r", "/nonexistent/roster.json", "-p", ALICE])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file: /nonexistent/roster.json"));
}

#[test]
fn malformed_roster_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args(["meetings", "-p", ALICE])
        .write_stdin("{ not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse roster JSON"));
}

#[test]
fn roster_meeting_with_inverted_times_fails() {
    let roster = format!(
        r#"{{
            "participants": [{{ "id": "{ALICE}", "name": "Alice" }}],
            "meetings": [{{
                "id": "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa",
                "start": "2025-06-20T10:00:00Z",
                "end": "2025-06-20T09:00:00Z",
                "participants": ["{ALICE}"]
            }}]
        }}"#
    );

    Command::cargo_bin("slots")
        .unwrap()
        .args(["meetings", "-r", "-", "-p", ALICE])
        .write_stdin(roster)
        .assert()
        .failure()
        .stderr(predicate::str::contains("scheduling.invalid_interval"));
}

//! Integration tests for the lunara binary.
//!
//! These tests verify end-to-end behavior including:
//! - Onboarding and the today view
//! - Day-1 marking and retroactive correction
//! - Check-in logging and merging
//! - CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("lunara"))
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Personal cycle tracking from the command line",
        ));
}

#[test]
fn test_today_without_profile_degrades() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No profile yet"));
}

#[test]
fn test_setup_then_today() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--last-period")
        .arg("2024-01-01")
        .arg("--cycle-length")
        .arg("28")
        .arg("--period-length")
        .arg("5")
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile saved"));

    // day 3 of a 28/5 cycle is menstrual
    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-01-03")
        .assert()
        .success()
        .stdout(predicate::str::contains("MENSTRUAL PHASE"))
        .stdout(predicate::str::contains("day 3 of 28"));
}

#[test]
fn test_setup_rejects_invalid_cycle_length() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--last-period")
        .arg("2024-01-01")
        .arg("--cycle-length")
        .arg("40")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cycle length"));
}

#[test]
fn test_phase_lookup_matches_partition() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--last-period")
        .arg("2024-01-01")
        .assert()
        .success();

    // day 15 of the default 28/5 cycle is ovulatory
    cli()
        .arg("phase")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-01-15")
        .assert()
        .success()
        .stdout(predicate::str::contains("day 15"))
        .stdout(predicate::str::contains("Ovulatory"));
}

#[test]
fn test_mark_day1_corrects_from_that_date_forward() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--last-period")
        .arg("2024-01-01")
        .assert()
        .success();

    // confirm the original Day 1, then retroactively mark a newer one
    for date in ["2024-01-01", "2024-02-01"] {
        cli()
            .arg("mark-day1")
            .arg("--data-dir")
            .arg(data_dir)
            .arg(date)
            .assert()
            .success()
            .stdout(predicate::str::contains("Marked"));
    }

    // 2024-02-03 resolves against the new Day 1, not the earlier one
    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-02-03")
        .assert()
        .success()
        .stdout(predicate::str::contains("day 3 of 28"));

    // dates before the marker keep resolving against the earlier start
    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-01-15")
        .assert()
        .success()
        .stdout(predicate::str::contains("day 15 of 28"));
}

#[test]
fn test_unmark_day1_restores_previous_start() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--last-period")
        .arg("2024-01-01")
        .assert()
        .success();

    for date in ["2024-01-01", "2024-02-01"] {
        cli()
            .arg("mark-day1")
            .arg("--data-dir")
            .arg(data_dir)
            .arg(date)
            .assert()
            .success();
    }

    cli()
        .arg("unmark-day1")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("2024-02-01")
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile start moved to 2024-01-01"));

    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-02-03")
        .assert()
        .success()
        .stdout(predicate::str::contains("day 6 of 28"));
}

#[test]
fn test_history_lists_day1_dates() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--last-period")
        .arg("2024-01-01")
        .assert()
        .success();

    for date in ["2024-01-01", "2024-02-01"] {
        cli()
            .arg("mark-day1")
            .arg("--data-dir")
            .arg(data_dir)
            .arg(date)
            .assert()
            .success();
    }

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-02-01 (current cycle start)"))
        .stdout(predicate::str::contains("2024-01-01"));
}

#[test]
fn test_checkin_saves_and_merges() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("checkin")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-03-05")
        .arg("--score")
        .arg("mood=4")
        .arg("--symptom")
        .arg("Cramps")
        .assert()
        .success()
        .stdout(predicate::str::contains("mood: 4 (Positive)"));

    // second write merges with the first
    cli()
        .arg("checkin")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-03-05")
        .arg("--score")
        .arg("sleep=2")
        .assert()
        .success()
        .stdout(predicate::str::contains("mood: 4"))
        .stdout(predicate::str::contains("sleep: 2 (Poor)"))
        .stdout(predicate::str::contains("Symptoms: Cramps"));
}

#[test]
fn test_checkin_rejects_unknown_score_key() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("checkin")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--score")
        .arg("caffeine=3")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown scorecard key"));
}

#[test]
fn test_checkin_rejects_out_of_range_score() {
    let temp_dir = setup_test_dir();

    cli()
        .arg("checkin")
        .arg("--data-dir")
        .arg(temp_dir.path())
        .arg("--score")
        .arg("mood=7")
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 5"));
}

#[test]
fn test_export_creates_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let csv_path = data_dir.join("out.csv");

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--last-period")
        .arg("2024-01-01")
        .assert()
        .success();

    cli()
        .arg("checkin")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-01-03")
        .arg("--score")
        .arg("mood=4")
        .assert()
        .success();

    cli()
        .arg("export")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--out")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 check-ins"));

    let contents = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(contents.contains("date,recorded_at,cycle_day,phase"));
    assert!(contents.contains("2024-01-03"));
    assert!(contents.contains("Menstrual"));
}

#[test]
fn test_moon_epoch_is_new_moon() {
    cli()
        .arg("moon")
        .arg("--date")
        .arg("2000-01-06")
        .assert()
        .success()
        .stdout(predicate::str::contains("New Moon"));
}

#[test]
fn test_late_luteal_advice_swap() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("setup")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--last-period")
        .arg("2024-01-01")
        .assert()
        .success();

    // day 25 of a 28-day cycle: 3 days to the next period
    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-01-25")
        .assert()
        .success()
        .stdout(predicate::str::contains("LUTEAL PHASE"))
        .stdout(predicate::str::contains("Late luteal"));

    // day 20 is luteal but not yet late
    cli()
        .arg("today")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--date")
        .arg("2024-01-20")
        .assert()
        .success()
        .stdout(predicate::str::contains("LUTEAL PHASE"))
        .stdout(predicate::str::contains("Late luteal").not());
}

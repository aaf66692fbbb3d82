//! End-to-end runs of the `extrack` binary against a temporary store.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command with its store and config isolated inside `dir`.
fn cli_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("extrack").expect("Failed to find extrack binary");
    cmd.env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env_remove("EXTRACK_DATA_FILE")
        .env("NO_COLOR", "1")
        .arg("--data-file")
        .arg(store_path(dir));
    cmd
}

fn store_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("logs.json")
}

fn write(path: &Path, content: &str) {
    std::fs::write(path, content).unwrap();
}

const FEBRUARY: &str = r#"[
  {"date": "2026-02-09", "exercises": [{"id": "1", "name": "Run", "durationMinutes": 30}]},
  {"date": "2026-02-10", "exercises": [{"id": "2", "name": "Bike", "durationMinutes": 20}]},
  {"date": "2026-02-17", "exercises": [{"id": "3", "name": "Run", "durationMinutes": 60}]}
]"#;

fn seed(dir: &TempDir) {
    let file = dir.path().join("february.json");
    write(&file, FEBRUARY);
    cli_cmd(dir)
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 daily logs."));
}

#[test]
fn add_then_show_a_day() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["log", "add", "Run", "30", "--date", "2026-02-09", "--distance", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added 1."));
    cli_cmd(&dir)
        .args(["log", "add", "Plank", "5", "--date", "2026-02-09", "--sets", "3"])
        .assert()
        .success();

    cli_cmd(&dir)
        .args(["log", "show", "--date", "2026-02-09"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mon, Feb 9, 2026"))
        .stdout(predicate::str::contains("5 km"))
        .stdout(predicate::str::contains("3 sets"))
        .stdout(predicate::str::contains("35 min"));
}

#[test]
fn invalid_add_reports_first_error_and_writes_nothing() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["log", "add", "Run", "0", "--date", "2026-02-09"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Exercise 1: Duration must be a positive number.",
        ));
    assert!(!store_path(&dir).exists());
}

#[test]
fn weekly_summary_as_json() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    let output = cli_cmd(&dir)
        .args(["--json", "summary", "weekly", "--date", "2026-02-10"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["totalMinutes"], 50.0);
    assert_eq!(value["summary"]["averageMinutesPerDay"], 7.1);
    assert_eq!(value["summary"]["breakdownByExercise"]["run"], 30.0);
    assert_eq!(value["dailyTotals"].as_array().map(Vec::len), Some(7));
}

#[test]
fn insights_text() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    cli_cmd(&dir)
        .arg("insights")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 days"))
        .stdout(predicate::str::contains("Tue, Feb 17, 2026"))
        .stdout(predicate::str::contains("20%"));
}

#[test]
fn month_totals_are_zero_filled() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    let output = cli_cmd(&dir)
        .args(["--json", "totals", "month", "--date", "2026-02-01"])
        .output()
        .unwrap();
    let points: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let points = points.as_array().unwrap();
    assert_eq!(points.len(), 28);
    assert_eq!(points[16]["date"], "2026-02-17");
    assert_eq!(points[16]["totalMinutes"], 60.0);
    assert_eq!(points[0]["totalMinutes"], 0.0);
}

#[test]
fn bad_import_keeps_existing_logs() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    let bad = dir.path().join("bad.json");
    write(
        &bad,
        r#"[{"date": "2026-03-01", "exercises": [{"id": "9", "name": "Run", "durationMinutes": 10}]},
            {"date": "03/02/2026", "exercises": [{"id": "8", "name": "Run", "durationMinutes": 10}]}]"#,
    );
    cli_cmd(&dir)
        .arg("import")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Import failed for 03/02/2026: Date must be formatted as YYYY-MM-DD.",
        ));

    write(&bad, r#"{"date": "2026-03-01"}"#);
    cli_cmd(&dir)
        .arg("import")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JSON structure. Expected an array."));

    let output = cli_cmd(&dir).args(["--json", "trend"]).output().unwrap();
    let series: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(series.as_array().map(Vec::len), Some(3));
}

#[test]
fn export_writes_pretty_json() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    let out = dir.path().join("export.json");
    cli_cmd(&dir)
        .arg("export")
        .arg("--file")
        .arg(&out)
        .assert()
        .success();

    let exported = std::fs::read_to_string(&out).unwrap();
    assert!(exported.starts_with("[\n  {\n    \"date\": \"2026-02-09\""));
    let logs: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(logs.as_array().map(Vec::len), Some(3));
}

#[test]
fn remove_last_exercise_clears_the_day() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    cli_cmd(&dir)
        .args(["log", "remove", "1", "--date", "2026-02-10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed `Bike`"));
    cli_cmd(&dir)
        .args(["log", "remove", "5", "--date", "2026-02-09"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 1"));

    let output = cli_cmd(&dir).args(["--json", "log", "list"]).output().unwrap();
    let days: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let dates: Vec<&str> = days
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["date"].as_str())
        .collect();
    assert_eq!(dates, vec!["2026-02-09", "2026-02-17"]);
}

#[test]
fn clear_day() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    cli_cmd(&dir)
        .args(["log", "clear", "--date", "2026-02-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Day cleared."));
    cli_cmd(&dir)
        .args(["log", "clear", "--date", "2026-02-17"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing logged"));
}

#[test]
fn set_replaces_a_day_from_file() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    let day = dir.path().join("day.json");
    write(
        &day,
        r#"[{"name": "Yoga", "durationMinutes": 25}, {"name": ""}, {"name": "Row", "durationMinutes": 15, "distanceKm": 3}]"#,
    );
    cli_cmd(&dir)
        .args(["log", "set", "--date", "2026-02-10"])
        .arg(&day)
        .assert()
        .success()
        .stdout(predicate::str::contains("saved 2 exercises"));

    let output = cli_cmd(&dir)
        .args(["--json", "summary", "daily", "--date", "2026-02-10"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["totalMinutes"], 40.0);
    assert!(value["summary"]["breakdownByExercise"].get("bike").is_none());
}

#[test]
fn corrupted_store_reads_empty_but_check_fails() {
    let dir = TempDir::new().unwrap();
    write(&store_path(&dir), "{ not json");

    cli_cmd(&dir)
        .args(["--json", "trend"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
    cli_cmd(&dir)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("unreadable"));
}

#[test]
fn demo_data_loads() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 10 daily logs."));
    cli_cmd(&dir)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("10 days stored"));
}

#[test]
fn config_set_get_unset() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["config", "set", "data_file", "/tmp/elsewhere.json"])
        .assert()
        .success();
    cli_cmd(&dir)
        .args(["config", "get", "data_file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/elsewhere.json"));
    cli_cmd(&dir)
        .args(["config", "unset", "data_file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));
    cli_cmd(&dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(no config set)"));
}

#[test]
fn import_without_ids_and_with_text_duration() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("handwritten.json");

    write(
        &file,
        r#"[{"date": "2026-02-09", "exercises": [{"name": "Run", "durationMinutes": "abc"}]}]"#,
    );
    cli_cmd(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Import failed for 2026-02-09: Exercise 1: Duration must be a positive number.",
        ));

    write(
        &file,
        r#"[{"date": "2026-02-09", "exercises": [{"name": "Run", "durationMinutes": 30}]}]"#,
    );
    cli_cmd(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 daily logs."));
    cli_cmd(&dir)
        .args(["log", "show", "--date", "2026-02-09"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Run"));
}

#[test]
fn config_works_with_an_unreadable_store() {
    let dir = TempDir::new().unwrap();
    write(&store_path(&dir), "{not json");

    cli_cmd(&dir)
        .args(["config", "get", "data_file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("key `data_file` not found"));
    cli_cmd(&dir)
        .args(["config", "unset", "data_file"])
        .assert()
        .success()
        .stdout(predicate::str::contains("key `data_file` not found"));
}

//! End-to-end tests driving the `daylog` binary against temporary logs.

use std::io::Write;
use std::process::{Command, Output};

use tempfile::{NamedTempFile, TempDir};

const LOG: &str = "\
random preamble that is not a header
3/14/24 Th 0700-2330
2330 LO lo
2200 P hw ITSC 101 notes
2000 S comm texting mom
1200 E lunch
this line is garbage
3/15/24 F 0800-2300
2300 LO lo
2100 F games
1700 W gym
0800 R poop
";

fn daylog_binary() -> String {
    env!("CARGO_BIN_EXE_daylog").to_string()
}

/// Runs daylog with an isolated HOME and the given log file.
fn run_daylog(home: &TempDir, log: &std::path::Path, args: &[&str]) -> Output {
    Command::new(daylog_binary())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG")
        .arg("--file")
        .arg(log)
        .args(args)
        .output()
        .expect("failed to run daylog")
}

fn write_log(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("diaw.txt");
    std::fs::write(&path, contents).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "daylog failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_status_reports_two_days() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let output = stdout(&run_daylog(&temp, &log, &["status"]));
    assert!(output.contains("Days: 2 (0 undated)"), "{output}");
    assert!(output.contains("Activities: 6"), "{output}");
    assert!(output.contains("Sleep intervals: 1"), "{output}");
}

#[test]
fn test_activities_json_excludes_lights_out() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let output = stdout(&run_daylog(&temp, &log, &["activities", "--json"]));
    let rows: serde_json::Value = serde_json::from_str(&output).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 6);
    assert!(
        rows.iter()
            .all(|row| !row["description"].as_str().unwrap().eq_ignore_ascii_case("lo"))
    );
    assert!(rows.iter().all(|row| row["duration_minutes"].as_u64().unwrap() > 0));

    let hw = rows
        .iter()
        .find(|row| row["description"] == "hw ITSC 101 notes")
        .unwrap();
    assert_eq!(hw["duration_minutes"], 90);
    assert_eq!(hw["category_name"], "Productive");
}

#[test]
fn test_sleep_json_interval() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let output = stdout(&run_daylog(&temp, &log, &["sleep", "--json"]));
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["intervals"][0]["current_date"], "3/14/24");
    assert_eq!(report["intervals"][0]["next_date"], "3/15/24");
    assert_eq!(report["intervals"][0]["sleep_duration_hours"], 8.5);
}

#[test]
fn test_repeated_runs_are_identical() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, LOG);

    let first = stdout(&run_daylog(&temp, &log, &["summary", "--json"]));
    let second = stdout(&run_daylog(&temp, &log, &["summary", "--json"]));
    assert_eq!(first, second);
}

#[test]
fn test_missing_log_file_fails_gracefully() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.txt");

    let output = run_daylog(&temp, &missing, &["status"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("log file not found"), "{stderr}");
}

#[test]
fn test_config_file_sets_log_path_and_page_size() {
    let temp = TempDir::new().unwrap();
    let log = write_log(
        &temp,
        "3/14/24 Th 0700-2330\n2330 LO lo\n2200 P alpha\n2000 P beta\n1800 P gamma\n",
    );

    let mut config_file = NamedTempFile::new().unwrap();
    writeln!(config_file, "log_path = {:?}", log.display().to_string()).unwrap();
    writeln!(config_file, "page_size = 2").unwrap();
    config_file.flush().unwrap();

    let output = Command::new(daylog_binary())
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join(".config"))
        .arg("--config")
        .arg(config_file.path())
        .arg("details")
        .arg("P")
        .output()
        .expect("failed to run daylog");

    let output = stdout(&output);
    assert!(output.starts_with("Productive (P) activities, page 1/2\n"), "{output}");
}

#[test]
fn test_no_subcommand_shows_help() {
    let output = Command::new(daylog_binary())
        .output()
        .expect("failed to run daylog");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "{stdout}");
}

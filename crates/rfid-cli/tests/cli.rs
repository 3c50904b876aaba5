use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

const WHITE: &str = "1 1 1 1 1 1 1 1 1 0 0 0 0 0 1 1 0 0 0 0 0 0 0 0 0 0 0 0 0 1 1 0 0 0";
const PURPLE: &str = "1 1 1 1 1 1 1 1 1 0 0 0 0 0 1 1 0 0 0 0 0 0 0 0 1 1 1 1 0 0 0 1 1 0";

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("rfid-decode"))
}

fn golden(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("golden")
        .join("mixed")
        .join(name)
}

fn write_input(temp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, contents).expect("write input");
    path
}

#[test]
fn help_succeeds() {
    cmd().arg("--help").assert().success();
}

#[test]
fn missing_argument_exits_with_usage_code() {
    cmd().assert().code(1);
}

#[test]
fn extra_argument_exits_with_usage_code() {
    cmd().arg("a.txt").arg("b.txt").assert().code(1);
}

#[test]
fn missing_input_exits_with_input_code() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.txt");

    cmd()
        .arg(&missing)
        .assert()
        .code(2)
        .stderr(contains("error:").and(contains("missing.txt")));
    assert!(!temp.path().join("missing.out").exists());
}

#[test]
fn unwritable_output_exits_with_output_code() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_input(&temp, "tags.txt", WHITE);
    let output = temp.path().join("no_such_dir").join("tags.out");

    cmd()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(3)
        .stderr(contains("could not open"));
}

#[test]
fn report_matching_input_is_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_input(&temp, "tags.out", WHITE);

    cmd()
        .arg(&input)
        .assert()
        .code(3)
        .stderr(contains("must differ from input").and(contains("hint:")));
    assert_eq!(fs::read_to_string(&input).expect("input"), WHITE);
}

#[test]
fn writes_report_next_to_input() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_input(&temp, "rfid_data_1.txt", &format!("{WHITE}\n\n"));

    cmd()
        .arg(&input)
        .assert()
        .success()
        .stdout(contains("Decoding complete.").and(contains("rfid_data_1.out")));

    let report = fs::read_to_string(temp.path().join("rfid_data_1.out")).expect("report");
    assert!(report.starts_with("Sequence 1: "));
    assert!(report.ends_with("\tColor:\n\t\tWhite\n\n"));
    assert!(!report.contains("Sequence 2: "));
}

#[test]
fn golden_input_matches_expected_report() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("mixed.out");

    cmd()
        .arg(golden("input.txt"))
        .arg("-o")
        .arg(&output)
        .arg("--quiet")
        .assert()
        .success()
        .stdout(contains("Decoding complete.").not());

    let expected = fs::read_to_string(golden("expected.out")).expect("expected");
    let actual = fs::read_to_string(&output).expect("report");
    assert_eq!(actual, expected);
}

#[test]
fn legacy_flags_reproduce_old_decoder() {
    let temp = TempDir::new().expect("tempdir");
    let output = temp.path().join("legacy.out");

    cmd()
        .arg(golden("input.txt"))
        .arg("-o")
        .arg(&output)
        .arg("--parity")
        .arg("first-pair")
        .arg("--color-table")
        .arg("fallthrough")
        .assert()
        .success();

    let expected = fs::read_to_string(golden("expected_legacy.out")).expect("expected");
    let actual = fs::read_to_string(&output).expect("report");
    assert_eq!(actual, expected);
}

#[test]
fn repeated_runs_append_unless_truncated() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_input(&temp, "tags.txt", &format!("{WHITE}\n"));
    let output = temp.path().join("tags.out");

    cmd().arg(&input).arg("-q").assert().success();
    cmd().arg(&input).arg("-q").assert().success();
    let report = fs::read_to_string(&output).expect("report");
    assert_eq!(report.matches("Sequence 1: ").count(), 2);

    cmd().arg(&input).arg("-q").arg("--truncate").assert().success();
    let report = fs::read_to_string(&output).expect("report");
    assert_eq!(report.matches("Sequence 1: ").count(), 1);
}

#[test]
fn json_format_writes_one_object_per_record() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_input(&temp, "tags.txt", &format!("{WHITE}\n{PURPLE}\n"));
    let output = temp.path().join("tags.out");

    cmd()
        .arg(&input)
        .arg("--format")
        .arg("json")
        .arg("-q")
        .assert()
        .success();

    let report = fs::read_to_string(&output).expect("report");
    let records: Vec<Value> = report
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json"))
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["sequence_number"], 1);
    assert_eq!(records[0]["color"], "White");
    assert_eq!(records[1]["identifier"], 3087);
    assert_eq!(records[1]["color"], "Purple");
}

#[test]
fn glob_pattern_resolves_single_match() {
    let temp = TempDir::new().expect("tempdir");
    write_input(&temp, "only.txt", WHITE);
    let pattern = temp.path().join("*.txt");

    cmd().arg(&pattern).arg("-q").assert().success();
    assert!(temp.path().join("only.out").exists());
}

#[test]
fn glob_pattern_with_several_matches_fails() {
    let temp = TempDir::new().expect("tempdir");
    write_input(&temp, "a.txt", WHITE);
    write_input(&temp, "b.txt", WHITE);
    let pattern = temp.path().join("*.txt");

    cmd()
        .arg(&pattern)
        .assert()
        .code(2)
        .stderr(contains("multiple files match").and(contains("hint:")));
}

#[test]
fn verbose_logs_records_to_stderr() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_input(&temp, "tags.txt", "1 1 1\n");

    cmd()
        .arg(&input)
        .arg("-v")
        .env_remove("RFID_LOG")
        .assert()
        .success()
        .stderr(contains("malformed record line").and(contains("record decoded")));
}

#[test]
fn directory_input_exits_with_input_code_and_writes_nothing() {
    let temp = TempDir::new().expect("tempdir");
    let dir = temp.path().join("tags");
    fs::create_dir(&dir).expect("mkdir");
    let output = temp.path().join("tags.out");

    cmd()
        .arg(&dir)
        .arg("-o")
        .arg(&output)
        .assert()
        .code(2)
        .stderr(contains("input is not a file").and(contains("hint:")));
    assert!(!output.exists());
}

#[test]
fn log_env_enables_debug_without_verbose_flag() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_input(&temp, "tags.txt", &format!("{WHITE}\n"));

    cmd()
        .arg(&input)
        .arg("-q")
        .env("RFID_LOG", "debug")
        .assert()
        .success()
        .stderr(contains("record decoded").and(contains("\x1b[").not()));
}

#[test]
fn log_env_overrides_verbose_flag() {
    let temp = TempDir::new().expect("tempdir");
    let input = write_input(&temp, "tags.txt", "1 1 1\n");

    cmd()
        .arg(&input)
        .arg("-q")
        .arg("-v")
        .env("RFID_LOG", "error")
        .assert()
        .success()
        .stderr(contains("record decoded").not().and(contains("malformed").not()));
}

#[cfg(target_os = "linux")]
#[test]
fn write_failure_exits_with_output_code() {
    let temp = TempDir::new().expect("tempdir");
    let records = vec![WHITE; 200].join("\n");
    let input = write_input(&temp, "tags.txt", &records);

    cmd()
        .arg(&input)
        .arg("-o")
        .arg("/dev/full")
        .assert()
        .code(3)
        .stderr(contains("failed to write report"));
}

//! CLI behavior tests: exit codes, output formats, init, history.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const SUBMISSIONS: &str = "test-data/submissions";
const ARRAYS_LOOPS: &str = "test-data/submissions/arrays_loops.json";
const PERFECT: &str = "test-data/submissions/perfect.json";
const EASY_STRUGGLES: &str = "test-data/submissions/easy_struggles.json";

fn learnbox_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_learnbox"));
    cmd.env("NO_COLOR", "1").env_remove("LEARNBOX_LOG");
    cmd
}

fn json_of(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let s = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(s.trim()).expect("valid JSON")
}

#[test]
fn no_args_returns_error_not_panic() {
    let mut cmd = learnbox_cmd();
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("PATH"));
}

#[test]
fn below_threshold_exit_1() {
    let mut cmd = learnbox_cmd();
    cmd.arg(ARRAYS_LOOPS).arg("--threshold").arg("90");
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Score 60 is below threshold 90"));
}

#[test]
fn threshold_at_exact_score_passes() {
    let mut cmd = learnbox_cmd();
    cmd.arg(ARRAYS_LOOPS).arg("--threshold").arg("60");
    cmd.assert().success();
}

#[test]
fn above_threshold_exit_0() {
    let mut cmd = learnbox_cmd();
    cmd.arg(PERFECT).arg("--threshold").arg("80");
    cmd.assert().success();
}

#[test]
fn console_output_shows_topics_and_recommendations() {
    let mut cmd = learnbox_cmd();
    cmd.arg(ARRAYS_LOOPS);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Topics (weakest first):"))
        .stdout(predicate::str::contains("Arrays (1/3, weak)"))
        .stdout(predicate::str::contains("[CRITICAL] Arrays needs attention"));
}

#[test]
fn verbose_output_expands_study_plan() {
    let mut cmd = learnbox_cmd();
    cmd.arg(EASY_STRUGGLES).arg("--verbose");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Resources:"))
        .stdout(predicate::str::contains("[HIGH] Only 3/10 EASY questions correct"));
}

#[test]
fn json_output_single_file() {
    let parsed = json_of(learnbox_cmd().arg(ARRAYS_LOOPS).arg("--json"));
    assert_eq!(parsed["score"]["value"], 60);
    assert_eq!(parsed["topics"][0]["topic"], "Arrays");
    assert_eq!(parsed["topics"][0]["accuracy"], 33.3);
    assert_eq!(parsed["topics"][1]["topic"], "Loops");
    let recs = parsed["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0]["priority"], "CRITICAL");
    assert_eq!(recs[0]["topic"], "Arrays");
}

#[test]
fn json_output_directory_has_summary() {
    let parsed = json_of(learnbox_cmd().arg(SUBMISSIONS).arg("--json"));
    let results = parsed["results"].as_array().unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(parsed["summary"]["filesAnalyzed"], 4);
    assert_eq!(parsed["summary"]["averageScore"], 60);
    assert_eq!(parsed["summary"]["averageGrade"], "D");
    assert_eq!(parsed["summary"]["totalQuestions"], 25);
}

#[test]
fn parallel_matches_sequential() {
    let sequential = json_of(learnbox_cmd().arg(SUBMISSIONS).arg("--json"));
    let parallel = json_of(
        learnbox_cmd()
            .arg(SUBMISSIONS)
            .arg("--json")
            .arg("--parallel")
            .arg("--jobs")
            .arg("2"),
    );
    assert_eq!(sequential, parallel);
}

#[test]
fn quiet_output_one_line_per_file() {
    let mut cmd = learnbox_cmd();
    cmd.arg(PERFECT).arg("--quiet");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let s = String::from_utf8_lossy(&output.stdout);
    assert_eq!(s.trim().lines().count(), 1);
    assert!(s.contains("perfect.json: 100 (A)"));
}

#[test]
fn path_not_found_exit_2() {
    let mut cmd = learnbox_cmd();
    cmd.arg("nonexistent.json");
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Path does not exist"));
}

#[test]
fn invalid_submission_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("broken.json");
    fs::write(&file, "{ not json").unwrap();
    let mut cmd = learnbox_cmd();
    cmd.arg(&file);
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid submission JSON"));
}

#[test]
fn empty_directory_exit_2() {
    let dir = tempfile::TempDir::new().unwrap();
    let mut cmd = learnbox_cmd();
    cmd.arg(dir.path());
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("No submission files found"));
}

#[test]
fn config_threshold_applies() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::copy(ARRAYS_LOOPS, dir.path().join("quiz.json")).unwrap();
    fs::write(
        dir.path().join(".learnboxrc.json"),
        r#"{ "threshold": 75 }"#,
    )
    .unwrap();

    let mut cmd = learnbox_cmd();
    cmd.arg(dir.path()).arg("--quiet");
    cmd.assert().failure().code(1);

    // CLI flag wins over config
    let mut cmd = learnbox_cmd();
    cmd.arg(dir.path()).arg("--quiet").arg("--threshold").arg("50");
    cmd.assert().success();
}

#[test]
fn config_thresholds_change_buckets() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::copy(ARRAYS_LOOPS, dir.path().join("quiz.json")).unwrap();
    fs::write(
        dir.path().join(".learnboxrc.json"),
        r#"{ "thresholds": { "weakBelow": 30 } }"#,
    )
    .unwrap();

    let parsed = json_of(learnbox_cmd().arg(dir.path()).arg("--json"));
    assert_eq!(parsed["weakTopics"].as_array().unwrap().len(), 0);
    assert_eq!(parsed["moderateTopics"][0], "Arrays");
    assert_eq!(parsed["recommendations"][0]["priority"], "MEDIUM");
}

#[test]
fn track_records_history_and_shows_progress() {
    let dir = tempfile::TempDir::new().unwrap();
    let quiz = dir.path().join("quiz.json");
    fs::copy(ARRAYS_LOOPS, &quiz).unwrap();

    let mut first = learnbox_cmd();
    first.arg(dir.path()).arg("--track");
    first.assert().success();
    assert!(dir.path().join(".learnbox-history.json").exists());

    fs::copy(PERFECT, &quiz).unwrap();
    let mut second = learnbox_cmd();
    second.arg(dir.path()).arg("--track").arg("--quiet");
    second
        .assert()
        .success()
        .stdout(predicate::str::contains("[was 60, up 40]"));
}

#[test]
fn history_file_is_not_analyzed() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::copy(PERFECT, dir.path().join("quiz.json")).unwrap();
    learnbox_cmd()
        .arg(dir.path())
        .arg("--track")
        .assert()
        .success();

    let mut cmd = learnbox_cmd();
    cmd.arg(dir.path()).arg("--quiet");
    let output = cmd.output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim().lines().count(), 1);
}

#[test]
fn init_creates_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(".learnboxrc.json");
    let mut cmd = learnbox_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path()).arg("--threshold").arg("70");
    cmd.assert().success();
    assert!(config_path.exists(), ".learnboxrc.json should be created");
    let content = fs::read_to_string(&config_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed["threshold"], 70);
    assert!(parsed["thresholds"].is_object());
}

#[test]
fn init_does_not_overwrite_existing() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join(".learnboxrc.json");
    fs::write(&config_path, r#"{ "threshold": 42 }"#).unwrap();
    let mut cmd = learnbox_cmd();
    cmd.arg("init").arg("--dir").arg(dir.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(
        fs::read_to_string(&config_path).unwrap(),
        r#"{ "threshold": 42 }"#
    );
}

#[test]
fn track_matches_same_file_spelled_differently() {
    let dir = tempfile::TempDir::new().unwrap();
    let quiz = dir.path().join("quiz.json");
    fs::copy(ARRAYS_LOOPS, &quiz).unwrap();

    learnbox_cmd()
        .arg(&quiz)
        .arg("--track")
        .arg("--quiet")
        .assert()
        .success();

    fs::copy(PERFECT, &quiz).unwrap();
    learnbox_cmd()
        .current_dir(dir.path())
        .arg("./quiz.json")
        .arg("--track")
        .arg("--quiet")
        .assert()
        .success()
        .stdout(predicate::str::contains("[was 60, up 40]"));
}

#[test]
fn malformed_fields_still_analyzed() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("sloppy.json");
    fs::write(
        &file,
        r#"[{"question": null, "correctAnswer": "a", "selectedAnswer": "a", "topic": 7, "options": [1, 2]}]"#,
    )
    .unwrap();
    let parsed = json_of(learnbox_cmd().arg(&file).arg("--json"));
    assert_eq!(parsed["score"]["value"], 100);
    assert_eq!(parsed["topics"][0]["topic"], "General");
}

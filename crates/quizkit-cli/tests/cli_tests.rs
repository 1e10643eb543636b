//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizkit() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("quizkit").unwrap()
}

#[test]
fn validate_valid_bank() {
    quizkit()
        .arg("validate")
        .arg("--bank")
        .arg("../../banks/web-basics.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 questions"))
        .stdout(predicate::str::contains("All banks valid"));
}

#[test]
fn validate_directory() {
    quizkit()
        .arg("validate")
        .arg("--bank")
        .arg("../../banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Web Basics"))
        .stdout(predicate::str::contains("Rust Basics"));
}

#[test]
fn validate_reports_warnings() {
    quizkit()
        .arg("validate")
        .arg("--bank")
        .arg("tests/fixtures/lint-warnings.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate option label"))
        .stdout(predicate::str::contains("2 warning(s) found"));
}

#[test]
fn validate_rejects_malformed_key() {
    quizkit()
        .arg("validate")
        .arg("--bank")
        .arg("tests/fixtures/broken-key.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside 2 options"));
}

#[test]
fn validate_nonexistent_file() {
    quizkit()
        .arg("validate")
        .arg("--bank")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn grade_partial_sheet_scores_two_of_five() {
    quizkit()
        .arg("grade")
        .arg("--bank")
        .arg("../../banks/web-basics.toml")
        .arg("--answers")
        .arg("tests/fixtures/web-basics-partial.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("You scored 2 out of 5 (40%)"))
        .stdout(predicate::str::contains("No answer"));
}

#[test]
fn grade_perfect_sheet() {
    quizkit()
        .arg("grade")
        .arg("--bank")
        .arg("../../banks/web-basics.toml")
        .arg("--answers")
        .arg("tests/fixtures/web-basics-perfect.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("You scored 5 out of 5 (100%)"));
}

#[test]
fn grade_json_output() {
    let output = quizkit()
        .arg("grade")
        .arg("--bank")
        .arg("../../banks/web-basics.toml")
        .arg("--answers")
        .arg("tests/fixtures/web-basics-partial.toml")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["score"]["correct"], 2);
    assert_eq!(json["score"]["total"], 5);
    assert_eq!(json["details"].as_array().unwrap().len(), 5);
    assert_eq!(json["details"][1]["correct"], false);
    assert!(json["details"][3]["your_answer"].is_null());
}

#[test]
fn grade_rejects_undocumented_flags() {
    quizkit()
        .arg("grade")
        .arg("--bank")
        .arg("../../banks/web-basics.toml")
        .arg("--answers")
        .arg("tests/fixtures/web-basics-partial.toml")
        .arg("--finish")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument '--finish'"));
}

#[test]
fn grade_help_lists_options() {
    quizkit()
        .arg("grade")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--bank"))
        .stdout(predicate::str::contains("--answers"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn grade_unknown_question_fails() {
    quizkit()
        .arg("grade")
        .arg("--bank")
        .arg("../../banks/web-basics.toml")
        .arg("--answers")
        .arg("tests/fixtures/unknown-question.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown question id: 42"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizkit()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizkit.toml"))
        .stdout(predicate::str::contains("Created banks/sample.toml"));

    assert!(dir.path().join("quizkit.toml").exists());
    assert!(dir.path().join("banks/sample.toml").exists());

    quizkit()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--bank")
        .arg("banks/sample.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("All banks valid"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizkit()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    quizkit()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    quizkit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terminal quiz runner and grader"));
}

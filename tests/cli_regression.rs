// Regression tests: CLI output and miette diagnostic rendering.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use std::fs;

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

#[test]
fn eval_prints_the_result() {
    let mut cmd = Command::cargo_bin("descent").unwrap();
    cmd.arg("eval").arg("(1 + 2) * 3");
    cmd.assert().success().stdout(contains("9"));
}

#[test]
fn eval_reports_miette_diagnostics_on_error() {
    let mut cmd = Command::cargo_bin("descent").unwrap();
    cmd.arg("eval").arg("1 +");
    cmd.assert().failure().stderr(contains("descent::parse"));
}

#[test]
fn data_renders_canonical_json_from_a_file() {
    let data_file = "tests/sample_ok.data";
    fs::write(data_file, "{'a': [1, 2] # comment\n}").unwrap();

    let mut cmd = Command::cargo_bin("descent").unwrap();
    cmd.arg("data").arg(data_file);
    cmd.assert().success().stdout(contains("\"a\""));

    let _ = fs::remove_file(data_file);
}

#[test]
fn data_rejects_trailing_commas_with_a_diagnostic() {
    let data_file = "tests/sample_bad.data";
    fs::write(data_file, "[1, 2,]").unwrap();

    let mut cmd = Command::cargo_bin("descent").unwrap();
    cmd.arg("data").arg(data_file);
    cmd.assert()
        .failure()
        .stderr(contains("trailing comma").or(contains("descent::parse")));

    let _ = fs::remove_file(data_file);
}

#[test]
fn data_reads_stdin_when_no_file_is_given() {
    let mut cmd = Command::cargo_bin("descent").unwrap();
    cmd.arg("data").write_stdin("[true, null]");
    cmd.assert().success().stdout(contains("true"));
}

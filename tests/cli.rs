use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn match_prints_tree_for_whole_file() {
    let mut cmd = cargo_bin_cmd!("pygrammar");
    cmd.arg("match").arg(fixture_path("compound_statements.py"));

    let output_pred = predicate::str::starts_with("file_input: import os")
        .and(predicate::str::contains("except_clause: except ZeroDivisionError"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn match_with_mocks_as_json() {
    let source = fixture_path("mocked_except_clause.txt");
    let mut cmd = cargo_bin_cmd!("pygrammar");
    cmd.arg("match")
        .arg(&source)
        .args(["--rule", "except_clause", "--mock", "test", "--format", "json"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"rule\": \"except_clause\""));
}

#[test]
fn failed_match_reports_position() {
    let mut cmd = cargo_bin_cmd!("pygrammar");
    cmd.arg("match")
        .arg(fixture_path("simple_statements.py"))
        .args(["--rule", "suite"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("No match: 2:1: expected EOF"));
}

#[test]
fn tokenization_errors_exit_nonzero() {
    let mut cmd = cargo_bin_cmd!("pygrammar");
    cmd.arg("tokens").arg(fixture_path("inconsistent_dedent.py"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Tokenization error"));
}

#[test]
fn working_directory_config_is_layered() {
    // tests/fixtures/pygrammar.toml sets a tab size of 4
    let source = fixture_path("tab_indented.txt");

    let mut cmd = cargo_bin_cmd!("pygrammar");
    cmd.arg("tokens").arg(&source);
    cmd.assert().failure();

    let mut cmd = cargo_bin_cmd!("pygrammar");
    cmd.current_dir(fixture_path("")).arg("tokens").arg(&source);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("INDENT"));
}

#[test]
fn rules_prints_ebnf() {
    let mut cmd = cargo_bin_cmd!("pygrammar");
    cmd.arg("rules").arg("suite");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("suite := "));
}

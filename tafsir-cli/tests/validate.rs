use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn source_fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("tafsir-core")
        .join("tests")
        .join("fixtures")
        .join("source")
}

#[test]
fn validate_reports_incomplete_output() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("json");
    let report = dir.path().join("report.txt");

    cargo_bin_cmd!("tafsir")
        .arg(source_fixtures().as_os_str())
        .arg(out.as_os_str())
        .arg("-q")
        .assert()
        .success();

    let mut cmd = cargo_bin_cmd!("tafsir");
    cmd.arg("validate")
        .arg(out.as_os_str())
        .arg("--report")
        .arg(report.as_os_str())
        .arg("-q");

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Chapters present:  2/114"))
        .stdout(predicate::str::contains("Verses present:    12/6236"));

    let text = fs::read_to_string(&report).unwrap();
    assert!(text.starts_with("TAFSIR JSON VALIDATION REPORT"));
    assert!(text.contains("MISSING CHAPTERS (112):"));
    assert!(text.contains("  Chapter   2: 281 verses missing"));
}

#[test]
fn validate_missing_directory_fails() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("tafsir");
    cmd.arg("validate").arg(dir.path().join("absent").as_os_str());

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("missing input"));
}

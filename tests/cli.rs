use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const REVENUE_BODY: &str = r#"{
    "chart_data": {
        "labels": ["A", "B", "C"],
        "last_month_revenue": [300000000, 100000000, 500000000],
        "prev_month_revenue": [200000000, 150000000, 450000000]
    },
    "last_month_str": "05/2024",
    "prev_month_str": "04/2024"
}"#;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("period-bars").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("period-bars"));
}

#[test]
fn render_writes_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("req.json");
    let out = dir.path().join("chart.png");
    fs::write(&input, REVENUE_BODY).unwrap();

    let mut cmd = Command::cargo_bin("period-bars").unwrap();
    cmd.args(["render", "--kind", "revenue-by-category", "--dpi", "40"])
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&out);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Wrote chart"));

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn render_base64_to_stdout() {
    let mut cmd = Command::cargo_bin("period-bars").unwrap();
    cmd.args([
        "render",
        "--kind",
        "revenue-by-category",
        "--encoding",
        "base64",
        "--orientation",
        "vertical",
        "--dpi",
        "40",
    ])
    .write_stdin(REVENUE_BODY);
    // base64 of the PNG signature
    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("iVBORw0KGgo"));
}

#[test]
fn wrong_kind_fails() {
    let mut cmd = Command::cargo_bin("period-bars").unwrap();
    cmd.args(["render", "--kind", "new-users"])
        .write_stdin(REVENUE_BODY);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does not match"));
}

#[test]
fn mismatched_lengths_fail() {
    let body = REVENUE_BODY.replace("[300000000, 100000000, 500000000]", "[1, 2]");
    let mut cmd = Command::cargo_bin("period-bars").unwrap();
    cmd.args(["render", "--kind", "revenue-by-category"])
        .write_stdin(body);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("shape mismatch"));
}

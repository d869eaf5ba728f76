use std::fs;
use std::process::Command;

fn chk() -> Command {
    Command::new(env!("CARGO_BIN_EXE_chk"))
}

#[test]
fn passing_cases_exit_successfully_and_write_report() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let cases = dir.path().join("cases.yaml");
    fs::write(
        &cases,
        "cases:\n  - op: assert_true\n    value: 1\n  - op: assert_equal\n    actual: abc\n    expected: abc\n",
    )
    .expect("write cases");
    let out = dir.path().join("out");

    let output = chk()
        .args(["run", "--cases"])
        .arg(&cases)
        .arg("--out")
        .arg(&out)
        .output()
        .expect("run chk");
    assert!(output.status.success(), "chk run failed: {output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("2 checks: 2 passed"));

    let bytes = fs::read(out.join("assert_report.json")).expect("report written");
    let report: serde_json::Value = serde_json::from_slice(&bytes).expect("report json");
    assert_eq!(report["summary"]["total"], 2);
    assert!(report["analysis_hash"].as_str().is_some_and(|hash| hash.len() == 64));
}

#[test]
fn soft_failures_are_reported_on_stderr_without_failing() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let cases = dir.path().join("cases.yaml");
    fs::write(
        &cases,
        "cases:\n  - op: assert_equal\n    actual: 5\n    expected: \"5\"\n",
    )
    .expect("write cases");

    let output = chk()
        .args(["run", "--cases"])
        .arg(&cases)
        .output()
        .expect("run chk");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Assertion failed: 5 \"5\" at ").count(), 1);
}

#[test]
fn hard_failure_exits_with_error() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let cases = dir.path().join("cases.yaml");
    fs::write(&cases, "cases:\n  - op: assert_true\n    value: false\n").expect("write cases");

    let output = chk()
        .args(["run", "--sink", "silent", "--cases"])
        .arg(&cases)
        .output()
        .expect("run chk");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Assertion failed: "));
    assert!(stderr.contains("cases.yaml:1"));
}

#[test]
fn strict_policy_fails_on_soft_failures() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let cases = dir.path().join("cases.yaml");
    let policy = dir.path().join("policy.yaml");
    fs::write(&cases, "cases:\n  - op: assert_equal\n    actual: 1\n    expected: 2\n")
        .expect("write cases");
    fs::write(&policy, "fail_on_soft_failure: true\nsink: silent\n").expect("write policy");

    let status = chk()
        .args(["run", "--cases"])
        .arg(&cases)
        .arg("--policy")
        .arg(&policy)
        .status()
        .expect("run chk");
    assert!(!status.success());
}

#[test]
fn version_long_emits_json() {
    let output = chk().args(["version", "--long"]).output().expect("run chk");
    assert!(output.status.success());
    let info: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(info["name"], "chk-run");
    assert_eq!(info["default_label"], "Assertion failed");
}

#[test]
fn tracing_sink_logs_failures_as_error_events() {
    let dir = tempfile::tempdir().expect("tmp dir");
    let cases = dir.path().join("cases.yaml");
    fs::write(
        &cases,
        "cases:\n  - op: assert_equal\n    actual: 5\n    expected: \"5\"\n  - op: assert_equal\n    actual: 1\n    expected: 1\n",
    )
    .expect("write cases");

    let output = chk()
        .args(["run", "--sink", "tracing", "--cases"])
        .arg(&cases)
        .env("RUST_LOG", "error")
        .env("NO_COLOR", "1")
        .output()
        .expect("run chk");
    assert!(output.status.success(), "chk run failed: {output:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    let events: Vec<&str> = stderr.lines().filter(|line| line.contains("ERROR")).collect();
    assert_eq!(events.len(), 1, "{stderr}");
    assert!(events[0].contains("Assertion failed: 5 \"5\" at "));
    assert!(events[0].contains("cases.yaml:1"));
}

use std::io;
use std::sync::{Arc, Mutex};

use chk_assert::{run_cases, Asserter, CaseFile, Policy, SinkKind, TracingSink};
use chk_core::errors::ChkError;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("buffer lock").clone();
        String::from_utf8(bytes).expect("utf8 log output")
    }
}

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under an ERROR-level fmt subscriber and returns what it logged.
fn capture_errors<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_max_level(tracing::Level::ERROR)
        .with_ansi(false)
        .without_time()
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}

#[test]
fn each_failure_is_one_error_event() {
    let asserter = Asserter::new(TracingSink);
    let (hard, logged) = capture_errors(|| {
        asserter.assert_equal(5, 5);
        asserter.assert_equal("left", "right");
        asserter.assert_true(0u8)
    });
    assert!(hard.is_err());

    let lines: Vec<&str> = logged.lines().collect();
    assert_eq!(lines.len(), 2, "{logged}");
    assert!(lines.iter().all(|line| line.contains("ERROR")));
    assert!(lines.iter().all(|line| line.contains("tracing_sink.rs:")));
    assert!(lines[0].contains("Assertion failed: \"left\" \"right\" at "));
    assert!(lines[0].contains("kind=Equal"));
    assert!(lines[1].contains("Assertion failed: 0 at "));
    assert!(lines[1].contains("kind=True"));
}

#[test]
fn custom_label_reaches_the_event() {
    let asserter = Asserter::new(TracingSink).with_label("check failed");
    let ((), logged) = capture_errors(|| asserter.assert_equal(1, 2));
    assert_eq!(logged.lines().count(), 1);
    assert!(logged.contains("check failed: 1 2 at "));
}

#[test]
fn tracing_sink_kind_logs_case_failures() -> Result<(), ChkError> {
    let file: CaseFile = chk_core::serde::from_yaml_slice(
        b"cases:\n  - op: assert_equal\n    actual: 5\n    expected: \"5\"\n  - op: assert_true\n    value: \"\"\n",
    )?;
    let policy = Policy {
        sink: SinkKind::Tracing,
        ..Policy::default()
    };
    let (report, logged) = capture_errors(|| run_cases(&file, "inline", &policy, policy.sink.build()));
    let report = report?;
    assert_eq!(report.summary.soft_failures, 1);
    assert_eq!(report.summary.hard_failures, 1);

    let lines: Vec<&str> = logged.lines().collect();
    assert_eq!(lines.len(), 2, "{logged}");
    assert!(lines[0].contains("Assertion failed: 5 \"5\" at inline:1"));
    assert!(lines[0].contains("location=inline:1"));
    assert!(lines[1].contains("Assertion failed: \"\" at inline:2"));
    assert!(lines[1].contains("location=inline:2"));
    Ok(())
}

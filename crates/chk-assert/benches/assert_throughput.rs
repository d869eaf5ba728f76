use chk_assert::{run_cases, Asserter, Case, CaseFile, Policy, SilentSink, StrictValue};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

fn sample_cases() -> CaseFile {
    let cases = (0..256)
        .map(|idx| {
            if idx % 2 == 0 {
                Case::AssertEqual {
                    name: None,
                    actual: StrictValue::from(json!({"idx": idx, "tags": ["a", "b"]})),
                    expected: StrictValue::from(json!({"idx": idx, "tags": ["a", "b"]})),
                }
            } else {
                Case::AssertTrue {
                    name: None,
                    value: StrictValue::from(json!(idx)),
                }
            }
        })
        .collect();
    CaseFile { cases }
}

fn bench_assertions(c: &mut Criterion) {
    let asserter = Asserter::new(SilentSink);
    c.bench_function("assert_equal_pass", |b| {
        b.iter(|| asserter.assert_equal(black_box(42u64), black_box(42u64)))
    });
    c.bench_function("assert_equal_fail", |b| {
        b.iter(|| asserter.assert_equal(black_box("left"), black_box("right")))
    });

    let file = sample_cases();
    let policy = Policy::default();
    c.bench_function("run_cases_256", |b| {
        b.iter(|| run_cases(black_box(&file), "bench", &policy, SilentSink).expect("run"))
    });
}

criterion_group!(benches, bench_assertions);
criterion_main!(benches);

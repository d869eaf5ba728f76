use chk_core::{strict_equals, StrictValue};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn no_coercion_between_types() {
    assert!(!strict_equals(&json!(5), &json!("5")));
    assert!(!strict_equals(&json!(0), &json!(false)));
    assert!(!strict_equals(&json!(null), &json!(false)));
    assert!(!strict_equals(&json!(""), &json!(0)));
}

#[test]
fn numbers_compare_by_value() {
    assert!(strict_equals(&json!(1), &json!(1.0)));
    assert!(strict_equals(&json!(u64::MAX), &json!(u64::MAX)));
    assert!(!strict_equals(&json!(-1), &json!(u64::MAX)));
}

#[test]
fn containers_compare_element_wise() {
    assert!(strict_equals(&json!([1, "a", null]), &json!([1.0, "a", null])));
    assert!(!strict_equals(&json!([1, 2]), &json!([1, 2, 3])));
    assert!(strict_equals(&json!({"a": 1, "b": [true]}), &json!({"b": [true], "a": 1})));
    assert!(!strict_equals(&json!({"a": 1}), &json!({"a": "1"})));
    assert!(!strict_equals(&json!({"a": 1}), &json!({"b": 1})));
}

#[test]
fn strict_value_renders_as_json() {
    assert_eq!(format!("{:?}", StrictValue::from(json!("5"))), "\"5\"");
    assert_eq!(StrictValue::from(json!(5)).to_string(), "5");
}

proptest! {
    #[test]
    fn integers_never_equal_their_string_form(n in any::<i64>()) {
        let number = StrictValue::from(json!(n));
        let text = StrictValue::from(json!(n.to_string()));
        prop_assert!(number != text);
        prop_assert!(number == number.clone());
    }
}

#[test]
fn non_finite_numbers_do_not_deserialize() {
    for text in [".nan", ".inf", "-.inf", "[1, .nan]", "{a: .inf}"] {
        let err = chk_core::serde::from_yaml_slice::<StrictValue>(text.as_bytes())
            .expect_err("non-finite number accepted");
        assert!(err.info().message.contains("non-finite"), "{text}: {err}");
    }
}

#[test]
fn finite_yaml_values_deserialize() -> Result<(), chk_core::ChkError> {
    let value: StrictValue =
        chk_core::serde::from_yaml_slice(b"{a: [1, 2.5, \"x\", null, true], b: ~}")?;
    assert_eq!(
        value,
        StrictValue::from(json!({"a": [1, 2.5, "x", null, true], "b": null}))
    );
    Ok(())
}

use chk_core::Truthy;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn falsy_values() {
    assert!(!false.is_truthy());
    assert!(!0i32.is_truthy());
    assert!(!0u8.is_truthy());
    assert!(!0.0f64.is_truthy());
    assert!(!(-0.0f32).is_truthy());
    assert!(!f64::NAN.is_truthy());
    assert!(!"".is_truthy());
    assert!(!String::new().is_truthy());
    assert!(!None::<&str>.is_truthy());
    assert!(!().is_truthy());
    assert!(!json!(null).is_truthy());
}

#[test]
fn truthy_values() {
    assert!(true.is_truthy());
    assert!((-3i64).is_truthy());
    assert!(f64::INFINITY.is_truthy());
    assert!("0".is_truthy());
    assert!(Some("x").is_truthy());
    assert!(Vec::<u8>::new().is_truthy());
    assert!(json!("false").is_truthy());
}

proptest! {
    #[test]
    fn nonzero_integers_are_truthy(n in any::<i64>().prop_filter("nonzero", |n| *n != 0)) {
        prop_assert!(n.is_truthy());
    }

    #[test]
    fn strings_are_truthy_unless_empty(text in ".*") {
        prop_assert_eq!(text.is_truthy(), !text.is_empty());
    }
}

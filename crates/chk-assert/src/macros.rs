/// Soft equality assertion that records the asserted expression text.
///
/// `assert_equal!(a, b)` uses the process-wide stderr asserter;
/// `assert_equal!(asserter => a, b)` uses any [`Asserter`](crate::Asserter)
/// or [`Session`](crate::Session). Operands are borrowed, not moved.
///
/// ```
/// let name = String::from("chk");
/// chk_assert::assert_equal!(name, String::from("chk"));
/// assert_eq!(name.len(), 3);
/// ```
#[macro_export]
macro_rules! assert_equal {
    ($asserter:expr => $actual:expr, $expected:expr $(,)?) => {
        $asserter.assert_equal_at(
            &$actual,
            &$expected,
            $crate::CallSite::here(file!(), line!(), column!()).with_expression(concat!(
                stringify!($actual),
                " === ",
                stringify!($expected)
            )),
        )
    };
    ($actual:expr, $expected:expr $(,)?) => {
        $crate::assert_equal!($crate::default_asserter() => $actual, $expected)
    };
}

/// Hard truthiness assertion that records the asserted expression text.
///
/// Evaluates to `Result<(), AssertionError>`.
///
/// ```
/// fn check(flag: bool) -> Result<(), chk_assert::AssertionError> {
///     chk_assert::assert_true!(flag)?;
///     Ok(())
/// }
/// assert!(check(true).is_ok());
/// assert!(check(false).is_err());
/// ```
#[macro_export]
macro_rules! assert_true {
    ($asserter:expr => $condition:expr $(,)?) => {
        $asserter.assert_true_at(
            &$condition,
            $crate::CallSite::here(file!(), line!(), column!())
                .with_expression(stringify!($condition)),
        )
    };
    ($condition:expr $(,)?) => {
        $crate::assert_true!($crate::default_asserter() => $condition)
    };
}

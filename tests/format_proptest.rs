//! Property-based tests for result formatting and evaluation

use proptest::prelude::*;
use webcalc::calculator::Calculator;
use webcalc::format::{DEFAULT_PRECISION, format_result};

/// Integral values small enough to be exact
fn exact_integer() -> impl Strategy<Value = i64> {
    -(1_i64 << 53)..(1_i64 << 53)
}

/// Finite, non-zero floats
fn finite_float() -> impl Strategy<Value = f64> {
    prop::num::f64::NORMAL
}

proptest! {
    /// Integral results print every digit and no decimal point
    #[test]
    fn prop_integers_print_in_full(n in exact_integer()) {
        prop_assert_eq!(format_result(n as f64, DEFAULT_PRECISION), n.to_string());
    }

    /// Formatting keeps the value within the requested precision
    #[test]
    fn prop_format_round_trips_within_precision(x in finite_float()) {
        let formatted = format_result(x, DEFAULT_PRECISION);
        let parsed: f64 = formatted.parse().unwrap();
        let tolerance = x.abs() * 1e-9;
        prop_assert!((parsed - x).abs() <= tolerance, "{} formatted as {}", x, formatted);
    }

    /// Non-integral output never carries trailing zeros in the mantissa
    #[test]
    fn prop_no_trailing_zeros(x in finite_float()) {
        prop_assume!(x.fract() != 0.0);
        let formatted = format_result(x, DEFAULT_PRECISION);
        let mantissa = formatted.split('e').next().unwrap();
        if mantissa.contains('.') {
            prop_assert!(!mantissa.ends_with('0'), "{}", formatted);
            prop_assert!(!mantissa.ends_with('.'), "{}", formatted);
        }
    }

    /// Sums of small integers evaluate exactly
    #[test]
    fn prop_integer_arithmetic(a in -10_000_i64..10_000, b in -10_000_i64..10_000) {
        let calc = Calculator::new();
        prop_assert_eq!(calc.evaluate(&format!("{} + ({})", a, b)), (a + b).to_string());
        prop_assert_eq!(calc.evaluate(&format!("{} * ({})", a, b)), (a * b).to_string());
    }

    /// Python's floor division and modulo agree with each other
    #[test]
    fn prop_divmod_identity(a in -1000_i64..1000, b in (1_i64..100).prop_union(-100_i64..-1)) {
        let calc = Calculator::new();
        let quotient: f64 = calc.evaluate(&format!("{} // ({})", a, b)).parse().unwrap();
        let remainder: f64 = calc.evaluate(&format!("{} % ({})", a, b)).parse().unwrap();
        prop_assert_eq!(quotient * b as f64 + remainder, a as f64);
        prop_assert!(remainder == 0.0 || remainder.signum() == (b as f64).signum());
    }

    /// Arbitrary input never panics and always yields a result or an error message
    #[test]
    fn prop_evaluate_never_panics(input in "[0-9a-z+\\-*/%^().,\\[\\] √π]{0,40}") {
        let calc = Calculator::new();
        let output = calc.evaluate(&input);
        prop_assert!(!output.is_empty());
    }
}

//! Built-in mathematical functions for expression evaluation.
//!
//! This module provides the implementation of every function in the default
//! symbol table. Each function receives its already-evaluated arguments as a
//! slice whose length has been checked against the function's arity, and
//! returns either a value or an [`ExprError`].
//!
//! Domain violations (`sqrt(-1)`, `log(0)`, `acos(2)`) are errors rather than
//! NaN, and results that overflow from finite inputs are range errors rather than
//! infinity, so the calculator can report them the way a scientific calculator
//! would. The transcendental functions come from the `libm` crate.

use libm::{
    acos as libm_acos, acosh as libm_acosh, asin as libm_asin, asinh as libm_asinh,
    atan as libm_atan, atan2 as libm_atan2, atanh as libm_atanh, cbrt as libm_cbrt,
    ceil as libm_ceil, copysign as libm_copysign, cos as libm_cos, cosh as libm_cosh,
    erf as libm_erf, erfc as libm_erfc, exp as libm_exp, exp2 as libm_exp2,
    expm1 as libm_expm1, floor as libm_floor, fmod as libm_fmod, hypot as libm_hypot,
    ldexp as libm_ldexp, lgamma as libm_lgamma, log as libm_ln, log1p as libm_log1p,
    log2 as libm_log2, log10 as libm_log10, nextafter as libm_nextafter, pow as libm_pow,
    remainder as libm_remainder, sin as libm_sin, sinh as libm_sinh, sqrt as libm_sqrt,
    tan as libm_tan, tanh as libm_tanh, tgamma as libm_tgamma, trunc as libm_trunc,
};

use crate::Real;
use crate::error::{ExprError, Result, domain_error, range_error};

/// Largest magnitude that converts exactly to a 64-bit integer.
const MAX_EXACT_INTEGER: Real = 9_007_199_254_740_992.0;

/// Rejects an infinite result computed from finite inputs.
fn checked(result: Real, inputs: &[Real]) -> Result<Real> {
    if result.is_infinite() && inputs.iter().all(|x| x.is_finite()) {
        Err(range_error())
    } else {
        Ok(result)
    }
}

/// Rejects a NaN result computed from non-NaN inputs.
fn defined(result: Real, inputs: &[Real]) -> Result<Real> {
    if result.is_nan() && !inputs.iter().any(|x| x.is_nan()) {
        Err(domain_error())
    } else {
        Ok(result)
    }
}

/// Converts an integral float into an integer, failing for fractional input.
fn integral(x: Real) -> Result<i64> {
    if x.is_nan() || x.is_infinite() || x.fract() != 0.0 {
        return Err(ExprError::Other(
            "'float' object cannot be interpreted as an integer".to_string(),
        ));
    }
    if x.abs() > MAX_EXACT_INTEGER {
        return Err(ExprError::Overflow(
            "integer argument too large".to_string(),
        ));
    }
    Ok(x as i64)
}

/// Error raised when converting an infinite or NaN value to an integer.
fn to_integer_error(x: Real) -> ExprError {
    if x.is_nan() {
        ExprError::Value("cannot convert float NaN to integer".to_string())
    } else {
        ExprError::Overflow("cannot convert float infinity to integer".to_string())
    }
}

// Powers, roots and logarithms

pub fn sqrt(args: &[Real]) -> Result<Real> {
    if args[0] < 0.0 {
        return Err(domain_error());
    }
    Ok(libm_sqrt(args[0]))
}

pub fn cbrt(args: &[Real]) -> Result<Real> {
    Ok(libm_cbrt(args[0]))
}

pub fn exp(args: &[Real]) -> Result<Real> {
    checked(libm_exp(args[0]), args)
}

pub fn exp2(args: &[Real]) -> Result<Real> {
    checked(libm_exp2(args[0]), args)
}

pub fn expm1(args: &[Real]) -> Result<Real> {
    checked(libm_expm1(args[0]), args)
}

/// Natural logarithm, or logarithm to `base` when a second argument is given.
pub fn log(args: &[Real]) -> Result<Real> {
    let x = args[0];
    if x <= 0.0 {
        return Err(domain_error());
    }
    let Some(&base) = args.get(1) else {
        return Ok(libm_ln(x));
    };
    if base <= 0.0 {
        return Err(domain_error());
    }
    let denominator = libm_ln(base);
    if denominator == 0.0 {
        return Err(ExprError::DivideByZero);
    }
    Ok(libm_ln(x) / denominator)
}

pub fn log10(args: &[Real]) -> Result<Real> {
    if args[0] <= 0.0 {
        return Err(domain_error());
    }
    Ok(libm_log10(args[0]))
}

pub fn log2(args: &[Real]) -> Result<Real> {
    if args[0] <= 0.0 {
        return Err(domain_error());
    }
    Ok(libm_log2(args[0]))
}

pub fn log1p(args: &[Real]) -> Result<Real> {
    if args[0] <= -1.0 {
        return Err(domain_error());
    }
    Ok(libm_log1p(args[0]))
}

/// Raises a value to a power, the way `math.pow` does.
///
/// Unlike the `**` operator this never produces a complex result: a negative
/// base with a fractional exponent is a domain error, as is zero raised to a
/// negative power.
pub fn pow(args: &[Real]) -> Result<Real> {
    let (a, b) = (args[0], args[1]);
    if a == 0.0 && b < 0.0 {
        return Err(domain_error());
    }
    if a < 0.0 && a.is_finite() && b.is_finite() && b.fract() != 0.0 {
        return Err(domain_error());
    }
    checked(libm_pow(a, b), args)
}

// Trigonometry

pub fn sin(args: &[Real]) -> Result<Real> {
    defined(libm_sin(args[0]), args)
}

pub fn cos(args: &[Real]) -> Result<Real> {
    defined(libm_cos(args[0]), args)
}

pub fn tan(args: &[Real]) -> Result<Real> {
    defined(libm_tan(args[0]), args)
}

pub fn asin(args: &[Real]) -> Result<Real> {
    if !(-1.0..=1.0).contains(&args[0]) && !args[0].is_nan() {
        return Err(domain_error());
    }
    Ok(libm_asin(args[0]))
}

pub fn acos(args: &[Real]) -> Result<Real> {
    if !(-1.0..=1.0).contains(&args[0]) && !args[0].is_nan() {
        return Err(domain_error());
    }
    Ok(libm_acos(args[0]))
}

pub fn atan(args: &[Real]) -> Result<Real> {
    Ok(libm_atan(args[0]))
}

/// Arc tangent of `y / x` in radians, arguments in `(y, x)` order.
pub fn atan2(args: &[Real]) -> Result<Real> {
    Ok(libm_atan2(args[0], args[1]))
}

pub fn degrees(args: &[Real]) -> Result<Real> {
    Ok(args[0] * (180.0 / crate::constants::PI))
}

pub fn radians(args: &[Real]) -> Result<Real> {
    Ok(args[0] * (crate::constants::PI / 180.0))
}

// Hyperbolic functions

pub fn sinh(args: &[Real]) -> Result<Real> {
    checked(libm_sinh(args[0]), args)
}

pub fn cosh(args: &[Real]) -> Result<Real> {
    checked(libm_cosh(args[0]), args)
}

pub fn tanh(args: &[Real]) -> Result<Real> {
    Ok(libm_tanh(args[0]))
}

pub fn asinh(args: &[Real]) -> Result<Real> {
    Ok(libm_asinh(args[0]))
}

pub fn acosh(args: &[Real]) -> Result<Real> {
    if args[0] < 1.0 {
        return Err(domain_error());
    }
    Ok(libm_acosh(args[0]))
}

pub fn atanh(args: &[Real]) -> Result<Real> {
    if args[0].abs() >= 1.0 {
        return Err(domain_error());
    }
    Ok(libm_atanh(args[0]))
}

// Rounding and sign handling

pub fn fabs(args: &[Real]) -> Result<Real> {
    Ok(args[0].abs())
}

pub fn abs(args: &[Real]) -> Result<Real> {
    Ok(args[0].abs())
}

pub fn floor(args: &[Real]) -> Result<Real> {
    if !args[0].is_finite() {
        return Err(to_integer_error(args[0]));
    }
    Ok(libm_floor(args[0]))
}

pub fn ceil(args: &[Real]) -> Result<Real> {
    if !args[0].is_finite() {
        return Err(to_integer_error(args[0]));
    }
    Ok(libm_ceil(args[0]))
}

pub fn trunc(args: &[Real]) -> Result<Real> {
    if !args[0].is_finite() {
        return Err(to_integer_error(args[0]));
    }
    Ok(libm_trunc(args[0]))
}

/// Rounds half to even, optionally to `ndigits` decimal places.
///
/// A negative `ndigits` rounds to tens, hundreds and so on.
pub fn round(args: &[Real]) -> Result<Real> {
    let x = args[0];
    let Some(&ndigits) = args.get(1) else {
        if !x.is_finite() {
            return Err(to_integer_error(x));
        }
        return Ok(x.round_ties_even());
    };

    let ndigits = integral(ndigits)?;
    if !x.is_finite() || x == 0.0 {
        return Ok(x);
    }
    // Past these bounds every digit of an f64 is already kept (or dropped)
    if ndigits > 308 {
        return Ok(x);
    }
    if ndigits < -308 {
        return Ok(0.0_f64.copysign(x));
    }
    let scale = libm_pow(10.0, ndigits.unsigned_abs() as Real);
    let rounded = if ndigits >= 0 {
        let scaled = x * scale;
        if scaled.is_infinite() {
            return Ok(x);
        }
        scaled.round_ties_even() / scale
    } else {
        (x / scale).round_ties_even() * scale
    };
    Ok(rounded)
}

pub fn copysign(args: &[Real]) -> Result<Real> {
    Ok(libm_copysign(args[0], args[1]))
}

pub fn fmod(args: &[Real]) -> Result<Real> {
    if args[1] == 0.0 || args[0].is_infinite() {
        if !args.iter().any(|x| x.is_nan()) {
            return Err(domain_error());
        }
    }
    Ok(libm_fmod(args[0], args[1]))
}

/// IEEE 754 remainder: `x - n*y` where `n` is `x/y` rounded to the nearest integer.
pub fn remainder(args: &[Real]) -> Result<Real> {
    if args[1] == 0.0 || args[0].is_infinite() {
        if !args.iter().any(|x| x.is_nan()) {
            return Err(domain_error());
        }
    }
    Ok(libm_remainder(args[0], args[1]))
}

pub fn ldexp(args: &[Real]) -> Result<Real> {
    let exponent = integral(args[1]).map_err(|_| {
        ExprError::Other("Expected an int as second argument to ldexp.".to_string())
    })?;
    let exponent = exponent.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    checked(libm_ldexp(args[0], exponent), &args[..1])
}

pub fn nextafter(args: &[Real]) -> Result<Real> {
    Ok(libm_nextafter(args[0], args[1]))
}

// Special functions

pub fn erf(args: &[Real]) -> Result<Real> {
    Ok(libm_erf(args[0]))
}

pub fn erfc(args: &[Real]) -> Result<Real> {
    Ok(libm_erfc(args[0]))
}

pub fn gamma(args: &[Real]) -> Result<Real> {
    let x = args[0];
    if x == Real::NEG_INFINITY || (x <= 0.0 && x.fract() == 0.0) {
        return Err(domain_error());
    }
    checked(libm_tgamma(x), args)
}

pub fn lgamma(args: &[Real]) -> Result<Real> {
    let x = args[0];
    if x <= 0.0 && x.fract() == 0.0 {
        return Err(domain_error());
    }
    checked(libm_lgamma(x), args)
}

// Integer functions

pub fn factorial(args: &[Real]) -> Result<Real> {
    let x = args[0];
    if x.is_nan() || x.is_infinite() || x.fract() != 0.0 {
        if x == Real::INFINITY {
            return Err(to_integer_error(x));
        }
        return Err(ExprError::Value(
            "factorial() only accepts integral values".to_string(),
        ));
    }
    if x < 0.0 {
        return Err(ExprError::Value(
            "factorial() not defined for negative values".to_string(),
        ));
    }
    let mut result: Real = 1.0;
    let mut i: Real = 2.0;
    while i <= x {
        result *= i;
        if result.is_infinite() {
            return Err(ExprError::Overflow(
                "int too large to convert to float".to_string(),
            ));
        }
        i += 1.0;
    }
    Ok(result)
}

pub fn isqrt(args: &[Real]) -> Result<Real> {
    let n = integral(args[0])?;
    if n < 0 {
        return Err(ExprError::Value(
            "isqrt() argument must be nonnegative".to_string(),
        ));
    }
    Ok((n as u64).isqrt() as Real)
}

fn non_negative(value: Real, label: &str) -> Result<i64> {
    let value = integral(value)?;
    if value < 0 {
        return Err(ExprError::Value(format!(
            "{} must be a non-negative integer",
            label
        )));
    }
    Ok(value)
}

/// Number of ways to choose `k` items from `n` without order.
pub fn comb(args: &[Real]) -> Result<Real> {
    let n = non_negative(args[0], "n")?;
    let k = non_negative(args[1], "k")?;
    if k > n {
        return Ok(0.0);
    }
    let k = k.min(n - k);
    let mut result: Real = 1.0;
    for i in 0..k {
        result = result * (n - i) as Real / (i + 1) as Real;
        if result.is_infinite() {
            return Err(ExprError::Overflow(
                "int too large to convert to float".to_string(),
            ));
        }
    }
    Ok(result.round())
}

/// Number of ways to choose `k` items from `n` with order.
pub fn perm(args: &[Real]) -> Result<Real> {
    let n = non_negative(args[0], "n")?;
    let k = match args.get(1) {
        Some(&k) => non_negative(k, "k")?,
        None => n,
    };
    if k > n {
        return Ok(0.0);
    }
    let mut result: Real = 1.0;
    for i in 0..k {
        result *= (n - i) as Real;
        if result.is_infinite() {
            return Err(ExprError::Overflow(
                "int too large to convert to float".to_string(),
            ));
        }
    }
    Ok(result)
}

fn gcd_pair(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

pub fn gcd(args: &[Real]) -> Result<Real> {
    let mut acc: u64 = 0;
    for &arg in args {
        acc = gcd_pair(acc, integral(arg)?.unsigned_abs());
    }
    Ok(acc as Real)
}

pub fn lcm(args: &[Real]) -> Result<Real> {
    let mut acc: Real = 1.0;
    for &arg in args {
        let value = integral(arg)?.unsigned_abs();
        if value == 0 {
            return Ok(0.0);
        }
        let current = acc as u64;
        acc = (current / gcd_pair(current, value)) as Real * value as Real;
        if acc > MAX_EXACT_INTEGER {
            return Err(ExprError::Overflow("integer argument too large".to_string()));
        }
    }
    Ok(acc)
}

/// Euclidean distance from the origin, `sqrt(x1*x1 + x2*x2 + ...)`.
pub fn hypot(args: &[Real]) -> Result<Real> {
    let result = args.iter().fold(0.0, |acc, &x| libm_hypot(acc, x));
    checked(result, args)
}

// Predicates, reported as 1 for true and 0 for false

pub fn isfinite(args: &[Real]) -> Result<Real> {
    Ok(if args[0].is_finite() { 1.0 } else { 0.0 })
}

pub fn isinf(args: &[Real]) -> Result<Real> {
    Ok(if args[0].is_infinite() { 1.0 } else { 0.0 })
}

pub fn isnan(args: &[Real]) -> Result<Real> {
    Ok(if args[0].is_nan() { 1.0 } else { 0.0 })
}

// Aggregates over flattened arguments

pub fn min(args: &[Real]) -> Result<Real> {
    let (first, rest) = args
        .split_first()
        .ok_or_else(|| ExprError::Value("min() arg is an empty sequence".to_string()))?;
    Ok(rest.iter().fold(*first, |acc, &x| if x < acc { x } else { acc }))
}

pub fn max(args: &[Real]) -> Result<Real> {
    let (first, rest) = args
        .split_first()
        .ok_or_else(|| ExprError::Value("max() arg is an empty sequence".to_string()))?;
    Ok(rest.iter().fold(*first, |acc, &x| if x > acc { x } else { acc }))
}

pub fn sum(args: &[Real]) -> Result<Real> {
    Ok(args.iter().sum())
}

/// Compensated (Neumaier) summation, accurate where a naive sum loses digits.
pub fn fsum(args: &[Real]) -> Result<Real> {
    let mut total: Real = 0.0;
    let mut compensation: Real = 0.0;
    for &x in args {
        let t = total + x;
        if total.abs() >= x.abs() {
            compensation += (total - t) + x;
        } else {
            compensation += (x - t) + total;
        }
        total = t;
    }
    let result = total + compensation;
    checked(result, args)
}

pub fn prod(args: &[Real]) -> Result<Real> {
    Ok(args.iter().product())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_sqrt_and_domain() {
        assert_eq!(sqrt(&[16.0]).unwrap(), 4.0);
        assert_eq!(sqrt(&[-1.0]).unwrap_err(), domain_error());
    }

    #[test]
    fn test_log_variants() {
        assert_approx_eq!(log(&[core::f64::consts::E]).unwrap(), 1.0);
        assert_approx_eq!(log(&[8.0, 2.0]).unwrap(), 3.0);
        assert_approx_eq!(log10(&[1000.0]).unwrap(), 3.0);
        assert_approx_eq!(log2(&[1024.0]).unwrap(), 10.0);
        assert_eq!(log(&[0.0]).unwrap_err(), domain_error());
        assert_eq!(log(&[10.0, 1.0]).unwrap_err(), ExprError::DivideByZero);
        assert_eq!(log1p(&[-1.0]).unwrap_err(), domain_error());
    }

    #[test]
    fn test_exp_overflow() {
        assert_approx_eq!(exp(&[1.0]).unwrap(), core::f64::consts::E);
        assert_eq!(exp(&[1000.0]).unwrap_err(), range_error());
        assert_eq!(exp(&[Real::INFINITY]).unwrap(), Real::INFINITY);
    }

    #[test]
    fn test_pow() {
        assert_eq!(pow(&[2.0, 3.0]).unwrap(), 8.0);
        assert_eq!(pow(&[0.0, 0.0]).unwrap(), 1.0);
        assert_eq!(pow(&[-8.0, 1.0 / 3.0]).unwrap_err(), domain_error());
        assert_eq!(pow(&[0.0, -1.0]).unwrap_err(), domain_error());
        assert_eq!(pow(&[10.0, 400.0]).unwrap_err(), range_error());
    }

    #[test]
    fn test_trig() {
        assert_approx_eq!(sin(&[0.0]).unwrap(), 0.0);
        assert_approx_eq!(cos(&[0.0]).unwrap(), 1.0);
        assert_approx_eq!(atan2(&[1.0, 1.0]).unwrap(), core::f64::consts::FRAC_PI_4);
        assert_approx_eq!(
            atan2(&[1.0, -1.0]).unwrap(),
            3.0 * core::f64::consts::FRAC_PI_4
        );
        assert_eq!(sin(&[Real::INFINITY]).unwrap_err(), domain_error());
        assert_eq!(asin(&[2.0]).unwrap_err(), domain_error());
        assert_eq!(acos(&[-1.5]).unwrap_err(), domain_error());
        assert_approx_eq!(degrees(&[core::f64::consts::PI]).unwrap(), 180.0);
        assert_approx_eq!(radians(&[180.0]).unwrap(), core::f64::consts::PI);
    }

    #[test]
    fn test_hyperbolic() {
        assert_approx_eq!(sinh(&[0.0]).unwrap(), 0.0);
        assert_approx_eq!(cosh(&[0.0]).unwrap(), 1.0);
        assert_approx_eq!(tanh(&[0.0]).unwrap(), 0.0);
        assert_eq!(cosh(&[1000.0]).unwrap_err(), range_error());
        assert_eq!(acosh(&[0.5]).unwrap_err(), domain_error());
        assert_eq!(atanh(&[1.0]).unwrap_err(), domain_error());
    }

    #[test]
    fn test_rounding() {
        assert_eq!(floor(&[2.7]).unwrap(), 2.0);
        assert_eq!(ceil(&[2.3]).unwrap(), 3.0);
        assert_eq!(trunc(&[-2.7]).unwrap(), -2.0);
        assert_eq!(round(&[2.5]).unwrap(), 2.0);
        assert_eq!(round(&[3.5]).unwrap(), 4.0);
        assert_eq!(round(&[-0.5]).unwrap(), -0.0);
        assert_approx_eq!(round(&[3.14159, 2.0]).unwrap(), 3.14);
        assert_eq!(round(&[1234.0, -2.0]).unwrap(), 1200.0);
        assert!(matches!(
            round(&[Real::INFINITY]).unwrap_err(),
            ExprError::Overflow(_)
        ));
        assert!(matches!(floor(&[Real::NAN]).unwrap_err(), ExprError::Value(_)));
    }

    #[test]
    fn test_fmod_and_remainder() {
        assert_eq!(fmod(&[7.0, 4.0]).unwrap(), 3.0);
        assert_eq!(fmod(&[-7.0, 4.0]).unwrap(), -3.0);
        assert_eq!(fmod(&[1.0, 0.0]).unwrap_err(), domain_error());
        assert_eq!(remainder(&[7.0, 4.0]).unwrap(), -1.0);
        assert_eq!(remainder(&[1.0, 0.0]).unwrap_err(), domain_error());
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(&[0.0]).unwrap(), 1.0);
        assert_eq!(factorial(&[5.0]).unwrap(), 120.0);
        assert_eq!(
            factorial(&[-1.0]).unwrap_err(),
            ExprError::Value("factorial() not defined for negative values".to_string())
        );
        assert_eq!(
            factorial(&[2.5]).unwrap_err(),
            ExprError::Value("factorial() only accepts integral values".to_string())
        );
        assert!(matches!(
            factorial(&[171.0]).unwrap_err(),
            ExprError::Overflow(_)
        ));
    }

    #[test]
    fn test_integer_functions() {
        assert_eq!(isqrt(&[17.0]).unwrap(), 4.0);
        assert!(matches!(isqrt(&[-4.0]).unwrap_err(), ExprError::Value(_)));
        assert!(matches!(isqrt(&[2.5]).unwrap_err(), ExprError::Other(_)));
        assert_eq!(comb(&[5.0, 2.0]).unwrap(), 10.0);
        assert_eq!(comb(&[2.0, 5.0]).unwrap(), 0.0);
        assert_eq!(perm(&[5.0, 2.0]).unwrap(), 20.0);
        assert_eq!(gcd(&[12.0, 18.0]).unwrap(), 6.0);
        assert_eq!(gcd(&[]).unwrap(), 0.0);
        assert_eq!(lcm(&[4.0, 6.0]).unwrap(), 12.0);
        assert_eq!(lcm(&[]).unwrap(), 1.0);
    }

    #[test]
    fn test_special_functions() {
        assert_approx_eq!(gamma(&[5.0]).unwrap(), 24.0);
        assert_eq!(gamma(&[0.0]).unwrap_err(), domain_error());
        assert_eq!(gamma(&[-2.0]).unwrap_err(), domain_error());
        assert_approx_eq!(lgamma(&[1.0]).unwrap(), 0.0);
        assert_approx_eq!(erf(&[0.0]).unwrap(), 0.0);
        assert_approx_eq!(erfc(&[0.0]).unwrap(), 1.0);
        assert_approx_eq!(hypot(&[3.0, 4.0]).unwrap(), 5.0);
        assert_approx_eq!(cbrt(&[27.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_aggregates() {
        assert_eq!(min(&[3.0, 1.0, 2.0]).unwrap(), 1.0);
        assert_eq!(max(&[3.0, 1.0, 2.0]).unwrap(), 3.0);
        assert!(matches!(min(&[]).unwrap_err(), ExprError::Value(_)));
        assert_eq!(sum(&[1.0, 2.0, 3.0]).unwrap(), 6.0);
        assert_eq!(sum(&[]).unwrap(), 0.0);
        assert_eq!(prod(&[2.0, 3.0, 4.0]).unwrap(), 24.0);
        assert_eq!(fsum(&[0.1; 10]).unwrap(), 1.0);
    }

    #[test]
    fn test_predicates_and_ldexp() {
        assert_eq!(isnan(&[Real::NAN]).unwrap(), 1.0);
        assert_eq!(isinf(&[1.0]).unwrap(), 0.0);
        assert_eq!(isfinite(&[1.0]).unwrap(), 1.0);
        assert_eq!(ldexp(&[1.5, 3.0]).unwrap(), 12.0);
        assert!(matches!(ldexp(&[1.0, 0.5]).unwrap_err(), ExprError::Other(_)));
        assert_eq!(copysign(&[3.0, -0.0]).unwrap(), -3.0);
    }
}

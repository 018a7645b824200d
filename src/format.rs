//! Display formatting for calculation results.

use crate::Real;

/// Default number of significant digits for non-integral results.
pub const DEFAULT_PRECISION: usize = 10;

/// Formats a result for display.
///
/// Integral values print every digit with no decimal point, and zero of either
/// sign prints as `0`. Other values keep up to `precision` significant digits
/// with trailing zeros removed, switching to scientific notation for very large
/// or very small magnitudes.
///
/// # Examples
///
/// ```
/// use webcalc::format::format_result;
///
/// assert_eq!(format_result(42.0, 10), "42");
/// assert_eq!(format_result(1.0 / 3.0, 10), "0.3333333333");
/// assert_eq!(format_result(0.1 + 0.2, 10), "0.3");
/// assert_eq!(format_result(1.234e-5, 10), "1.234e-05");
/// assert_eq!(format_result(2.0_f64.powi(70), 10), "1180591620717411303424");
/// ```
pub fn format_result(value: Real, precision: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }
    format_general(value, precision.max(1))
}

/// `%g`-style formatting with `precision` significant digits.
fn format_general(value: Real, precision: usize) -> String {
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.unsigned_abs()
        );
    }

    let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
    strip_trailing_zeros(&format!("{:.*}", decimals, value)).to_string()
}

fn strip_trailing_zeros(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

//! Float arithmetic for the binary operators.
//!
//! Division-like operators raise on a zero divisor instead of producing an
//! infinity, `%` takes the sign of the divisor and `//` rounds toward negative
//! infinity, the way a calculator user expects integer-looking arithmetic to
//! behave.

use libm::{copysign, floor, fmod, pow};

use crate::Real;
use crate::error::{ExprError, Result};

/// `a / b`, failing on a zero divisor.
pub fn true_div(a: Real, b: Real) -> Result<Real> {
    if b == 0.0 {
        return Err(ExprError::DivideByZero);
    }
    Ok(a / b)
}

/// Returns `(a // b, a % b)`, with the remainder taking the sign of `b`.
fn divmod(a: Real, b: Real) -> (Real, Real) {
    let mut rem = fmod(a, b);
    // fmod is exact, so a - rem is an exact multiple of b
    let mut div = (a - rem) / b;
    if rem != 0.0 {
        if (b < 0.0) != (rem < 0.0) {
            rem += b;
            div -= 1.0;
        }
    } else {
        rem = copysign(0.0, b);
    }

    let floordiv = if div != 0.0 {
        let f = floor(div);
        if div - f > 0.5 { f + 1.0 } else { f }
    } else {
        copysign(0.0, a / b)
    };
    (floordiv, rem)
}

/// `a // b`: the quotient rounded toward negative infinity.
pub fn floor_div(a: Real, b: Real) -> Result<Real> {
    if b == 0.0 {
        return Err(ExprError::DivideByZero);
    }
    Ok(divmod(a, b).0)
}

/// `a % b`: the remainder, carrying the sign of the divisor.
pub fn modulo(a: Real, b: Real) -> Result<Real> {
    if b == 0.0 {
        return Err(ExprError::DivideByZero);
    }
    Ok(divmod(a, b).1)
}

/// `a ** b`.
///
/// Zero to a negative power is a division by zero. A negative finite base to
/// a fractional power has no real result and is reported as a complex value.
pub fn power(a: Real, b: Real) -> Result<Real> {
    if b == 0.0 {
        return Ok(1.0);
    }
    if a.is_nan() || b.is_nan() {
        return Ok(if a == 1.0 { 1.0 } else { Real::NAN });
    }
    if a == 0.0 && b < 0.0 && b.is_finite() {
        return Err(ExprError::DivideByZero);
    }
    if a < 0.0 && a.is_finite() && b.is_finite() && b.fract() != 0.0 {
        return Err(ExprError::NotANumber { type_name: "complex" });
    }

    let result = pow(a, b);
    if result.is_infinite() && a.is_finite() && b.is_finite() {
        return Err(ExprError::Overflow(
            "(34, 'Numerical result out of range')".to_string(),
        ));
    }
    Ok(result)
}

/// Bound past which an integral float no longer fits an `i128`.
const XOR_LIMIT: Real = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

fn operand_type(value: Real) -> &'static str {
    if value.is_finite() && value.fract() == 0.0 { "int" } else { "float" }
}

/// `a ^ b`: bitwise xor of two integral operands.
///
/// A fractional or non-finite operand is a float, which has no xor.
pub fn xor(a: Real, b: Real) -> Result<Real> {
    let (left, right) = (operand_type(a), operand_type(b));
    if left != "int" || right != "int" {
        return Err(ExprError::Other(format!(
            "unsupported operand type(s) for ^: '{}' and '{}'",
            left, right
        )));
    }
    if a.abs() >= XOR_LIMIT || b.abs() >= XOR_LIMIT {
        return Err(ExprError::Overflow("int too large to convert".to_string()));
    }
    Ok(((a as i128) ^ (b as i128)) as Real)
}

#![doc = r#"
# webcalc

A web calculator: a restricted math expression evaluator behind a small HTTP API.

## Overview

webcalc accepts arithmetic typed on a calculator keypad, evaluates it against a
fixed table of math functions and constants, and answers with a formatted result
or a short error message. The same pipeline is available as a library, as a
command-line tool and as an HTTP server.

Key features:
- Python-style float arithmetic: `//` floors, `%` takes the sign of the divisor,
  `**` is exponentiation and `^` is bitwise xor of integral operands
- A restricted symbol table: only the math library and a few general built-ins
  (`abs`, `round`, `min`, `max`, `sum`) are reachable from an expression
- Keypad substitutions: `√9`, `2*π`, `50%`
- Results formatted with up to 10 significant digits, integers printed in full
- Axum routes serving the calculator page and a JSON `/calculate` endpoint

## Quick Start

```rust
use webcalc::calculator::Calculator;

let calc = Calculator::new();
assert_eq!(calc.evaluate("2 + 3 * 4"), "14");
assert_eq!(calc.evaluate("√(16) + π - pi"), "4");
assert_eq!(calc.evaluate("200 * 15%"), "30");
assert_eq!(calc.evaluate("1 / 0"), "Error: Division by zero");
```

## Evaluating Without the Calculator Front End

The engine can be used directly. No keypad substitutions are applied and the
raw number is returned:

```rust
use webcalc::engine::interp;

let result = interp("sin(pi/4) ** 2 + cos(pi/4) ** 2", None).unwrap();
assert!((result - 1.0).abs() < 1e-12);
```

## Custom Symbol Tables

```rust
use webcalc::calculator::Calculator;
use webcalc::symbols::{Arity, SymbolTable};

let mut symbols = SymbolTable::new();
symbols.register_constant("g", 9.80665).unwrap();
symbols
    .register_iterable_function("mean", Arity::AtLeast(1), |args| {
        Ok(args.iter().sum::<f64>() / args.len() as f64)
    })
    .unwrap();

let calc = Calculator::builder().symbols(symbols).build();
assert_eq!(calc.evaluate("mean([1, 2, 3, 6])"), "3");
assert_eq!(calc.evaluate("g * 2"), "19.6133");
```

## Error Handling

Evaluation errors are values of [`error::ExprError`]. The calculator renders
them into one of a small set of messages:

| Failure                          | Message                        |
|----------------------------------|--------------------------------|
| division or modulo by zero       | `Error: Division by zero`      |
| argument outside a domain        | `Error: math domain error`     |
| input that does not parse        | `Error: Invalid expression`    |
| infinite or NaN result           | `Error: Invalid operation`     |
| anything else                    | `Error: <description>`         |

## Supported Grammar

- Numbers: `12`, `1.5`, `.5`, `5.`, `1e-3`
- Operators, loosest first: `^` (xor), `+ -`, `* / // %`, unary `+ -`, `**` (right associative)
- Calls: `log(8, 2)`; lists as call arguments: `sum([1, 2, 3])`, `max((4, 9))`
- Constants: `pi`, `e`, `tau`, `inf`, `nan`

## Built-in Functions

- Roots, powers, logarithms: `sqrt`, `cbrt`, `exp`, `exp2`, `expm1`, `log`, `log10`, `log2`, `log1p`, `pow`
- Trigonometry: `sin`, `cos`, `tan`, `asin`, `acos`, `atan`, `atan2`, `degrees`, `radians`
- Hyperbolic: `sinh`, `cosh`, `tanh`, `asinh`, `acosh`, `atanh`
- Rounding: `floor`, `ceil`, `trunc`, `round`, `fabs`, `abs`, `copysign`, `fmod`, `remainder`, `ldexp`, `nextafter`
- Integers: `factorial`, `isqrt`, `comb`, `perm`, `gcd`, `lcm`
- Special: `erf`, `erfc`, `gamma`, `lgamma`, `hypot`
- Predicates: `isfinite`, `isinf`, `isnan`
- Aggregates: `min`, `max`, `sum`, `fsum`, `prod`
"#]

pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod format;
pub mod functions;
pub mod handlers;
pub mod lexer;
pub mod rewrite;
pub mod server;
pub mod symbols;
pub mod telemetry;
pub mod types;

pub use calculator::{Calculator, CalculatorBuilder, ErrorClass, render_error};
pub use engine::{ParseLimits, interp, parse_expression, parse_expression_with_limits};
pub use error::ExprError;
pub use format::format_result;
pub use rewrite::{Rewrites, rewrite};
pub use server::{Server, ServerConfig, ServerError};
pub use symbols::{Arity, Symbol, SymbolTable};
pub use types::*;

/// Floating-point type used for every calculation.
pub type Real = f64;

pub mod constants {
    use super::Real;

    pub const PI: Real = core::f64::consts::PI;
    pub const E: Real = core::f64::consts::E;
    pub const TAU: Real = core::f64::consts::TAU;
    pub const TEST_PRECISION: Real = 1e-10;
}

/// Utility macro to check if two floating point values are approximately equal
/// within a specified epsilon. Supports optional format arguments like assert_eq!.
#[macro_export]
macro_rules! assert_approx_eq {
    // assert_approx_eq!(left, right) -> use default epsilon
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, $crate::constants::TEST_PRECISION)
    };
    // assert_approx_eq!(left, right, epsilon)
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let left_val: $crate::Real = $left;
        let right_val: $crate::Real = $right;
        let eps = $epsilon;

        let message = format!(
            "assertion failed: `(left ≈ right)` \
             (left: `{}`, right: `{}`, epsilon: `{}`)",
            left_val, right_val, eps
        );

        if left_val.is_nan() && right_val.is_nan() {
            // NaN == NaN for our purposes
        } else if left_val.is_infinite()
            && right_val.is_infinite()
            && left_val.signum() == right_val.signum()
        {
            // Same-signed infinities are equal
        } else {
            assert!((left_val - right_val).abs() < eps, "{}", message);
        }
    }};
    // assert_approx_eq!(left, right, epsilon, "format message with args", args...)
    ($left:expr, $right:expr, $epsilon:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        let left_val: $crate::Real = $left;
        let right_val: $crate::Real = $right;
        let eps = $epsilon;

        if left_val.is_nan() && right_val.is_nan() {
            // NaN == NaN for our purposes
        } else if left_val.is_infinite()
            && right_val.is_infinite()
            && left_val.signum() == right_val.signum()
        {
            // Same-signed infinities are equal
        } else {
            assert!((left_val - right_val).abs() < eps, $fmt $(, $arg)*);
        }
    }};
}

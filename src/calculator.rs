//! The calculator pipeline: rewrite, parse, evaluate, format.
//!
//! [`Calculator::evaluate`] is the whole behaviour of the `/calculate`
//! endpoint as a pure string-to-string function. It never fails: every error
//! is rendered into one of a handful of short messages.

use tracing::debug;

use crate::Real;
use crate::engine::{ParseLimits, check_length, parse_expression_with_limits};
use crate::error::{ExprError, Result};
use crate::eval::eval_ast;
use crate::format::{DEFAULT_PRECISION, format_result};
use crate::rewrite::{Rewrites, rewrite};
use crate::symbols::SymbolTable;

/// Broad classes of evaluation failure, each with its own rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Division, floor division or modulo by zero.
    DivisionByZero,
    /// An argument outside a function's domain.
    InvalidValue,
    /// Input that does not parse.
    InvalidSyntax,
    /// A result that is infinite or NaN.
    InvalidOperation,
    /// Anything else: unknown names, bad calls, overflow.
    Other,
}

impl ErrorClass {
    pub fn of(err: &ExprError) -> Self {
        match err {
            ExprError::DivideByZero => ErrorClass::DivisionByZero,
            ExprError::Value(_) => ErrorClass::InvalidValue,
            ExprError::Parse(_)
            | ExprError::Tokenizer(_)
            | ExprError::Syntax(_)
            | ExprError::UnmatchedParenthesis { .. }
            | ExprError::RecursionLimit(_) => ErrorClass::InvalidSyntax,
            ExprError::InvalidOperation => ErrorClass::InvalidOperation,
            ExprError::UnknownName { .. }
            | ExprError::NotCallable { .. }
            | ExprError::NotANumber { .. }
            | ExprError::InvalidFunctionCall { .. }
            | ExprError::Overflow(_)
            | ExprError::CapacityExceeded(_)
            | ExprError::Other(_) => ErrorClass::Other,
        }
    }
}

/// Renders an error as the message shown in place of a result.
///
/// ```
/// use webcalc::calculator::render_error;
/// use webcalc::error::ExprError;
///
/// assert_eq!(render_error(&ExprError::DivideByZero), "Error: Division by zero");
/// assert_eq!(
///     render_error(&ExprError::Value("math domain error".to_string())),
///     "Error: math domain error"
/// );
/// assert_eq!(
///     render_error(&ExprError::Syntax("Unexpected end of input".to_string())),
///     "Error: Invalid expression"
/// );
/// ```
pub fn render_error(err: &ExprError) -> String {
    match ErrorClass::of(err) {
        ErrorClass::DivisionByZero => "Error: Division by zero".to_string(),
        ErrorClass::InvalidSyntax => "Error: Invalid expression".to_string(),
        ErrorClass::InvalidOperation => "Error: Invalid operation".to_string(),
        ErrorClass::InvalidValue | ErrorClass::Other => format!("Error: {}", err),
    }
}

/// Evaluates calculator input against a restricted symbol table.
///
/// # Examples
///
/// ```
/// use webcalc::calculator::Calculator;
///
/// let calc = Calculator::new();
/// assert_eq!(calc.evaluate("2 + 3 * 4"), "14");
/// assert_eq!(calc.evaluate("√16 + 50%"), "4.5");
/// assert_eq!(calc.evaluate("1 / 3"), "0.3333333333");
/// assert_eq!(calc.evaluate("1 / 0"), "Error: Division by zero");
/// assert_eq!(calc.evaluate("sqrt(-1)"), "Error: math domain error");
/// assert_eq!(calc.evaluate("2 +"), "Error: Invalid expression");
/// ```
#[derive(Clone, Debug)]
pub struct Calculator {
    symbols: SymbolTable,
    rewrites: Rewrites,
    precision: usize,
    limits: ParseLimits,
}

impl Calculator {
    /// Creates a calculator with the default symbol table and every rewrite.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> CalculatorBuilder {
        CalculatorBuilder::default()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn rewrites(&self) -> Rewrites {
        self.rewrites
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    pub fn limits(&self) -> ParseLimits {
        self.limits
    }

    /// Evaluates `expression` and returns the formatted result or an error message.
    pub fn evaluate(&self, expression: &str) -> String {
        match self.try_evaluate(expression) {
            Ok(value) => {
                let formatted = format_result(value, self.precision);
                debug!(expression, result = %formatted, "evaluated expression");
                formatted
            }
            Err(err) => {
                debug!(expression, error = %err, class = ?ErrorClass::of(&err), "evaluation failed");
                render_error(&err)
            }
        }
    }

    /// Evaluates `expression` to a finite number.
    pub fn try_evaluate(&self, expression: &str) -> Result<Real> {
        // Rewriting can only grow the input, so oversized input is refused first
        check_length(expression, self.limits)?;
        let rewritten = rewrite(expression, self.rewrites);
        let ast = parse_expression_with_limits(&rewritten, self.limits)?;
        let value = eval_ast(&ast, &self.symbols)?;
        if !value.is_finite() {
            return Err(ExprError::InvalidOperation);
        }
        Ok(value)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Calculator`].
#[derive(Debug, Default)]
pub struct CalculatorBuilder {
    symbols: Option<SymbolTable>,
    rewrites: Option<Rewrites>,
    precision: Option<usize>,
    max_depth: Option<usize>,
    max_length: Option<usize>,
}

impl CalculatorBuilder {
    /// Sets the symbol table expressions may use.
    pub fn symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = Some(symbols);
        self
    }

    /// Sets the textual substitutions applied before parsing.
    pub fn rewrites(mut self, rewrites: Rewrites) -> Self {
        self.rewrites = Some(rewrites);
        self
    }

    /// Sets the significant digits used for non-integral results.
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = Some(precision);
        self
    }

    /// Sets the maximum nesting depth.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the maximum expression length in bytes.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn build(self) -> Calculator {
        let defaults = ParseLimits::default();
        Calculator {
            symbols: self.symbols.unwrap_or_default(),
            rewrites: self.rewrites.unwrap_or_default(),
            precision: self.precision.unwrap_or(DEFAULT_PRECISION).max(1),
            limits: ParseLimits {
                max_depth: self.max_depth.unwrap_or(defaults.max_depth),
                max_length: self.max_length.unwrap_or(defaults.max_length),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::Arity;

    #[test]
    fn test_error_classes() {
        assert_eq!(ErrorClass::of(&ExprError::DivideByZero), ErrorClass::DivisionByZero);
        assert_eq!(
            ErrorClass::of(&ExprError::RecursionLimit("deep".to_string())),
            ErrorClass::InvalidSyntax
        );
        assert_eq!(
            ErrorClass::of(&ExprError::UnknownName { name: "x".to_string() }),
            ErrorClass::Other
        );
        assert_eq!(ErrorClass::of(&ExprError::InvalidOperation), ErrorClass::InvalidOperation);
    }

    #[test]
    fn test_render_error_messages() {
        assert_eq!(render_error(&ExprError::InvalidOperation), "Error: Invalid operation");
        assert_eq!(
            render_error(&ExprError::UnknownName { name: "foo".to_string() }),
            "Error: name 'foo' is not defined"
        );
        assert_eq!(
            render_error(&ExprError::NotANumber { type_name: "complex" }),
            "Error: must be real number, not complex"
        );
        assert_eq!(
            render_error(&ExprError::UnmatchedParenthesis {
                position: 3,
                found: ")".to_string()
            }),
            "Error: Invalid expression"
        );
    }

    #[test]
    fn test_non_finite_results() {
        let calc = Calculator::new();
        assert_eq!(calc.evaluate("inf"), "Error: Invalid operation");
        assert_eq!(calc.evaluate("nan"), "Error: Invalid operation");
        assert_eq!(calc.evaluate("1e308 * 10"), "Error: Invalid operation");
        assert_eq!(calc.try_evaluate("inf - inf"), Err(ExprError::InvalidOperation));
    }

    #[test]
    fn test_oversized_input_is_refused_before_rewriting() {
        let calc = Calculator::new();
        let radicals = format!("{}4", "√".repeat(200_000));
        assert_eq!(calc.evaluate(&radicals), "Error: Invalid expression");
        assert!(matches!(calc.try_evaluate(&radicals), Err(ExprError::Syntax(_))));

        // Within the length limit the nesting limit still applies after rewriting
        let nested = format!("{}4", "√".repeat(1_000));
        assert_eq!(calc.evaluate(&nested), "Error: Invalid expression");
        assert_eq!(calc.evaluate("√√√√256"), "1.414213562");
    }

    #[test]
    fn test_builder_settings() {
        let calc = Calculator::builder()
            .precision(3)
            .rewrites(Rewrites::STRIP_SPACES)
            .max_length(16)
            .build();
        assert_eq!(calc.evaluate("1 / 3"), "0.333");
        assert_eq!(calc.evaluate("√9"), "Error: Invalid expression");
        assert_eq!(calc.evaluate("1 + 1 + 1 + 1 + 1 + 1 + 1 + 1 + 1"), "Error: Invalid expression");
        assert_eq!(calc.precision(), 3);
        assert_eq!(calc.limits().max_length, 16);
    }

    #[test]
    fn test_custom_symbols() {
        let mut symbols = SymbolTable::empty();
        symbols
            .register_native_function("twice", Arity::Exact(1), |args| Ok(args[0] * 2.0))
            .unwrap();
        let calc = Calculator::builder().symbols(symbols).build();
        assert_eq!(calc.evaluate("twice(21)"), "42");
        assert_eq!(calc.evaluate("sqrt(4)"), "Error: name 'sqrt' is not defined");
    }
}

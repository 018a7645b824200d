//! Error types and handling for the webcalc crate.
//!
//! This module defines the error type used throughout expression rewriting, parsing
//! and evaluation. Each variant carries enough detail to render the short,
//! human-readable message the calculator returns to its callers.

use core::fmt;
use core::num::ParseFloatError;

use crate::symbols::Arity;

/// Result type used throughout the crate.
///
/// This is a convenience type alias that uses the `ExprError` type for the error variant.
pub type Result<T> = core::result::Result<T, ExprError>;

/// Error type for expression parsing and evaluation.
///
/// This enum represents all possible errors that can occur while an expression is
/// tokenized, parsed and evaluated against a symbol table.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    /// Error when parsing a floating point number.
    ///
    /// This occurs when a numeric literal cannot be converted to a floating point number.
    Parse(ParseFloatError),

    /// Error during lexical analysis (tokenization).
    ///
    /// This occurs when the tokenizer encounters a character or literal it cannot
    /// process. The string contains a detailed error message.
    Tokenizer(String),

    /// Error during syntax analysis.
    ///
    /// This occurs when the parser encounters unexpected tokens, incorrect expression
    /// structure, or other syntax issues. The string contains a detailed error message.
    Syntax(String),

    /// Error for unmatched parentheses in an expression.
    ///
    /// This provides the position of the unmatched parenthesis and the specific
    /// parenthesis character that was found without a matching pair.
    UnmatchedParenthesis { position: usize, found: String },

    /// Error when the expression nests deeper than the parser allows.
    RecursionLimit(String),

    /// A name that is neither a constant nor a function of the symbol table.
    UnknownName { name: String },

    /// A call whose target is a constant rather than a function.
    NotCallable { name: String },

    /// A value that cannot take part in arithmetic, such as a list outside a
    /// call or a function referenced without calling it.
    NotANumber {
        /// The kind of value that was found
        type_name: &'static str,
    },

    /// Error when a function is called with the wrong number of arguments.
    InvalidFunctionCall {
        /// Name of the function that was called
        name: String,
        /// Number of arguments the function accepts
        expected: Arity,
        /// Actual number of arguments provided
        found: usize,
    },

    /// Division (or modulo, or floor division) by zero.
    DivideByZero,

    /// An argument outside the domain of a function, e.g. `sqrt(-1)`.
    ///
    /// The string is the message shown to the user, usually `math domain error`.
    Value(String),

    /// A finite computation whose result does not fit in a float.
    Overflow(String),

    /// The expression evaluated to infinity or NaN.
    InvalidOperation,

    /// Error when capacity is exceeded for a heapless container.
    ///
    /// The string indicates which container type exceeded capacity.
    CapacityExceeded(&'static str),

    /// General-purpose error for any other error conditions.
    Other(String),
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::Parse(err) => write!(f, "Invalid number: {}", err),
            ExprError::Tokenizer(err) => write!(f, "Tokenizer error: {}", err),
            ExprError::Syntax(err) => write!(f, "Syntax error: {}", err),
            ExprError::UnmatchedParenthesis { position, found } => {
                write!(
                    f,
                    "Unmatched parenthesis at position {}: found '{}'",
                    position, found
                )
            }
            ExprError::RecursionLimit(err) => write!(f, "Recursion limit exceeded: {}", err),
            ExprError::UnknownName { name } => write!(f, "name '{}' is not defined", name),
            ExprError::NotCallable { name } => write!(f, "'{}' is not callable", name),
            ExprError::NotANumber { type_name } => {
                write!(f, "must be real number, not {}", type_name)
            }
            ExprError::InvalidFunctionCall {
                name,
                expected,
                found,
            } => write!(f, "{}() takes {} ({} given)", name, expected, found),
            ExprError::DivideByZero => write!(f, "Division by zero"),
            ExprError::Value(msg) => write!(f, "{}", msg),
            ExprError::Overflow(msg) => write!(f, "{}", msg),
            ExprError::InvalidOperation => write!(f, "Invalid operation"),
            ExprError::CapacityExceeded(container_type) => {
                write!(f, "Capacity exceeded for {}", container_type)
            }
            ExprError::Other(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ExprError {}

impl From<String> for ExprError {
    fn from(err: String) -> ExprError {
        ExprError::Other(err)
    }
}

impl From<ParseFloatError> for ExprError {
    fn from(err: ParseFloatError) -> ExprError {
        ExprError::Parse(err)
    }
}

/// Shorthand for the error every math function raises outside its domain.
pub(crate) fn domain_error() -> ExprError {
    ExprError::Value("math domain error".to_string())
}

/// Shorthand for the error raised when a finite computation overflows.
pub(crate) fn range_error() -> ExprError {
    ExprError::Overflow("math range error".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ExprError::UnknownName { name: "foo".to_string() }.to_string(),
            "name 'foo' is not defined"
        );
        assert_eq!(domain_error().to_string(), "math domain error");
        assert_eq!(range_error().to_string(), "math range error");
        assert_eq!(
            ExprError::NotANumber { type_name: "list" }.to_string(),
            "must be real number, not list"
        );
        assert_eq!(
            ExprError::InvalidFunctionCall {
                name: "sqrt".to_string(),
                expected: Arity::Exact(1),
                found: 2,
            }
            .to_string(),
            "sqrt() takes exactly one argument (2 given)"
        );
    }

    #[test]
    fn test_from_conversions() {
        let err: ExprError = "boom".to_string().into();
        assert_eq!(err, ExprError::Other("boom".to_string()));

        let parse_err = "1.2.3".parse::<f64>().unwrap_err();
        let err: ExprError = parse_err.into();
        assert!(matches!(err, ExprError::Parse(_)));
    }
}

//! Type definitions for the expression parser and evaluator.
//!
//! This module contains the core data structures shared by the lexer, the parser
//! and the evaluator: the Abstract Syntax Tree (AST), token kinds and the
//! operator enums.

use core::fmt;

use crate::Real;

/// Abstract Syntax Tree (AST) node representing an expression.
///
/// Each variant of this enum represents a different type of expression node,
/// forming a tree structure that can be evaluated against a symbol table.
#[derive(Clone, Debug, PartialEq)]
pub enum AstExpr {
    /// A literal numerical value.
    ///
    /// Examples: `3.14`, `42`, `.5`, `1e-3`
    Constant(Real),

    /// A named constant reference, resolved against the symbol table.
    ///
    /// Examples: `pi`, `e`, `tau`
    Variable(String),

    /// A function call with a name and list of argument expressions.
    ///
    /// Examples: `sin(x)`, `max(1, 2)`, `sqrt(3*3 + 4*4)`
    Function {
        /// The name of the function being called
        name: String,
        /// The arguments passed to the function
        args: Vec<AstExpr>,
    },

    /// A list literal, written `[a, b]` or `(a, b)`.
    ///
    /// Lists only have meaning as arguments of functions that iterate over
    /// their input, such as `sum([1, 2, 3])`.
    List(Vec<AstExpr>),

    /// A prefix operator applied to a single operand.
    ///
    /// Examples: `-x`, `+3`
    UnaryOp {
        /// The prefix operator
        op: UnaryOperator,
        /// The operand
        operand: Box<AstExpr>,
    },

    /// An infix arithmetic operation.
    ///
    /// Examples: `1 + 2`, `7 // 2`, `2 ** 10`
    BinaryOp {
        /// The infix operator
        op: BinaryOperator,
        /// The left operand
        left: Box<AstExpr>,
        /// The right operand
        right: Box<AstExpr>,
    },
}

impl AstExpr {
    /// Returns the kind of this node.
    pub fn kind(&self) -> ExprKind {
        match self {
            AstExpr::Constant(_) => ExprKind::Constant,
            AstExpr::Variable(_) => ExprKind::Variable,
            AstExpr::Function { args, .. } => ExprKind::Function { arity: args.len() },
            AstExpr::List(_) => ExprKind::List,
            AstExpr::UnaryOp { .. } | AstExpr::BinaryOp { .. } => ExprKind::Operator,
        }
    }
}

/// Classifies the kind of expression node in the AST.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ExprKind {
    /// A constant numerical value.
    Constant,
    /// A named constant.
    Variable,
    /// A function call with a specific number of arguments.
    Function {
        /// Number of arguments passed
        arity: usize,
    },
    /// A list literal.
    List,
    /// A unary or binary operation.
    Operator,
}

/// Classifies the kind of token produced during lexical analysis.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    /// A numerical literal.
    Number,

    /// A constant or function name.
    Identifier,

    /// An operator such as +, -, *, /, //, %, ^ or **.
    Operator,

    /// An opening delimiter like '(' or '['.
    Open,

    /// A closing delimiter like ')' or ']'.
    Close,

    /// A separator between items, a comma.
    Separator,

    /// An error token representing invalid input.
    Error,
}

/// Prefix operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOperator {
    /// `-x`
    Neg,
    /// `+x`
    Pos,
}

/// Infix arithmetic operators.
///
/// `^` is bitwise xor, not exponentiation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    BitXor,
}

impl BinaryOperator {
    /// Maps operator text to the operator, if it is one.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Sub),
            "*" => Some(BinaryOperator::Mul),
            "/" => Some(BinaryOperator::Div),
            "//" => Some(BinaryOperator::FloorDiv),
            "%" => Some(BinaryOperator::Mod),
            "**" => Some(BinaryOperator::Pow),
            "^" => Some(BinaryOperator::BitXor),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::FloorDiv => "//",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "**",
            BinaryOperator::BitXor => "^",
        };
        write!(f, "{}", symbol)
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOperator::Neg => write!(f, "-"),
            UnaryOperator::Pos => write!(f, "+"),
        }
    }
}

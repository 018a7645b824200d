//! Expression evaluation module for webcalc
//!
//! This module contains the evaluation logic for parsed expressions:
//! AST traversal, name resolution against the symbol table, function
//! application and the float arithmetic the operators follow.

pub mod arith;
pub mod ast;

pub use arith::{floor_div, modulo, power, true_div, xor};
pub use ast::eval_ast;

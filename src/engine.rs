use crate::Real;
use crate::error::{ExprError, Result};
use crate::eval::eval_ast;
use crate::lexer::{Lexer, Token};
use crate::symbols::SymbolTable;
use crate::types::{AstExpr, BinaryOperator, TokenKind, UnaryOperator};

/// Default maximum nesting depth of an expression.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Default maximum expression length in bytes.
pub const DEFAULT_MAX_LENGTH: usize = 10_000;

/// Limits applied while parsing untrusted input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum nesting of sub-expressions, groups and calls.
    pub max_depth: usize,
    /// Maximum input length in bytes.
    pub max_length: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Pratt parser for mathematical expressions
struct PrattParser<'a> {
    lexer: Lexer<'a>,
    current: Option<Token>,
    recursion_depth: usize,
    max_recursion_depth: usize,
}

/// Token binding powers for the Pratt parser
#[derive(Debug, Clone, Copy)]
struct BindingPower {
    left: u8,
    right: u8,
}

impl BindingPower {
    const fn new(left: u8, right: u8) -> Self {
        Self { left, right }
    }

    // For left-associative operators, right binding power is left + 1
    const fn left_assoc(power: u8) -> Self {
        Self::new(power, power + 1)
    }

    // For right-associative operators, right binding power is same as left
    const fn right_assoc(power: u8) -> Self {
        Self::new(power, power)
    }
}

// Unary signs bind looser than power, so -2**2 is -(2**2)
const PREFIX_BINDING_POWER: u8 = 14;

fn token_text(tok: &Token) -> String {
    tok.text.clone().unwrap_or_else(|| "unknown".to_string())
}

impl<'a> PrattParser<'a> {
    fn new(input: &'a str, max_recursion_depth: usize) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            recursion_depth: 0,
            max_recursion_depth,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.current.as_ref()
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.current.take();
        self.current = self.lexer.next_token();
        tok
    }

    fn peek_is(&self, kind: TokenKind, text: &str) -> bool {
        self.peek()
            .is_some_and(|tok| tok.kind == kind && tok.text.as_deref() == Some(text))
    }

    // Get binding power for an infix operator
    fn get_binding_power(op: BinaryOperator) -> BindingPower {
        match op {
            BinaryOperator::BitXor => BindingPower::left_assoc(7),
            BinaryOperator::Add | BinaryOperator::Sub => BindingPower::left_assoc(9),
            BinaryOperator::Mul
            | BinaryOperator::Div
            | BinaryOperator::FloorDiv
            | BinaryOperator::Mod => BindingPower::left_assoc(10),
            BinaryOperator::Pow => BindingPower::right_assoc(15),
        }
    }

    fn get_prefix_operator(op: &str) -> Option<UnaryOperator> {
        match op {
            "-" => Some(UnaryOperator::Neg),
            "+" => Some(UnaryOperator::Pos),
            _ => None,
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > self.max_recursion_depth {
            return Err(ExprError::RecursionLimit(format!(
                "Expression too complex: exceeded maximum nesting depth of {}",
                self.max_recursion_depth
            )));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.recursion_depth -= 1;
    }

    // Unified error handling for all bracket-like structures
    fn expect_closing(&mut self, expected: &str, opening_position: usize) -> Result<()> {
        if let Some(tok) = self.peek() {
            if tok.kind == TokenKind::Close {
                if tok.text.as_deref() == Some(expected) {
                    self.next();
                    return Ok(());
                }
                // A closing bracket of the wrong shape, e.g. "(1]"
                return Err(ExprError::UnmatchedParenthesis {
                    position: tok.position,
                    found: token_text(tok),
                });
            }

            return Err(ExprError::Syntax(format!(
                "Expected '{}' at position {}, found '{}' (opening at position {})",
                expected,
                tok.position,
                token_text(tok),
                opening_position
            )));
        }

        Err(ExprError::Syntax(format!(
            "Expected '{}' but found end of input (opening at position {})",
            expected, opening_position
        )))
    }

    /// Parses comma-separated items up to the closing bracket.
    ///
    /// The opening bracket has already been consumed. A trailing comma is
    /// accepted. Returns the items and whether any comma was seen.
    fn parse_sequence(&mut self, closing: &str, opening_position: usize) -> Result<(Vec<AstExpr>, bool)> {
        let mut items = Vec::new();
        let mut saw_comma = false;

        while !self.peek_is(TokenKind::Close, closing) {
            if self.peek().is_none() {
                break;
            }
            items.push(self.parse_expr(0)?);

            if self.peek().is_some_and(|tok| tok.kind == TokenKind::Separator) {
                self.next();
                saw_comma = true;
            } else {
                break;
            }
        }

        self.expect_closing(closing, opening_position)?;
        Ok((items, saw_comma))
    }

    // A parenthesised group is either grouping, "(a)", or a tuple, "(a, b)" or "()"
    fn parse_parenthesized_expr(&mut self) -> Result<AstExpr> {
        let open_position = self.peek().map(|t| t.position).unwrap_or(0);
        self.next(); // consume '('

        self.enter()?;
        let (mut items, saw_comma) = self.parse_sequence(")", open_position)?;
        self.leave();

        if items.len() == 1 && !saw_comma {
            return Ok(items.remove(0));
        }
        Ok(AstExpr::List(items))
    }

    fn parse_list(&mut self) -> Result<AstExpr> {
        let open_position = self.peek().map(|t| t.position).unwrap_or(0);
        self.next(); // consume '['

        self.enter()?;
        let (items, _) = self.parse_sequence("]", open_position)?;
        self.leave();
        Ok(AstExpr::List(items))
    }

    fn parse_function_call(&mut self, name: String) -> Result<AstExpr> {
        let open_position = self.peek().map(|t| t.position).unwrap_or(0);
        self.next(); // consume '('

        self.enter()?;
        let (args, _) = self.parse_sequence(")", open_position)?;
        self.leave();
        Ok(AstExpr::Function { name, args })
    }

    // Parse an expression with the given minimum binding power
    fn parse_expr(&mut self, min_bp: u8) -> Result<AstExpr> {
        self.enter()?;

        let lhs = self.parse_prefix_or_primary()?;
        let lhs = self.parse_infix_operators(lhs, min_bp)?;

        self.leave();
        Ok(lhs)
    }

    fn parse_prefix_or_primary(&mut self) -> Result<AstExpr> {
        let Some(tok) = self.peek() else {
            return self.parse_primary();
        };
        if tok.kind != TokenKind::Operator {
            return self.parse_primary();
        }
        let Some(op) = tok.text.as_deref().and_then(Self::get_prefix_operator) else {
            return self.parse_primary();
        };
        let op_position = tok.position;
        self.next();

        if self.peek().is_none() {
            return Err(ExprError::Syntax(format!(
                "Expected expression after '{}' at position {}",
                op, op_position
            )));
        }

        let operand = self.parse_expr(PREFIX_BINDING_POWER)?;
        Ok(AstExpr::UnaryOp {
            op,
            operand: Box::new(operand),
        })
    }

    // Each operator adds a level to the tree, so it counts against the depth limit
    fn parse_infix_operators(&mut self, mut lhs: AstExpr, min_bp: u8) -> Result<AstExpr> {
        let mut levels = 0;
        loop {
            let Some(tok) = self.peek() else {
                break;
            };
            if tok.kind != TokenKind::Operator {
                break;
            }
            let Some(op) = tok.text.as_deref().and_then(BinaryOperator::from_symbol) else {
                break;
            };

            let bp = Self::get_binding_power(op);
            if bp.left < min_bp {
                break;
            }
            let op_position = tok.position;
            self.next();
            self.enter()?;
            levels += 1;

            if self.peek().is_none() {
                return Err(ExprError::Syntax(format!(
                    "Expected expression after '{}' at position {}",
                    op, op_position
                )));
            }

            // The exponent may carry its own sign, as in 2**-1
            let rhs = if op == BinaryOperator::Pow {
                self.parse_expr(bp.right - 1)?
            } else {
                self.parse_expr(bp.right)?
            };

            lhs = AstExpr::BinaryOp {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
            };
        }
        self.recursion_depth -= levels;
        Ok(lhs)
    }

    // Parse a primary expression (number, name, call, group or list)
    fn parse_primary(&mut self) -> Result<AstExpr> {
        let tok = match self.peek() {
            Some(tok) => tok,
            None => return Err(ExprError::Syntax("Unexpected end of input".to_string())),
        };

        match tok.kind {
            TokenKind::Number => {
                let val = tok.value.unwrap_or(0.0);
                self.next();
                Ok(AstExpr::Constant(val))
            }
            TokenKind::Identifier => {
                let name = match &tok.text {
                    Some(name) => name.clone(),
                    None => return Err(ExprError::Syntax("Name is missing".to_string())),
                };
                self.next();
                if self.peek_is(TokenKind::Open, "(") {
                    self.parse_function_call(name)
                } else {
                    Ok(AstExpr::Variable(name))
                }
            }
            TokenKind::Open if tok.text.as_deref() == Some("(") => self.parse_parenthesized_expr(),
            TokenKind::Open => self.parse_list(),
            TokenKind::Close => Err(ExprError::UnmatchedParenthesis {
                position: tok.position,
                found: token_text(tok),
            }),
            TokenKind::Error => Err(ExprError::Tokenizer(format!(
                "Unexpected input at position {}: '{}'",
                tok.position,
                token_text(tok)
            ))),
            _ => Err(ExprError::Syntax(format!(
                "Unexpected token at position {}: '{}'",
                tok.position,
                token_text(tok)
            ))),
        }
    }

    // Parse a complete expression
    fn parse(&mut self) -> Result<AstExpr> {
        self.recursion_depth = 0;
        let expr = self.parse_expr(0)?;

        // Check for unexpected trailing tokens
        if let Some(tok) = self.peek() {
            return Err(match tok.kind {
                TokenKind::Close => ExprError::UnmatchedParenthesis {
                    position: tok.position,
                    found: token_text(tok),
                },
                TokenKind::Error => ExprError::Tokenizer(format!(
                    "Unexpected input at position {}: '{}'",
                    tok.position,
                    token_text(tok)
                )),
                _ => ExprError::Syntax(format!(
                    "Unexpected token at position {}: '{}'",
                    tok.position,
                    token_text(tok)
                )),
            });
        }

        Ok(expr)
    }
}

/// Rejects input longer than `limits.max_length` bytes.
pub fn check_length(input: &str, limits: ParseLimits) -> Result<()> {
    if input.len() > limits.max_length {
        return Err(ExprError::Syntax(format!(
            "Expression too long: {} characters (maximum is {})",
            input.len(),
            limits.max_length
        )));
    }
    Ok(())
}

/// Parse an expression string into an AST using the Pratt parser.
/// Returns a Result with either the parsed AST or an error explaining what went wrong.
pub fn parse_expression(input: &str) -> Result<AstExpr> {
    parse_expression_with_limits(input, ParseLimits::default())
}

/// Parse an expression string, enforcing the given length and nesting limits.
pub fn parse_expression_with_limits(input: &str, limits: ParseLimits) -> Result<AstExpr> {
    check_length(input, limits)?;
    if input.trim().is_empty() {
        return Err(ExprError::Syntax("Empty expression".to_string()));
    }

    let mut parser = PrattParser::new(input, limits.max_depth);
    parser.parse()
}

/// Interprets a string as a mathematical expression, evaluates it, and returns the result.
///
/// The expression is parsed as written: no textual rewriting happens here, so
/// `√` and `π` are rejected. Use [`Calculator`](crate::calculator::Calculator)
/// for the full input pipeline.
///
/// # Parameters
///
/// * `expression`: The mathematical expression to evaluate as a string
/// * `symbols`: The symbol table to evaluate against, or `None` for the default table
///
/// # Examples
///
/// ```
/// use webcalc::engine::interp;
///
/// let result = interp("2 + 3 * 4", None).unwrap();
/// assert_eq!(result, 14.0);
///
/// // Built-in functions and constants
/// let result = interp("sin(pi/6) + cos(pi/3)", None).unwrap();
/// assert!((result - 1.0).abs() < 0.0001);
/// ```
///
/// Error handling:
///
/// ```
/// use webcalc::engine::interp;
/// use webcalc::error::ExprError;
///
/// match interp("2 + * 3", None) {
///     Ok(_) => panic!("Expected an error"),
///     Err(ExprError::Syntax(_)) => {}
///     Err(e) => panic!("Unexpected error: {:?}", e),
/// }
/// ```
pub fn interp(expression: &str, symbols: Option<&SymbolTable>) -> Result<Real> {
    let ast = parse_expression(expression)?;
    match symbols {
        Some(symbols) => eval_ast(&ast, symbols),
        None => eval_ast(&ast, &SymbolTable::new()),
    }
}

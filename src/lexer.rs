use crate::Real;
use crate::types::TokenKind;

/// Longest identifier the lexer accepts.
const MAX_TOKEN_LENGTH: usize = 1000;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Option<Real>,
    pub text: Option<String>,
    pub position: usize,
}

impl Token {
    fn new(kind: TokenKind, text: &str, position: usize) -> Self {
        Self {
            kind,
            value: None,
            text: Some(String::from(text)),
            position,
        }
    }

    fn number(value: Real, text: &str, position: usize) -> Self {
        Self {
            kind: TokenKind::Number,
            value: Some(value),
            text: Some(String::from(text)),
            position,
        }
    }
}

/// The lexer struct, which produces tokens from an input string.
#[derive(Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pub pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Peek at the current character.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Peek at the character after the current one.
    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advance the position by one character.
    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Peek at the next token without consuming it
    pub fn peek_token(&self) -> Option<Token> {
        let mut lexer_copy = self.clone();
        lexer_copy.next_token()
    }

    /// Get the original input string
    pub fn get_original_input(&self) -> &'a str {
        self.input
    }

    /// Skip whitespace.
    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn consume_digits(&mut self) -> bool {
        let mut any = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                any = true;
                self.advance();
            } else {
                break;
            }
        }
        any
    }

    /// Lex a number: `12`, `1.5`, `.5`, `5.`, `1e-3`, `.9e2`.
    fn lex_number(&mut self, start_pos: usize) -> Token {
        let has_int = self.consume_digits();
        let mut has_frac = false;
        if self.peek() == Some('.') {
            self.advance();
            has_frac = self.consume_digits();
        }
        if !has_int && !has_frac {
            return Token::new(TokenKind::Error, &self.input[start_pos..self.pos], start_pos);
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            // Must have at least one digit after e/E
            if !self.consume_digits() {
                return Token::new(TokenKind::Error, &self.input[start_pos..self.pos], start_pos);
            }
        }

        // A second dot glued to the literal ("1.2.3") is malformed
        if self.peek() == Some('.') {
            self.advance();
            self.consume_digits();
            return Token::new(TokenKind::Error, &self.input[start_pos..self.pos], start_pos);
        }

        let num_str = &self.input[start_pos..self.pos];
        match num_str.parse::<Real>() {
            Ok(val) => Token::number(val, num_str, start_pos),
            Err(_) => Token::new(TokenKind::Error, num_str, start_pos),
        }
    }

    /// Get the next token from the input.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();
        let start_pos = self.pos;
        let c = self.peek()?;

        // Number (integer or float, possibly scientific notation)
        if c.is_ascii_digit() || (c == '.' && self.peek_second().is_some_and(|d| d.is_ascii_digit()))
        {
            return Some(self.lex_number(start_pos));
        }

        // Operators, with lookahead for the two-character forms
        if "+-*/%^".contains(c) {
            self.advance();
            let doubled = matches!(
                (c, self.peek()),
                ('*', Some('*')) | ('/', Some('/'))
            );
            if doubled {
                self.advance();
            }
            return Some(Token::new(
                TokenKind::Operator,
                &self.input[start_pos..self.pos],
                start_pos,
            ));
        }

        // Identifier (constant or function name)
        if c.is_ascii_alphabetic() || c == '_' {
            while let Some(nc) = self.peek() {
                if nc.is_ascii_alphanumeric() || nc == '_' {
                    self.advance();
                } else {
                    break;
                }
            }

            if self.pos - start_pos > MAX_TOKEN_LENGTH {
                let msg = format!(
                    "Token too long: {} characters (maximum is {})",
                    self.pos - start_pos,
                    MAX_TOKEN_LENGTH
                );
                return Some(Token::new(TokenKind::Error, &msg, start_pos));
            }

            return Some(Token::new(
                TokenKind::Identifier,
                &self.input[start_pos..self.pos],
                start_pos,
            ));
        }

        // Other punctuation
        let kind = match c {
            '(' | '[' => TokenKind::Open,
            ')' | ']' => TokenKind::Close,
            ',' => TokenKind::Separator,
            _ => TokenKind::Error,
        };
        self.advance();
        Some(Token::new(kind, &self.input[start_pos..self.pos], start_pos))
    }
}

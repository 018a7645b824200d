//! Textual substitutions applied to calculator input before parsing.
//!
//! Calculator keypads produce symbols the expression grammar does not know:
//! `√`, `π` and a postfix `%`. Each [`Rewrites`] flag turns one of them into
//! plain syntax. The passes always run in the same order: spaces, radicals,
//! pi, percent.

use std::sync::OnceLock;

use bitflags::bitflags;
use regex::Regex;

bitflags! {
    /// The set of substitutions to apply.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Rewrites: u8 {
        /// Remove every ASCII space.
        const STRIP_SPACES = 1 << 0;
        /// `√x` becomes `sqrt(x)`.
        const RADICAL = 1 << 1;
        /// `π` becomes `pi`.
        const PI = 1 << 2;
        /// A number followed by `%` becomes a fraction of one hundred.
        const PERCENT = 1 << 3;
    }
}

impl Default for Rewrites {
    fn default() -> Self {
        Rewrites::all()
    }
}

impl Rewrites {
    /// Parses a rewrite name as used in configuration files.
    pub fn from_config_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "strip_spaces" => Some(Rewrites::STRIP_SPACES),
            "radical" => Some(Rewrites::RADICAL),
            "pi" => Some(Rewrites::PI),
            "percent" => Some(Rewrites::PERCENT),
            _ => None,
        }
    }
}

/// Applies the enabled substitutions to `input`.
///
/// # Examples
///
/// ```
/// use webcalc::rewrite::{Rewrites, rewrite};
///
/// assert_eq!(rewrite("√9 + 1", Rewrites::all()), "sqrt(9)+1");
/// assert_eq!(rewrite("2 * π", Rewrites::all()), "2*pi");
/// assert_eq!(rewrite("50% * 80", Rewrites::all()), "(50/100)*80");
/// assert_eq!(rewrite("10 % 3", Rewrites::all()), "10%3");
/// ```
pub fn rewrite(input: &str, rewrites: Rewrites) -> String {
    let mut expr = input.to_string();
    if rewrites.contains(Rewrites::STRIP_SPACES) {
        expr = expr.replace(' ', "");
    }
    if rewrites.contains(Rewrites::RADICAL) {
        expr = rewrite_radicals(&expr);
    }
    if rewrites.contains(Rewrites::PI) {
        expr = expr.replace('π', "pi");
    }
    if rewrites.contains(Rewrites::PERCENT) {
        expr = rewrite_percentages(&expr);
    }
    expr
}

const RADICAL: char = '√';

/// Replaces `√` with `sqrt`, parenthesising a bare operand.
///
/// The scan is a single pass. When a radical applies to a call or a group,
/// the closing parentheses it owes are queued and written once the group at
/// that nesting depth closes.
fn rewrite_radicals(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    let mut pending: Vec<(usize, usize)> = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            RADICAL => i = rewrite_radical_run(&chars, i, depth, &mut out, &mut pending),
            '(' => {
                depth += 1;
                out.push('(');
                i += 1;
            }
            ')' => {
                out.push(')');
                depth = depth.saturating_sub(1);
                while let Some(&(owed_at, count)) = pending.last() {
                    if owed_at != depth {
                        break;
                    }
                    push_repeated(&mut out, ")", count);
                    pending.pop();
                }
                i += 1;
            }
            c => {
                out.push(c);
                i += 1;
            }
        }
    }
    out
}

/// Rewrites the run of radicals starting at `start` and returns the index
/// where scanning resumes.
fn rewrite_radical_run(
    chars: &[char],
    start: usize,
    depth: usize,
    out: &mut String,
    pending: &mut Vec<(usize, usize)>,
) -> usize {
    let mut operand = start;
    while chars.get(operand) == Some(&RADICAL) {
        operand += 1;
    }
    let count = operand - start;

    let Some(&first) = chars.get(operand) else {
        push_repeated(out, "sqrt", count);
        return operand;
    };

    // The innermost radical becomes the call: √√(16) is sqrt(sqrt(16))
    if first == '(' {
        push_repeated(out, "sqrt(", count - 1);
        out.push_str("sqrt");
        if count > 1 {
            pending.push((depth, count - 1));
        }
        return operand;
    }

    let end = if first == 'π' {
        operand + 1
    } else if first.is_ascii_digit() || first == '.' {
        number_end(chars, operand)
    } else if first.is_ascii_alphabetic() || first == '_' {
        let mut end = operand;
        while end < chars.len() && (chars[end].is_ascii_alphanumeric() || chars[end] == '_') {
            end += 1;
        }
        // A function call is part of the operand: √abs(-4)
        if chars.get(end) == Some(&'(') {
            push_repeated(out, "sqrt(", count);
            out.extend(&chars[operand..end]);
            pending.push((depth, count));
            return end;
        }
        end
    } else {
        push_repeated(out, "sqrt", count);
        return operand;
    };

    push_repeated(out, "sqrt(", count);
    out.extend(&chars[operand..end]);
    push_repeated(out, ")", count);
    end
}

fn push_repeated(out: &mut String, text: &str, count: usize) {
    for _ in 0..count {
        out.push_str(text);
    }
}

/// End of a number literal, including a fraction and an exponent.
fn number_end(chars: &[char], start: usize) -> usize {
    let mut end = start;
    while end < chars.len() && (chars[end].is_ascii_digit() || chars[end] == '.') {
        end += 1;
    }
    if end < chars.len() && matches!(chars[end], 'e' | 'E') {
        let mut exp = end + 1;
        if exp < chars.len() && matches!(chars[exp], '+' | '-') {
            exp += 1;
        }
        if exp < chars.len() && chars[exp].is_ascii_digit() {
            while exp < chars.len() && chars[exp].is_ascii_digit() {
                exp += 1;
            }
            end = exp;
        }
    }
    end
}

fn percent_pattern() -> &'static Regex {
    static PERCENT_RE: OnceLock<Regex> = OnceLock::new();
    PERCENT_RE.get_or_init(|| Regex::new(r"(?:\d+(?:\.\d*)?|\.\d+)%").expect("valid regex"))
}

/// Characters that may follow a percentage sign used as a percentage.
fn ends_operand(next: Option<char>) -> bool {
    match next {
        None => true,
        Some(c) => matches!(c, '+' | '-' | '*' | '/' | '^' | ')' | ']' | ','),
    }
}

/// Replaces `N%` with `(N/100)` where the `%` cannot be a modulo operator.
fn rewrite_percentages(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    let mut last = 0;

    for m in percent_pattern().find_iter(input) {
        // The literal must start a token: no identifier or number glued on the left
        let glued = input[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        let next = input[m.end()..].chars().find(|c| !c.is_whitespace());
        if glued || !ends_operand(next) {
            continue;
        }

        let number = &input[m.start()..m.end() - 1];
        out.push_str(&input[last..m.start()]);
        out.push('(');
        out.push_str(number);
        out.push_str("/100)");
        last = m.end();
    }

    out.push_str(&input[last..]);
    out
}

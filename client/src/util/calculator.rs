//! Arithmetic expression evaluator for the calculator widget.
//!
//! Grammar (usual precedence, `^` right-associative):
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := power (('*' | '/' | '%') power)*
//! power  := unary ('^' power)?
//! unary  := ('-' | '+') unary | atom
//! atom   := number | '(' expr ')'
//! ```
//!
//! `×` and `÷` are accepted as aliases so keypad labels can be appended to
//! the display verbatim.

#[cfg(test)]
#[path = "calculator_test.rs"]
mod calculator_test;

use std::fmt;

/// Deepest nesting of parentheses, signs, and exponents accepted.
pub const MAX_DEPTH: usize = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalcError {
    Empty,
    UnexpectedChar(char),
    UnexpectedEnd,
    UnbalancedParens,
    DivisionByZero,
    NotFinite,
    TooDeep,
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty expression"),
            Self::UnexpectedChar(c) => write!(f, "unexpected '{c}'"),
            Self::UnexpectedEnd => f.write_str("incomplete expression"),
            Self::UnbalancedParens => f.write_str("unbalanced parentheses"),
            Self::DivisionByZero => f.write_str("division by zero"),
            Self::NotFinite => f.write_str("result out of range"),
            Self::TooDeep => f.write_str("expression nested too deeply"),
        }
    }
}

impl std::error::Error for CalcError {}

/// Evaluate an arithmetic expression.
///
/// # Errors
///
/// Returns a [`CalcError`] for malformed input, division by zero, or a
/// non-finite result.
pub fn evaluate(input: &str) -> Result<f64, CalcError> {
    let tokens: Vec<char> = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            other => other,
        })
        .collect();
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }
    let mut parser = Parser { tokens, pos: 0, depth: 0 };
    let value = parser.expr()?;
    if let Some(&c) = parser.tokens.get(parser.pos) {
        return Err(if c == ')' { CalcError::UnbalancedParens } else { CalcError::UnexpectedChar(c) });
    }
    if value.is_finite() { Ok(value) } else { Err(CalcError::NotFinite) }
}

/// Format a result for the display: integers without a fraction, others
/// rounded to ten decimals with trailing zeros trimmed.
#[must_use]
pub fn format_result(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        return format!("{value:.0}");
    }
    let fixed = format!("{value:.10}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
}

struct Parser {
    tokens: Vec<char>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    /// Run `parse` one nesting level deeper.
    fn nested(&mut self, parse: impl FnOnce(&mut Self) -> Result<f64, CalcError>) -> Result<f64, CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        self.depth += 1;
        let value = parse(self);
        self.depth -= 1;
        value
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = if op == '+' { value + rhs } else { value - rhs };
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.power()?;
        while let Some(op @ ('*' | '/' | '%')) = self.peek() {
            self.pos += 1;
            let rhs = self.power()?;
            value = match op {
                '*' => value * rhs,
                _ if rhs == 0.0 => return Err(CalcError::DivisionByZero),
                '/' => value / rhs,
                _ => value % rhs,
            };
        }
        Ok(value)
    }

    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.unary()?;
        if self.peek() == Some('^') {
            self.pos += 1;
            let exponent = self.nested(Self::power)?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn unary(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Ok(-self.nested(Self::unary)?)
            }
            Some('+') => {
                self.pos += 1;
                self.nested(Self::unary)
            }
            _ => self.atom(),
        }
    }

    fn atom(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some('(') => {
                self.pos += 1;
                let value = self.nested(Self::expr)?;
                match self.bump() {
                    Some(')') => Ok(value),
                    Some(c) => Err(CalcError::UnexpectedChar(c)),
                    None => Err(CalcError::UnbalancedParens),
                }
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(CalcError::UnexpectedChar(c)),
            None => Err(CalcError::UnexpectedEnd),
        }
    }

    fn number(&mut self) -> Result<f64, CalcError> {
        let start = self.pos;
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        let literal: String = self.tokens[start..self.pos].iter().collect();
        literal.parse::<f64>().map_err(|_| CalcError::UnexpectedChar('.'))
    }
}

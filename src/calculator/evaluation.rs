//! Restricted arithmetic evaluation.
//!
//! Expressions are parsed by a recursive-descent parser over a closed
//! grammar: numbers, `+ - * / % **`, parentheses and unary signs. There is
//! no namespace at all, so names and calls can never resolve to anything.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::lexer::{Spanned, Token, tokenize};

/// Why an expression could not be evaluated.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    /// The input was empty or whitespace only.
    #[error("Пустое выражение")]
    Empty,
    /// Parsing or arithmetic failed. The cause is part of the message, not
    /// a `source`, so chained renderings print it once.
    #[error("Ошибка вычисления: {0}")]
    Fault(Fault),
}

impl From<Fault> for EvalError {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

/// The underlying cause of a failed evaluation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Fault {
    #[error("invalid character '{ch}' at position {column}")]
    InvalidCharacter { ch: char, column: usize },
    #[error("invalid number literal '{0}'")]
    InvalidNumber(String),
    #[error("name '{0}' is not defined")]
    UnknownName(String),
    #[error("unexpected '{found}' at position {column}")]
    UnexpectedToken { found: String, column: usize },
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("expression is nested deeper than {0} levels")]
    TooDeep(usize),
    #[error("expression is longer than {0} characters")]
    TooLong(usize),
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("result is not a real number")]
    NotReal,
    #[error("numerical result out of range")]
    OutOfRange,
}

/// Bounds applied before and during parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum nesting of parentheses and unary signs.
    pub max_depth: usize,
    /// Maximum input length in characters.
    pub max_length: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 64,
            max_length: 4096,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

/// Left-associative operator runs are kept flat in `Chain`, so the tree is
/// only as deep as the nesting the parser already bounds.
#[derive(Clone, Debug, PartialEq)]
enum Expr {
    Number(f64),
    Neg(Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Chain(Box<Expr>, Vec<(BinOp, Expr)>),
}

/// Evaluate an expression with the default [`Limits`].
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    evaluate_with(input, &Limits::default())
}

/// Evaluate an expression.
///
/// The whole input is parsed before any arithmetic runs, so a syntax error
/// is reported even when an earlier sub-expression would divide by zero.
pub fn evaluate_with(input: &str, limits: &Limits) -> Result<f64, EvalError> {
    let expression = input.trim();
    if expression.is_empty() {
        return Err(EvalError::Empty);
    }
    if expression.chars().count() > limits.max_length {
        return Err(Fault::TooLong(limits.max_length).into());
    }

    let tokens = tokenize(expression)?;
    let ast = Parser::new(&tokens, limits.max_depth).parse()?;
    let value = eval(&ast)?;

    tracing::trace!(expression, value, "evaluated");
    Ok(value)
}

struct Parser<'a> {
    tokens: &'a [Spanned],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Spanned], max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    fn parse(mut self) -> Result<Expr, Fault> {
        let expr = self.expr()?;
        match self.tokens.get(self.pos) {
            None => Ok(expr),
            Some(extra) => Err(unexpected(extra)),
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    // Every parenthesis and sign passes through `unary`, so this bounds both.
    fn descend(&mut self) -> Result<(), Fault> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Fault::TooDeep(self.max_depth));
        }
        Ok(())
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<Expr, Fault> {
        let first = self.term()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinOp::Add,
                Some(Token::Minus) => BinOp::Sub,
                _ => return Ok(chain(first, rest)),
            };
            self.pos += 1;
            rest.push((op, self.term()?));
        }
    }

    // term := unary (('*' | '/' | '%') unary)*
    fn term(&mut self) -> Result<Expr, Fault> {
        let first = self.unary()?;
        let mut rest = Vec::new();
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinOp::Mul,
                Some(Token::Slash) => BinOp::Div,
                Some(Token::Percent) => BinOp::Rem,
                _ => return Ok(chain(first, rest)),
            };
            self.pos += 1;
            rest.push((op, self.unary()?));
        }
    }

    // unary := ('-' | '+') unary | power
    fn unary(&mut self) -> Result<Expr, Fault> {
        self.descend()?;
        let expr = if self.eat(&Token::Minus) {
            Expr::Neg(Box::new(self.unary()?))
        } else if self.eat(&Token::Plus) {
            self.unary()?
        } else {
            self.power()?
        };
        self.depth -= 1;
        Ok(expr)
    }

    // power := atom ('**' unary)?
    fn power(&mut self) -> Result<Expr, Fault> {
        let base = self.atom()?;
        if self.eat(&Token::Power) {
            let exponent = self.unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    // atom := NUMBER | '(' expr ')'
    fn atom(&mut self) -> Result<Expr, Fault> {
        let Some(spanned) = self.tokens.get(self.pos) else {
            return Err(Fault::UnexpectedEnd);
        };
        self.pos += 1;

        match &spanned.token {
            Token::Number(value) => Ok(Expr::Number(*value)),
            Token::Name(name) => Err(Fault::UnknownName(name.clone())),
            Token::LParen => {
                let inner = self.expr()?;
                match self.tokens.get(self.pos) {
                    Some(Spanned {
                        token: Token::RParen,
                        ..
                    }) => {
                        self.pos += 1;
                        Ok(inner)
                    }
                    Some(other) => Err(unexpected(other)),
                    None => Err(Fault::UnexpectedEnd),
                }
            }
            _ => Err(unexpected(spanned)),
        }
    }
}

fn chain(first: Expr, rest: Vec<(BinOp, Expr)>) -> Expr {
    if rest.is_empty() {
        first
    } else {
        Expr::Chain(Box::new(first), rest)
    }
}

fn unexpected(spanned: &Spanned) -> Fault {
    Fault::UnexpectedToken {
        found: spanned.token.to_string(),
        column: spanned.column,
    }
}

fn eval(expr: &Expr) -> Result<f64, Fault> {
    let value = match expr {
        Expr::Number(value) => *value,
        Expr::Neg(inner) => -eval(inner)?,
        Expr::Pow(base, exponent) => apply(BinOp::Pow, eval(base)?, eval(exponent)?)?,
        Expr::Chain(first, rest) => {
            let mut acc = eval(first)?;
            for (op, operand) in rest {
                acc = finite(apply(*op, acc, eval(operand)?)?)?;
            }
            acc
        }
    };
    finite(value)
}

fn apply(op: BinOp, lhs: f64, rhs: f64) -> Result<f64, Fault> {
    match op {
        BinOp::Add => Ok(lhs + rhs),
        BinOp::Sub => Ok(lhs - rhs),
        BinOp::Mul => Ok(lhs * rhs),
        BinOp::Div if rhs == 0.0 => Err(Fault::DivisionByZero),
        BinOp::Div => Ok(lhs / rhs),
        BinOp::Rem if rhs == 0.0 => Err(Fault::ModuloByZero),
        BinOp::Rem => Ok(floored_rem(lhs, rhs)),
        BinOp::Pow if lhs == 0.0 && rhs < 0.0 => Err(Fault::DivisionByZero),
        BinOp::Pow => Ok(lhs.powf(rhs)),
    }
}

/// Remainder with the sign of the divisor (`-7 % 3 == 2`).
fn floored_rem(lhs: f64, rhs: f64) -> f64 {
    let rem = lhs % rhs;
    if rem != 0.0 && (rem < 0.0) != (rhs < 0.0) {
        rem + rhs
    } else {
        rem
    }
}

fn finite(value: f64) -> Result<f64, Fault> {
    if value.is_nan() {
        Err(Fault::NotReal)
    } else if value.is_infinite() {
        Err(Fault::OutOfRange)
    } else {
        Ok(value)
    }
}

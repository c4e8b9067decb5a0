//! Tokenizer for the arithmetic grammar.
//!
//! Splits an expression into numbers, operators and parentheses. Names are
//! tokenized too, so the parser can reject them with a precise message
//! instead of a generic "invalid character".

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::evaluation::Fault;

lazy_static! {
    /// Decimal literal: `12`, `12.`, `12.5`, `.5`, with an optional exponent.
    static ref NUMBER: Regex = Regex::new(
        r"^(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?"
    ).unwrap();

    /// Anything that looks like an identifier (`sin`, `x1`, `__import__`).
    static ref NAME: Regex = Regex::new(
        r"^[\p{L}_][\p{L}\p{N}_]*"
    ).unwrap();
}

/// A single lexical token.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(f64),
    Name(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `**`
    Power,
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Name(name) => f.write_str(name),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Percent => f.write_str("%"),
            Self::Power => f.write_str("**"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

/// A token together with its 1-based character column in the input.
#[derive(Clone, Debug, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub column: usize,
}

/// Tokenize an expression.
///
/// Whitespace is skipped. Any character outside the grammar (`.` used as
/// attribute access, `,`, `[`, `=`, `;` and so on) fails immediately.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, Fault> {
    let mut tokens = Vec::new();
    let mut offset = 0;
    let mut column = 1;

    while let Some(c) = input[offset..].chars().next() {
        let rest = &input[offset..];

        if c.is_whitespace() {
            offset += c.len_utf8();
            column += 1;
            continue;
        }

        let (token, text) = if let Some(m) = NUMBER.find(rest) {
            let text = m.as_str();
            let value = text
                .parse::<f64>()
                .map_err(|_| Fault::InvalidNumber(text.to_string()))?;
            (Token::Number(value), text)
        } else if let Some(m) = NAME.find(rest) {
            (Token::Name(m.as_str().to_string()), m.as_str())
        } else {
            let token = match c {
                '+' => Token::Plus,
                '-' => Token::Minus,
                '*' if rest.starts_with("**") => Token::Power,
                '*' => Token::Star,
                '/' => Token::Slash,
                '%' => Token::Percent,
                '(' => Token::LParen,
                ')' => Token::RParen,
                _ => return Err(Fault::InvalidCharacter { ch: c, column }),
            };
            let width = if token == Token::Power { 2 } else { c.len_utf8() };
            (token, &rest[..width])
        };

        tokens.push(Spanned { token, column });
        offset += text.len();
        column += text.chars().count();
    }

    Ok(tokens)
}

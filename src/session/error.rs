//! Errors raised while handling a panel or keyboard event.

use thiserror::Error;

use crate::calculator::{EvalError, FormatError};

/// Any failure inside an event handler.
///
/// Handlers never let these escape; they turn into the `Error` marker and a
/// status line built from the message.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CalcError {
    /// The buffer is blank, so there is no operand to evaluate.
    #[error("Пусто")]
    EmptyBuffer,
    #[error(transparent)]
    Evaluation(#[from] EvalError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// An operand outside the domain of a function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Корень из отрицательного числа")]
    NegativeRoot,
}

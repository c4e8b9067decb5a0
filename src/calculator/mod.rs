//! Calculator core: evaluation and formatting.
//!
//! This module provides functionality to:
//! - Tokenize and evaluate restricted arithmetic expressions
//! - Format results for the display
//! - Copy the display text to the clipboard

mod clipboard;
mod evaluation;
mod formatting;
mod lexer;

pub use clipboard::copy_to_clipboard;
pub use evaluation::{EvalError, Fault, Limits, evaluate, evaluate_with};
pub use formatting::{ERROR_MARKER, FormatError, format_or_marker, format_value};

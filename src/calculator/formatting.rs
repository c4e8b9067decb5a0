//! Display formatting for calculation results.

use thiserror::Error;

/// Text shown in the buffer whenever an operation fails.
pub const ERROR_MARKER: &str = "Error";

/// The value cannot be shown as a number.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
#[error("Результат не является конечным числом ({value})")]
pub struct FormatError {
    pub value: f64,
}

/// Format a value for the display.
///
/// Whole numbers render without a fractional part (`4`, not `4.0`), however
/// they were produced. Everything else uses the shortest decimal text that
/// round-trips to the same `f64`.
pub fn format_value(value: f64) -> Result<String, FormatError> {
    if !value.is_finite() {
        return Err(FormatError { value });
    }

    if value.fract() == 0.0 {
        // -0.0 also lands here; show it as plain "0"
        if value == 0.0 {
            return Ok("0".to_string());
        }
        return Ok(format!("{value:.0}"));
    }

    Ok(value.to_string())
}

/// Format a value, falling back to [`ERROR_MARKER`] for non-finite input.
pub fn format_or_marker(value: f64) -> String {
    format_value(value).unwrap_or_else(|_| ERROR_MARKER.to_string())
}

//! The memory register.

use crate::calculator::Fault;

/// A single accumulator that lives as long as the session.
///
/// The value is always finite: updates that would overflow are refused and
/// leave the register untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemoryRegister {
    value: f64,
}

impl MemoryRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Add `operand` and return the new value.
    pub fn add(&mut self, operand: f64) -> Result<f64, Fault> {
        self.store(self.value + operand)
    }

    /// Subtract `operand` and return the new value.
    pub fn subtract(&mut self, operand: f64) -> Result<f64, Fault> {
        self.store(self.value - operand)
    }

    pub fn clear(&mut self) {
        self.value = 0.0;
    }

    fn store(&mut self, value: f64) -> Result<f64, Fault> {
        if value.is_nan() {
            return Err(Fault::NotReal);
        }
        if value.is_infinite() {
            return Err(Fault::OutOfRange);
        }
        self.value = value;
        Ok(value)
    }
}

//! The button panel and the operations behind each button.

use super::error::{CalcError, DomainError};

/// Number of columns in the button grid.
pub const GRID_COLUMNS: usize = 3;

/// A button on the calculator panel, in panel order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Sin,
    Cos,
    Power,
    Sqrt,
    Floor,
    Ceil,
    Memory,
}

/// What pressing a button does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    /// Append an operator token to the buffer.
    Insert(BinaryOperator),
    /// Replace the buffer with a function of its value.
    Apply(UnaryFunction),
    /// Offer the memory operations.
    Memory,
}

impl Button {
    /// All buttons in the order they appear on the panel.
    pub const ALL: [Button; 12] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::Sin,
        Self::Cos,
        Self::Power,
        Self::Sqrt,
        Self::Floor,
        Self::Ceil,
        Self::Memory,
    ];

    /// The text printed on the button.
    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Power => "^",
            Self::Sqrt => "√",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Memory => "M",
        }
    }

    /// Find a button by its label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }

    /// Grid cell as `(row, column)`. Row 0 holds the entry field.
    pub fn grid_position(self) -> (usize, usize) {
        let index = Self::ALL
            .iter()
            .position(|&b| b == self)
            .unwrap_or_default();
        (1 + index / GRID_COLUMNS, index % GRID_COLUMNS)
    }

    pub fn action(self) -> ButtonAction {
        match self {
            Self::Add => ButtonAction::Insert(BinaryOperator::Add),
            Self::Subtract => ButtonAction::Insert(BinaryOperator::Subtract),
            Self::Multiply => ButtonAction::Insert(BinaryOperator::Multiply),
            Self::Divide => ButtonAction::Insert(BinaryOperator::Divide),
            Self::Modulo => ButtonAction::Insert(BinaryOperator::Modulo),
            Self::Power => ButtonAction::Insert(BinaryOperator::Power),
            Self::Sin => ButtonAction::Apply(UnaryFunction::Sin),
            Self::Cos => ButtonAction::Apply(UnaryFunction::Cos),
            Self::Sqrt => ButtonAction::Apply(UnaryFunction::Sqrt),
            Self::Floor => ButtonAction::Apply(UnaryFunction::Floor),
            Self::Ceil => ButtonAction::Apply(UnaryFunction::Ceil),
            Self::Memory => ButtonAction::Memory,
        }
    }
}

/// An operator that is appended to the buffer as text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOperator {
    /// The literal token inserted into the buffer.
    pub fn token(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "**",
        }
    }

    pub fn status(self) -> String {
        match self {
            Self::Modulo => "Вставлен '%' (остаток)".to_string(),
            Self::Power => "Вставлен '**' (степень)".to_string(),
            _ => format!("Вставлен '{}'", self.token()),
        }
    }
}

/// A function applied to the value of the whole buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryFunction {
    Sin,
    Cos,
    Sqrt,
    Floor,
    Ceil,
}

impl UnaryFunction {
    /// Name used as the prefix of status messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Sqrt => "√",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
        }
    }

    /// Apply the function. Trigonometry works in radians.
    pub fn apply(self, value: f64) -> Result<f64, CalcError> {
        match self {
            Self::Sin => Ok(value.sin()),
            Self::Cos => Ok(value.cos()),
            Self::Sqrt if value < 0.0 => Err(DomainError::NegativeRoot.into()),
            Self::Sqrt => Ok(value.sqrt()),
            Self::Floor => Ok(value.floor()),
            Self::Ceil => Ok(value.ceil()),
        }
    }

    pub fn success_status(self) -> String {
        match self {
            Self::Floor | Self::Ceil => format!("{} выполнен", self.name()),
            Self::Sin | Self::Cos | Self::Sqrt => format!("{} вычислен", self.name()),
        }
    }
}

/// One of the operations offered behind the `M` button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemoryAction {
    Add,
    Subtract,
    Recall,
    Clear,
}

impl MemoryAction {
    pub const ALL: [MemoryAction; 4] = [Self::Add, Self::Subtract, Self::Recall, Self::Clear];

    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "M+",
            Self::Subtract => "M-",
            Self::Recall => "MR",
            Self::Clear => "MC",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.label().eq_ignore_ascii_case(label))
    }
}

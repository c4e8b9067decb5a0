//! Calculator session: the button panel, the memory register and the
//! display controller that ties them to the buffer.

mod buttons;
mod controller;
mod error;
mod memory;

pub use buttons::{
    BinaryOperator, Button, ButtonAction, GRID_COLUMNS, MemoryAction, UnaryFunction,
};
pub use controller::{EMPTY_STATUS, Event, Outcome, READY_STATUS, Session, Snapshot};
pub use error::{CalcError, DomainError};
pub use memory::MemoryRegister;

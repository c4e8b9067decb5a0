//! Desk calculator core.
//!
//! [`calculator`] evaluates restricted arithmetic text and formats results;
//! [`session`] holds the buffer, status line and memory register and maps
//! panel and keyboard events onto them. [`console`] is a small line-based
//! front end over a session.

pub mod calculator;
pub mod cli;
pub mod config;
pub mod console;
pub mod session;

pub use calculator::{EvalError, FormatError, evaluate, format_value};
pub use config::Config;
pub use session::{Button, CalcError, Event, MemoryAction, Outcome, Session};

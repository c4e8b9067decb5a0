//! Line-oriented console front end.
//!
//! Stands in for a windowed panel: every input line is either an
//! expression (typed into the buffer and submitted with Enter) or a
//! `:command` that presses a button or edits the buffer.

use std::io::{BufRead, Write};

use anyhow::Result;
use thiserror::Error;

use crate::calculator::{
    Limits, copy_to_clipboard, evaluate_with, format_or_marker, format_value,
};
use crate::config::Config;
use crate::session::{Button, Event, GRID_COLUMNS, MemoryAction, Outcome, Session};

/// A parsed console input line.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Type the text, then press Enter.
    Enter(String),
    /// Type the text without submitting.
    Type(String),
    Press(Button),
    Memory(MemoryAction),
    Backspace,
    Clear,
    Copy,
    Buttons,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command ':{0}' (try :help)")]
    Unknown(String),
}

const HELP: &str = "\
<expr>        type the expression and press Enter
:<button>     press a panel button (:+ :sin :^ :√ :floor :M ...)
:sqrt         same as :√
:M+ :M- :MR :MC
              memory operations
:type <text>  append text without evaluating
:back         delete the last character
:clear        empty the buffer
:copy         copy the buffer to the clipboard
:buttons      show the button panel
:quit         exit";

/// Parse one line of console input.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim_end_matches(['\r', '\n']);

    let Some(command) = line.strip_prefix(':') else {
        return Ok(Command::Enter(line.to_string()));
    };

    if let Some(text) = command.strip_prefix("type ") {
        return Ok(Command::Type(text.to_string()));
    }

    let command = command.trim();
    let parsed = match command {
        "back" => Command::Backspace,
        "clear" => Command::Clear,
        "copy" => Command::Copy,
        "buttons" => Command::Buttons,
        "help" => Command::Help,
        "quit" | "q" => Command::Quit,
        "sqrt" => Command::Press(Button::Sqrt),
        other => {
            if let Some(button) = Button::from_label(other) {
                Command::Press(button)
            } else if let Some(action) = MemoryAction::from_label(other) {
                Command::Memory(action)
            } else {
                return Err(CommandError::Unknown(other.to_string()));
            }
        }
    };
    Ok(parsed)
}

/// Render the button panel as a text grid.
pub fn render_buttons() -> String {
    Button::ALL
        .chunks(GRID_COLUMNS)
        .map(|row| {
            row.iter()
                .map(|b| format!("[{:^7}]", b.label()))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Evaluate a single expression and return the display text.
pub fn eval_once(expression: &str, limits: &Limits) -> Result<String> {
    let value = evaluate_with(expression, limits)?;
    Ok(format_value(value)?)
}

/// Interactive console session.
pub struct Console {
    session: Session,
    show_memory: bool,
}

impl Console {
    pub fn new(config: &Config) -> Self {
        Self {
            session: Session::with_limits(config.evaluator),
            show_memory: config.display.show_memory,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read commands until end of input or `:quit`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "{}", self.render())?;

        for line in input.lines() {
            let line = line?;
            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(output, "{err}")?;
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }
            if let Some(text) = self.execute(command) {
                writeln!(output, "{text}")?;
            }
            writeln!(output, "{}", self.render())?;
        }

        output.flush()?;
        Ok(())
    }

    /// Apply a command to the session. Returns extra text to print, if any.
    pub fn execute(&mut self, command: Command) -> Option<String> {
        let event = match command {
            Command::Enter(text) => {
                self.session.dispatch(Event::Type(text));
                Event::Submit
            }
            Command::Type(text) => Event::Type(text),
            Command::Press(button) => Event::Press(button),
            Command::Memory(action) => Event::Memory(action),
            Command::Backspace => Event::Backspace,
            Command::Clear => Event::Clear,
            Command::Copy => {
                return Some(match copy_to_clipboard(self.session.buffer()) {
                    Ok(()) => "Copied".to_string(),
                    Err(err) => {
                        tracing::warn!(error = %err, "clipboard copy failed");
                        format!("{err:#}")
                    }
                });
            }
            Command::Buttons => return Some(render_buttons()),
            Command::Help => return Some(HELP.to_string()),
            Command::Quit => return None,
        };

        match self.session.dispatch(event) {
            Outcome::Consumed => None,
            Outcome::ShowMemoryMenu => Some(
                MemoryAction::ALL
                    .iter()
                    .map(|a| format!(":{}", a.label()))
                    .collect::<Vec<_>>()
                    .join("  "),
            ),
        }
    }

    /// One line showing the buffer, the status and optionally the memory.
    pub fn render(&self) -> String {
        let mut line = format!("[{}]  {}", self.session.buffer(), self.session.status());
        if self.show_memory {
            line.push_str(&format!("  (M = {})", format_or_marker(self.session.memory())));
        }
        line
    }
}

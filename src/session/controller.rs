//! Display controller.
//!
//! Owns the expression buffer, the status line and the memory register, and
//! decides how every panel or keyboard event changes them. Binary operators
//! append text; functions, submission and memory recall replace the buffer
//! with a formatted result (or the `Error` marker).

use crate::calculator::{ERROR_MARKER, Limits, evaluate_with, format_or_marker, format_value};

use super::buttons::{BinaryOperator, Button, ButtonAction, MemoryAction, UnaryFunction};
use super::error::CalcError;
use super::memory::MemoryRegister;

/// Status shown before the first event.
pub const READY_STATUS: &str = "Готово";
/// Status shown when Enter is pressed on an empty buffer.
pub const EMPTY_STATUS: &str = "Пусто";

/// An input event delivered by the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A panel button was pressed.
    Press(Button),
    /// An entry of the memory menu was chosen.
    Memory(MemoryAction),
    /// Text was typed at the end of the entry field.
    Type(String),
    /// The last character was deleted.
    Backspace,
    /// The entry field was emptied.
    Clear,
    /// Enter or keypad Enter.
    Submit,
}

/// What the presentation layer should do after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Fully handled. Key events must not propagate further.
    Consumed,
    /// The `M` button was pressed; offer [`MemoryAction::ALL`].
    ShowMemoryMenu,
}

/// The observable state after an event.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub buffer: String,
    pub status: String,
    pub memory: f64,
}

/// One calculator session.
#[derive(Clone, Debug)]
pub struct Session {
    buffer: String,
    status: String,
    memory: MemoryRegister,
    limits: Limits,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_limits(Limits::default())
    }

    pub fn with_limits(limits: Limits) -> Self {
        Self {
            buffer: String::new(),
            status: READY_STATUS.to_string(),
            memory: MemoryRegister::new(),
            limits,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn memory(&self) -> f64 {
        self.memory.value()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            buffer: self.buffer.clone(),
            status: self.status.clone(),
            memory: self.memory.value(),
        }
    }

    /// Handle a single event to completion.
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        tracing::debug!(?event, buffer = %self.buffer, "dispatch");

        match event {
            Event::Press(button) => return self.press(button),
            Event::Memory(action) => self.memory_action(action),
            Event::Type(text) => self.type_text(&text),
            Event::Backspace => self.backspace(),
            Event::Clear => self.clear(),
            Event::Submit => self.submit(),
        }
        Outcome::Consumed
    }

    /// Press a panel button.
    pub fn press(&mut self, button: Button) -> Outcome {
        match button.action() {
            ButtonAction::Insert(op) => self.insert_operator(op),
            ButtonAction::Apply(function) => self.apply_function(function),
            ButtonAction::Memory => return Outcome::ShowMemoryMenu,
        }
        Outcome::Consumed
    }

    pub fn memory_action(&mut self, action: MemoryAction) {
        match action {
            MemoryAction::Add => self.memory_add(),
            MemoryAction::Subtract => self.memory_subtract(),
            MemoryAction::Recall => self.memory_recall(),
            MemoryAction::Clear => self.memory_clear(),
        }
    }

    /// Append an operator token. The buffer is not validated.
    pub fn insert_operator(&mut self, op: BinaryOperator) {
        self.buffer.push_str(op.token());
        self.status = op.status();
    }

    /// Replace the buffer with `function` applied to its value.
    pub fn apply_function(&mut self, function: UnaryFunction) {
        let result = self
            .operand()
            .and_then(|value| function.apply(value))
            .and_then(|value| format_value(value).map_err(CalcError::from));

        match result {
            Ok(text) => {
                self.buffer = text;
                self.status = function.success_status();
            }
            Err(err) => self.fail(function.name(), &err),
        }
    }

    /// Evaluate the buffer (Enter). An empty buffer is left alone.
    pub fn submit(&mut self) {
        if self.buffer.trim().is_empty() {
            self.status = EMPTY_STATUS.to_string();
            return;
        }

        let result = self
            .operand()
            .and_then(|value| format_value(value).map_err(CalcError::from));

        match result {
            Ok(text) => {
                self.buffer = text;
                self.status = "Вычислено".to_string();
            }
            Err(err) => {
                tracing::warn!(error = %err, "submit failed");
                self.buffer = ERROR_MARKER.to_string();
                self.status = err.to_string();
            }
        }
    }

    pub fn memory_add(&mut self) {
        self.update_memory(MemoryAction::Add);
    }

    pub fn memory_subtract(&mut self) {
        self.update_memory(MemoryAction::Subtract);
    }

    /// Replace the buffer with the register value.
    pub fn memory_recall(&mut self) {
        self.buffer = format_or_marker(self.memory.value());
        self.status = "MR: значение вставлено".to_string();
    }

    pub fn memory_clear(&mut self) {
        self.memory.clear();
        self.status = "MC: память очищена".to_string();
    }

    pub fn type_text(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.status = "Очищено".to_string();
    }

    fn update_memory(&mut self, action: MemoryAction) {
        let prefix = action.label();
        let result = self.operand().and_then(|operand| {
            let stored = match action {
                MemoryAction::Subtract => self.memory.subtract(operand),
                _ => self.memory.add(operand),
            };
            stored.map_err(|fault| CalcError::Evaluation(fault.into()))
        });

        match result {
            Ok(value) => {
                self.status = format!("{prefix} : {}", format_or_marker(value));
            }
            Err(err) => {
                tracing::warn!(error = %err, action = prefix, "memory update failed");
                self.status = format!("{prefix}: {err}");
            }
        }
    }

    fn operand(&self) -> Result<f64, CalcError> {
        if self.buffer.trim().is_empty() {
            return Err(CalcError::EmptyBuffer);
        }
        evaluate_with(&self.buffer, &self.limits).map_err(CalcError::from)
    }

    fn fail(&mut self, operation: &str, err: &CalcError) {
        tracing::warn!(error = %err, operation, "operation failed");
        self.buffer = ERROR_MARKER.to_string();
        self.status = format!("{operation}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(buffer: &str) -> Session {
        let mut session = Session::new();
        session.type_text(buffer);
        session
    }

    #[test]
    fn test_initial_state() {
        let session = Session::new();
        assert_eq!(
            session.snapshot(),
            Snapshot {
                buffer: String::new(),
                status: "Готово".to_string(),
                memory: 0.0,
            }
        );
    }

    #[test]
    fn test_operator_buttons_append_tokens() {
        let cases = [
            (Button::Add, "+", "Вставлен '+'"),
            (Button::Subtract, "-", "Вставлен '-'"),
            (Button::Multiply, "*", "Вставлен '*'"),
            (Button::Divide, "/", "Вставлен '/'"),
            (Button::Modulo, "%", "Вставлен '%' (остаток)"),
            (Button::Power, "**", "Вставлен '**' (степень)"),
        ];

        for (button, token, status) in cases {
            let mut session = Session::new();
            assert_eq!(session.press(button), Outcome::Consumed);
            assert_eq!(session.buffer(), token);
            assert_eq!(session.status(), status);

            let mut session = session_with("12 (");
            session.press(button);
            assert_eq!(session.buffer(), format!("12 ({token}"));
        }
    }

    #[test]
    fn test_operator_after_error_marker_is_plain_concatenation() {
        let mut session = session_with("Error");
        session.press(Button::Add);
        assert_eq!(session.buffer(), "Error+");
    }

    #[test]
    fn test_submit_formats_result() {
        let mut session = session_with("2+2");
        assert_eq!(session.dispatch(Event::Submit), Outcome::Consumed);
        assert_eq!(session.buffer(), "4");
        assert_eq!(session.status(), "Вычислено");

        let mut session = session_with("5/2");
        session.submit();
        assert_eq!(session.buffer(), "2.5");

        let mut session = session_with("10/2");
        session.submit();
        assert_eq!(session.buffer(), "5");
    }

    #[test]
    fn test_submit_empty_buffer() {
        let mut session = Session::new();
        assert_eq!(session.dispatch(Event::Submit), Outcome::Consumed);
        assert_eq!(session.buffer(), "");
        assert_eq!(session.status(), "Пусто");

        let mut session = session_with("   ");
        session.submit();
        assert_eq!(session.buffer(), "   ");
        assert_eq!(session.status(), "Пусто");
    }

    #[test]
    fn test_submit_error() {
        let mut session = session_with("1/0");
        session.submit();
        assert_eq!(session.buffer(), "Error");
        assert_eq!(session.status(), "Ошибка вычисления: division by zero");

        let mut session = session_with("abc");
        session.submit();
        assert_eq!(session.buffer(), "Error");
        assert!(session.status().contains("name 'abc' is not defined"));
    }

    #[test]
    fn test_result_can_be_edited_further() {
        let mut session = session_with("2*3");
        session.submit();
        session.press(Button::Add);
        session.type_text("1");
        session.submit();
        assert_eq!(session.buffer(), "7");
    }

    #[test]
    fn test_sin_success_and_error_paths() {
        let mut session = session_with("0");
        session.press(Button::Sin);
        assert_eq!(session.buffer(), "0");
        assert_eq!(session.status(), "sin вычислен");

        let mut session = session_with("abc");
        session.press(Button::Sin);
        assert_eq!(session.buffer(), "Error");
        assert!(session.status().starts_with("sin:"));
    }

    #[test]
    fn test_cos_of_zero_is_one() {
        let mut session = session_with("0");
        session.press(Button::Cos);
        assert_eq!(session.buffer(), "1");
        assert_eq!(session.status(), "cos вычислен");
    }

    #[test]
    fn test_sqrt() {
        let mut session = session_with("9");
        session.press(Button::Sqrt);
        assert_eq!(session.buffer(), "3");
        assert_eq!(session.status(), "√ вычислен");

        let mut session = session_with("2");
        session.press(Button::Sqrt);
        assert_eq!(session.buffer(), "1.4142135623730951");

        let mut session = session_with("-1");
        session.press(Button::Sqrt);
        assert_eq!(session.buffer(), "Error");
        assert_eq!(session.status(), "√: Корень из отрицательного числа");
    }

    #[test]
    fn test_floor_and_ceil() {
        let mut session = session_with("3.7");
        session.press(Button::Floor);
        assert_eq!(session.buffer(), "3");
        assert_eq!(session.status(), "floor выполнен");

        let mut session = session_with("2.1");
        session.press(Button::Ceil);
        assert_eq!(session.buffer(), "3");
        assert_eq!(session.status(), "ceil выполнен");

        let mut session = session_with("-2.5");
        session.press(Button::Floor);
        assert_eq!(session.buffer(), "-3");
    }

    #[test]
    fn test_function_evaluates_whole_expression() {
        let mut session = session_with("10 - 3.5");
        session.press(Button::Floor);
        assert_eq!(session.buffer(), "6");
    }

    #[test]
    fn test_function_on_empty_buffer() {
        let mut session = Session::new();
        session.press(Button::Ceil);
        assert_eq!(session.buffer(), "Error");
        assert_eq!(session.status(), "ceil: Пусто");

        let mut session = session_with("  ");
        session.press(Button::Sqrt);
        assert_eq!(session.buffer(), "Error");
        assert_eq!(session.status(), "√: Пусто");
    }

    #[test]
    fn test_memory_button_opens_menu() {
        let mut session = session_with("5");
        assert_eq!(
            session.dispatch(Event::Press(Button::Memory)),
            Outcome::ShowMemoryMenu
        );
        assert_eq!(session.buffer(), "5");
        assert_eq!(session.memory(), 0.0);
    }

    #[test]
    fn test_memory_add_and_recall() {
        let mut session = session_with("5");
        session.memory_add();
        assert_eq!(session.memory(), 5.0);
        assert_eq!(session.status(), "M+ : 5");

        session.clear();
        session.memory_recall();
        assert_eq!(session.buffer(), "5");
        assert_eq!(session.status(), "MR: значение вставлено");

        session.clear();
        session.type_text("2.75");
        session.memory_add();
        session.memory_recall();
        assert_eq!(session.buffer(), "7.75");

        session.memory_clear();
        assert_eq!(session.memory(), 0.0);
        assert_eq!(session.status(), "MC: память очищена");
    }

    #[test]
    fn test_memory_subtract() {
        let mut session = session_with("4");
        session.dispatch(Event::Memory(MemoryAction::Subtract));
        assert_eq!(session.memory(), -4.0);
        assert_eq!(session.status(), "M- : -4");
    }

    #[test]
    fn test_memory_failure_keeps_register() {
        let mut session = session_with("3");
        session.memory_add();

        session.clear();
        session.type_text("3 +");
        session.memory_add();
        assert_eq!(session.memory(), 3.0);
        assert_eq!(
            session.status(),
            "M+: Ошибка вычисления: unexpected end of expression"
        );
        // the buffer is not replaced by memory failures
        assert_eq!(session.buffer(), "3 +");
    }

    #[test]
    fn test_memory_subtract_failure_keeps_register() {
        let mut session = session_with("10");
        session.memory_add();

        session.clear();
        session.type_text("2/0");
        session.memory_subtract();
        assert_eq!(session.memory(), 10.0);
        assert_eq!(session.status(), "M-: Ошибка вычисления: division by zero");
        assert_eq!(session.buffer(), "2/0");
    }

    #[test]
    fn test_memory_on_empty_buffer() {
        let mut session = Session::new();
        session.memory_add();
        assert_eq!(session.memory(), 0.0);
        assert_eq!(session.status(), "M+: Пусто");
        assert_eq!(session.buffer(), "");
    }

    #[test]
    fn test_memory_recall_is_idempotent() {
        let mut session = session_with("1/3");
        session.memory_add();
        session.memory_recall();
        let first = session.buffer().to_string();
        session.memory_recall();
        assert_eq!(session.buffer(), first);
        assert_eq!(first, "0.3333333333333333");
    }

    #[test]
    fn test_editing_events() {
        let mut session = Session::new();
        session.dispatch(Event::Type("12".to_string()));
        session.dispatch(Event::Type("3".to_string()));
        session.dispatch(Event::Backspace);
        assert_eq!(session.buffer(), "12");

        session.dispatch(Event::Clear);
        assert_eq!(session.buffer(), "");
        assert_eq!(session.status(), "Очищено");

        // backspace on empty buffer is a no-op
        session.dispatch(Event::Backspace);
        assert_eq!(session.buffer(), "");
    }

    #[test]
    fn test_limits_are_applied() {
        let mut session = Session::with_limits(Limits {
            max_depth: 2,
            max_length: 100,
        });
        session.type_text("((1))");
        session.submit();
        assert_eq!(session.buffer(), "Error");
        assert!(session.status().contains("nested deeper than 2"));
    }
}

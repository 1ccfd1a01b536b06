//! Calculator input state machine
//!
//! The engine owns everything the user can change: the display text, the
//! pending binary operation and its left operand, and a memo of the last
//! completed operation so that pressing `=` again repeats it.
//!
//! Each key method returns `true` when the display text or the
//! awaiting-second-operand flag changed, which is the host's cue to redraw.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::format::{format_number, is_valid_display, parse_display, ERROR_MARKER, MAX_DISPLAY_LEN};
use crate::operator::Operator;

/// A single user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(char),
    DecimalPoint,
    Operator(Operator),
    Equals,
    Root,
    Sign,
    Clear,
}

/// The fields a host persists between runs.
///
/// The repeat-equals memo is deliberately absent: it does not survive a
/// restart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub display: String,
    pub first_operand: Option<f64>,
    pub pending_operation: Option<Operator>,
    pub awaiting_second_operand: bool,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            first_operand: None,
            pending_operation: None,
            awaiting_second_operand: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalculatorEngine {
    display: String,
    first_operand: Option<f64>,
    pending_operation: Option<Operator>,
    awaiting_second_operand: bool,
    last_operation: Option<Operator>,
    last_second_operand: Option<f64>,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorEngine {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            first_operand: None,
            pending_operation: None,
            awaiting_second_operand: false,
            last_operation: None,
            last_second_operand: None,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn is_error(&self) -> bool {
        self.display == ERROR_MARKER
    }

    pub fn first_operand(&self) -> Option<f64> {
        self.first_operand
    }

    pub fn pending_operation(&self) -> Option<Operator> {
        self.pending_operation
    }

    pub fn is_awaiting_second_operand(&self) -> bool {
        self.awaiting_second_operand
    }

    /// Operation and right operand that `=` would repeat.
    pub fn last_operation(&self) -> Option<(Operator, f64)> {
        self.last_operation.zip(self.last_second_operand)
    }

    /// Snapshot of the persisted fields.
    pub fn state(&self) -> EngineState {
        EngineState {
            display: self.display.clone(),
            first_operand: self.first_operand,
            pending_operation: self.pending_operation,
            awaiting_second_operand: self.awaiting_second_operand,
        }
    }

    /// Install previously persisted fields. Meant to run once, before any key
    /// is delivered. A display that is not a number or the error marker is
    /// replaced by `"0"`.
    pub fn restore(&mut self, state: EngineState) {
        self.display = if is_valid_display(&state.display) {
            state.display
        } else {
            warn!(display = %state.display, "discarding unreadable display");
            "0".to_string()
        };
        self.first_operand = state.first_operand.filter(|v| v.is_finite());
        self.pending_operation = state.pending_operation;
        self.awaiting_second_operand = state.awaiting_second_operand;
        self.forget_last_operation();
    }

    /// Dispatch a key to its handler.
    pub fn press(&mut self, key: Key) -> bool {
        let changed = match key {
            Key::Digit(d) => self.digit_pressed(d),
            Key::DecimalPoint => self.decimal_point_pressed(),
            Key::Operator(op) => self.operator_pressed(op),
            Key::Equals => self.equals_pressed(),
            Key::Root => self.root_pressed(),
            Key::Sign => self.sign_pressed(),
            Key::Clear => self.clear_pressed(),
        };
        debug!(?key, display = %self.display, changed, "key pressed");
        changed
    }

    pub fn digit_pressed(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() {
            return false;
        }
        self.track(|e| {
            if e.is_idle() {
                e.forget_last_operation();
            }
            if e.awaiting_second_operand {
                e.display = digit.to_string();
                e.awaiting_second_operand = false;
            } else if e.display == "0" || e.is_error() {
                e.display = digit.to_string();
            } else if e.display.len() < MAX_DISPLAY_LEN {
                let candidate = format!("{}{}", e.display, digit);
                // an exponent can grow past the f64 range
                if parse_display(&candidate).is_some() {
                    e.display = candidate;
                }
            }
        })
    }

    pub fn decimal_point_pressed(&mut self) -> bool {
        self.track(|e| {
            if e.is_idle() {
                e.forget_last_operation();
            }
            if e.awaiting_second_operand {
                e.display = "0.".to_string();
                e.awaiting_second_operand = false;
            } else if e.is_error() {
                e.display = "0.".to_string();
            } else if !e.display.contains(['.', 'E']) && e.display.len() < MAX_DISPLAY_LEN {
                e.display.push('.');
            }
        })
    }

    pub fn operator_pressed(&mut self, op: Operator) -> bool {
        self.track(|e| {
            e.forget_last_operation();
            let Some(value) = parse_display(&e.display) else {
                if e.is_error() {
                    e.reset();
                }
                return;
            };

            match (e.first_operand, e.pending_operation) {
                (None, _) => e.first_operand = Some(value),
                (Some(first), Some(pending)) if !e.awaiting_second_operand => {
                    let result = pending.apply(first, value);
                    let formatted = format_number(result);
                    if formatted == ERROR_MARKER {
                        debug!(%pending, first, value, "chained operation failed");
                        e.reset();
                        return;
                    }
                    e.display = formatted;
                    e.first_operand = Some(result);
                }
                // operator pressed twice in a row: only the operator changes
                _ => {}
            }
            e.pending_operation = Some(op);
            e.awaiting_second_operand = true;
        })
    }

    pub fn equals_pressed(&mut self) -> bool {
        self.track(|e| {
            let Some(value) = parse_display(&e.display) else {
                if e.is_error() {
                    e.reset();
                }
                return;
            };

            match (e.first_operand, e.pending_operation) {
                (None, None) => {
                    if let Some((op, right)) = e.last_operation() {
                        e.display = format_number(op.apply(value, right));
                    }
                }
                (Some(first), Some(pending)) if !e.awaiting_second_operand => {
                    e.display = format_number(pending.apply(first, value));
                    e.last_operation = Some(pending);
                    e.last_second_operand = Some(value);
                    e.first_operand = None;
                    e.pending_operation = None;
                    e.awaiting_second_operand = false;
                }
                _ => {}
            }
        })
    }

    pub fn root_pressed(&mut self) -> bool {
        self.track(|e| {
            e.forget_last_operation();
            if e.awaiting_second_operand {
                return;
            }
            let Some(value) = parse_display(&e.display) else {
                return;
            };
            let result = if value >= 0.0 { value.sqrt() } else { f64::NAN };
            e.display = format_number(result);
            e.first_operand = None;
            e.pending_operation = None;
            e.awaiting_second_operand = false;
        })
    }

    pub fn sign_pressed(&mut self) -> bool {
        self.track(|e| {
            e.forget_last_operation();
            if e.awaiting_second_operand || e.is_error() {
                return;
            }
            match parse_display(&e.display) {
                Some(value) if value != 0.0 => e.display = format_number(-value),
                _ => {}
            }
        })
    }

    pub fn clear_pressed(&mut self) -> bool {
        self.track(Self::reset)
    }

    fn reset(&mut self) {
        *self = Self::new();
    }

    fn is_idle(&self) -> bool {
        self.first_operand.is_none() && self.pending_operation.is_none()
    }

    fn forget_last_operation(&mut self) {
        self.last_operation = None;
        self.last_second_operand = None;
    }

    /// Run `f` and report whether the display or the awaiting flag changed.
    fn track(&mut self, f: impl FnOnce(&mut Self)) -> bool {
        let before = (self.display.clone(), self.awaiting_second_operand);
        f(self);
        self.display != before.0 || self.awaiting_second_operand != before.1
    }
}

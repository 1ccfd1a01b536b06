//! calccore — state machine, formatting and persistence for the calculator
//!
//! The engine is pure: hosts feed it one key at a time, read the display
//! back, and use [`persist::Persistence`] to carry state across restarts.

pub mod engine;
pub mod format;
pub mod operator;
pub mod persist;
pub mod storage;
pub mod theme;

pub use engine::{CalculatorEngine, EngineState, Key};
pub use format::{format_number, ERROR_MARKER, MAX_DISPLAY_LEN};
pub use operator::Operator;
pub use persist::Persistence;
pub use theme::ThemeName;

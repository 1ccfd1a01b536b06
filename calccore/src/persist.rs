//! Mapping between engine state and the preference store
//!
//! Hosts restore once when the process starts and save whenever the app goes
//! to the background or exits. The repeat-equals memo is not written, so it
//! resets across restarts.

use tracing::{info, warn};

use crate::engine::{CalculatorEngine, EngineState};
use crate::operator::Operator;
use crate::storage::{KeyValueStore, Result};
use crate::theme::ThemeName;

pub const KEY_CURRENT_INPUT: &str = "currentInput";
pub const KEY_FIRST_OPERAND: &str = "firstOperand";
pub const KEY_PENDING_OPERATION: &str = "pendingOperation";
pub const KEY_WAITING_FOR_SECOND: &str = "waitingForSecondOperand";
pub const KEY_CURRENT_THEME: &str = "currentTheme";

/// File name used by hosts that keep preferences in a [`crate::storage::JsonFileStore`].
pub const PREFS_FILE: &str = "prefs.json";

/// Owns the store and remembers whether this session already restored.
#[derive(Debug)]
pub struct Persistence<S> {
    store: S,
    restored: bool,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            restored: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// Read the persisted engine fields, dropping values that do not parse.
    pub fn read_state(&self) -> EngineState {
        let display = self
            .store
            .get_string(KEY_CURRENT_INPUT)
            .unwrap_or_else(|| "0".to_string());

        let first_operand = self.store.get_string(KEY_FIRST_OPERAND).and_then(|s| {
            let parsed = s.parse::<f64>().ok().filter(|v| v.is_finite());
            if parsed.is_none() {
                warn!(value = %s, "ignoring stored first operand");
            }
            parsed
        });

        let pending_operation = self.store.get_string(KEY_PENDING_OPERATION).and_then(|s| {
            let op = Operator::from_symbol(&s);
            if op.is_none() {
                warn!(value = %s, "ignoring stored operation");
            }
            op
        });

        EngineState {
            display,
            first_operand,
            pending_operation,
            awaiting_second_operand: self.store.get_bool(KEY_WAITING_FOR_SECOND).unwrap_or(false),
        }
    }

    /// Restore the engine from the store, at most once per session.
    /// Returns `true` if this call did the restore.
    pub fn restore_once(&mut self, engine: &mut CalculatorEngine) -> bool {
        if self.restored {
            return false;
        }
        let state = self.read_state();
        info!(display = %state.display, pending = ?state.pending_operation, "restoring calculator state");
        engine.restore(state);
        self.restored = true;
        true
    }

    /// Write the engine's persisted fields and flush the store.
    pub fn save(&mut self, engine: &CalculatorEngine) -> Result<()> {
        let state = engine.state();
        let first_operand = state.first_operand.map(|v| v.to_string());
        self.store.put_string(KEY_CURRENT_INPUT, Some(&state.display));
        self.store.put_string(KEY_FIRST_OPERAND, first_operand.as_deref());
        self.store
            .put_string(KEY_PENDING_OPERATION, state.pending_operation.map(Operator::symbol));
        self.store
            .put_bool(KEY_WAITING_FOR_SECOND, state.awaiting_second_operand);
        self.store.flush()?;
        info!(display = %state.display, "saved calculator state");
        Ok(())
    }

    pub fn load_theme(&self) -> ThemeName {
        self.store
            .get_string(KEY_CURRENT_THEME)
            .map(|name| ThemeName::from_name(&name))
            .unwrap_or_default()
    }

    pub fn save_theme(&mut self, theme: ThemeName) -> Result<()> {
        self.store.put_string(KEY_CURRENT_THEME, Some(theme.name()));
        self.store.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Key;
    use crate::storage::{JsonFileStore, MemoryStore};

    #[test]
    fn test_empty_store_restores_initial_state() {
        let mut persistence = Persistence::new(MemoryStore::new());
        let mut engine = CalculatorEngine::new();
        assert!(persistence.restore_once(&mut engine));
        assert_eq!(engine.state(), EngineState::default());
    }

    #[test]
    fn test_save_then_restore() {
        let mut engine = CalculatorEngine::new();
        for key in [Key::Digit('7'), Key::Operator(Operator::Divide), Key::Digit('2')] {
            engine.press(key);
        }

        let mut persistence = Persistence::new(MemoryStore::new());
        persistence.save(&engine).unwrap();
        assert_eq!(persistence.store().get_string(KEY_PENDING_OPERATION).as_deref(), Some("÷"));
        assert_eq!(persistence.store().get_string(KEY_FIRST_OPERAND).as_deref(), Some("7"));

        let mut restored = CalculatorEngine::new();
        let mut next_session = Persistence::new(persistence.store().clone());
        next_session.restore_once(&mut restored);
        assert_eq!(restored.state(), engine.state());
        restored.equals_pressed();
        assert_eq!(restored.display(), "3.5");
    }

    #[test]
    fn test_absent_operand_removes_key() {
        let mut store = MemoryStore::new();
        store.put_string(KEY_FIRST_OPERAND, Some("5"));
        let mut persistence = Persistence::new(store);
        persistence.save(&CalculatorEngine::new()).unwrap();
        assert!(!persistence.store().contains_key(KEY_FIRST_OPERAND));
        assert!(!persistence.store().contains_key(KEY_PENDING_OPERATION));
        assert_eq!(persistence.store().get_bool(KEY_WAITING_FOR_SECOND), Some(false));
    }

    #[test]
    fn test_restore_only_once() {
        let mut store = MemoryStore::new();
        store.put_string(KEY_CURRENT_INPUT, Some("12"));
        let mut persistence = Persistence::new(store);

        let mut engine = CalculatorEngine::new();
        assert!(persistence.restore_once(&mut engine));
        engine.press(Key::Digit('3'));
        assert!(!persistence.restore_once(&mut engine));
        assert_eq!(engine.display(), "123");
        assert!(persistence.is_restored());
    }

    #[test]
    fn test_memo_not_persisted() {
        let mut engine = CalculatorEngine::new();
        for key in [
            Key::Digit('6'),
            Key::Operator(Operator::Add),
            Key::Digit('2'),
            Key::Equals,
        ] {
            engine.press(key);
        }
        let mut persistence = Persistence::new(MemoryStore::new());
        persistence.save(&engine).unwrap();

        let mut restored = CalculatorEngine::new();
        Persistence::new(persistence.store().clone()).restore_once(&mut restored);
        assert_eq!(restored.display(), "8");
        restored.equals_pressed();
        assert_eq!(restored.display(), "8");
    }

    #[test]
    fn test_garbage_values_dropped() {
        let mut store = MemoryStore::new();
        store.put_string(KEY_CURRENT_INPUT, Some("12abc"));
        store.put_string(KEY_FIRST_OPERAND, Some("NaN"));
        store.put_string(KEY_PENDING_OPERATION, Some("%"));
        store.put_bool(KEY_WAITING_FOR_SECOND, true);

        let mut engine = CalculatorEngine::new();
        Persistence::new(store).restore_once(&mut engine);
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.first_operand(), None);
        assert_eq!(engine.pending_operation(), None);
        assert!(engine.is_awaiting_second_operand());
    }

    #[test]
    fn test_error_display_survives_restart() {
        let mut store = MemoryStore::new();
        store.put_string(KEY_CURRENT_INPUT, Some("Error"));
        let mut engine = CalculatorEngine::new();
        Persistence::new(store).restore_once(&mut engine);
        assert!(engine.is_error());
        engine.press(Key::Operator(Operator::Add));
        assert_eq!(engine.display(), "0");
    }

    #[test]
    fn test_theme() {
        let mut persistence = Persistence::new(MemoryStore::new());
        assert_eq!(persistence.load_theme(), ThemeName::Blue);
        persistence.save_theme(ThemeName::Pink).unwrap();
        assert_eq!(persistence.load_theme(), ThemeName::Pink);
        assert_eq!(persistence.store().get_string(KEY_CURRENT_THEME).as_deref(), Some("Pink"));
    }

    #[test]
    fn test_file_backed_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFS_FILE);

        let mut engine = CalculatorEngine::new();
        for key in [Key::Digit('9'), Key::Operator(Operator::Power)] {
            engine.press(key);
        }
        let mut persistence = Persistence::new(JsonFileStore::open(&path).unwrap());
        persistence.save(&engine).unwrap();
        persistence.save_theme(ThemeName::Orange).unwrap();

        let mut persistence = Persistence::new(JsonFileStore::open(&path).unwrap());
        let mut restored = CalculatorEngine::new();
        persistence.restore_once(&mut restored);
        assert_eq!(persistence.load_theme(), ThemeName::Orange);
        assert_eq!(restored.pending_operation(), Some(Operator::Power));
        assert!(restored.is_awaiting_second_operand());
        restored.press(Key::Digit('2'));
        restored.press(Key::Equals);
        assert_eq!(restored.display(), "81");
    }
}

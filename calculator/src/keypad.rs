//! Button grid and keyboard mapping

use calccore::{Key, Operator};

/// Which palette colour a button uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRole {
    Digit,
    Operator,
    Special,
}

/// Portrait layout, top row first.
pub const KEYPAD: [[&str; 4]; 5] = [
    ["AC", "xʸ", "√", "÷"],
    ["7", "8", "9", "×"],
    ["4", "5", "6", "-"],
    ["1", "2", "3", "+"],
    ["0", ".", "±", "="],
];

pub fn key_for_label(label: &str) -> Option<Key> {
    match label {
        "AC" => Some(Key::Clear),
        "√" => Some(Key::Root),
        "±" => Some(Key::Sign),
        "=" => Some(Key::Equals),
        "." => Some(Key::DecimalPoint),
        _ => {
            let mut chars = label.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_digit() => Some(Key::Digit(c)),
                _ => Operator::from_symbol(label).map(Key::Operator),
            }
        }
    }
}

pub fn role_for_label(label: &str) -> ButtonRole {
    match label {
        "AC" | "xʸ" | "√" => ButtonRole::Special,
        "÷" | "×" | "-" | "+" | "=" | "±" => ButtonRole::Operator,
        _ => ButtonRole::Digit,
    }
}

/// Typed characters understood by the calculator.
pub fn key_for_char(c: char) -> Option<Key> {
    match c {
        '0'..='9' => Some(Key::Digit(c)),
        '.' => Some(Key::DecimalPoint),
        '+' => Some(Key::Operator(Operator::Add)),
        '-' => Some(Key::Operator(Operator::Subtract)),
        '*' => Some(Key::Operator(Operator::Multiply)),
        '/' => Some(Key::Operator(Operator::Divide)),
        '^' => Some(Key::Operator(Operator::Power)),
        '=' => Some(Key::Equals),
        'r' => Some(Key::Root),
        'n' => Some(Key::Sign),
        'c' => Some(Key::Clear),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_button_has_a_key() {
        for label in KEYPAD.iter().flatten() {
            assert!(key_for_label(label).is_some(), "{} unmapped", label);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(key_for_label("7"), Some(Key::Digit('7')));
        assert_eq!(key_for_label("xʸ"), Some(Key::Operator(Operator::Power)));
        assert_eq!(key_for_label("÷"), Some(Key::Operator(Operator::Divide)));
        assert_eq!(key_for_label("12"), None);
        assert_eq!(role_for_label("AC"), ButtonRole::Special);
        assert_eq!(role_for_label("±"), ButtonRole::Operator);
        assert_eq!(role_for_label("0"), ButtonRole::Digit);
        assert_eq!(role_for_label("."), ButtonRole::Digit);
    }

    #[test]
    fn test_typed_chars() {
        assert_eq!(key_for_char('5'), Some(Key::Digit('5')));
        assert_eq!(key_for_char('.'), Some(Key::DecimalPoint));
        assert_eq!(key_for_char(','), None);
        assert_eq!(key_for_char('x'), None);
        assert_eq!(key_for_char('*'), Some(Key::Operator(Operator::Multiply)));
        assert_eq!(key_for_char('q'), None);
    }
}

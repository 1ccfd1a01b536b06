//! Binary operators and their arithmetic

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A binary operation waiting for (or applied to) two operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Power,
    ];

    /// Symbol shown on the key and written to the persisted state.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
            Operator::Power => "xʸ",
        }
    }

    /// Accepts the display symbols plus the usual ASCII spellings.
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Operator::Add),
            "-" | "−" => Some(Operator::Subtract),
            "×" | "*" => Some(Operator::Multiply),
            "÷" | "/" => Some(Operator::Divide),
            "xʸ" | "^" => Some(Operator::Power),
            _ => None,
        }
    }

    /// Apply the operator. Invalid results come back as NaN or infinity and
    /// are turned into the error marker by the formatter.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => {
                if b == 0.0 {
                    f64::NAN
                } else {
                    a / b
                }
            }
            Operator::Power => a.powf(b),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown operator: {0:?}")]
pub struct UnknownOperator(pub String);

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s).ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        assert_eq!(Operator::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(Operator::Subtract.apply(2.0, 3.0), -1.0);
        assert_eq!(Operator::Multiply.apply(4.0, 2.5), 10.0);
        assert_eq!(Operator::Divide.apply(9.0, 3.0), 3.0);
    }

    #[test]
    fn test_divide_by_zero_is_nan() {
        assert!(Operator::Divide.apply(5.0, 0.0).is_nan());
        assert!(Operator::Divide.apply(0.0, 0.0).is_nan());
        assert!(Operator::Divide.apply(5.0, -0.0).is_nan());
    }

    #[test]
    fn test_power() {
        assert_eq!(Operator::Power.apply(2.0, 10.0), 1024.0);
        assert_eq!(Operator::Power.apply(4.0, 0.5), 2.0);
        assert_eq!(Operator::Power.apply(2.0, -1.0), 0.5);
        // negative base, fractional exponent
        assert!(Operator::Power.apply(-8.0, 0.5).is_nan());
        assert!(Operator::Power.apply(10.0, 400.0).is_infinite());
    }

    #[test]
    fn test_symbols_parse_back() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
            assert_eq!(op.to_string().parse::<Operator>(), Ok(op));
        }
    }

    #[test]
    fn test_ascii_aliases() {
        assert_eq!(Operator::from_symbol("*"), Some(Operator::Multiply));
        assert_eq!(Operator::from_symbol("/"), Some(Operator::Divide));
        assert_eq!(Operator::from_symbol("^"), Some(Operator::Power));
        assert_eq!(Operator::from_symbol("−"), Some(Operator::Subtract));
        assert_eq!(Operator::from_symbol("%"), None);
        assert!("mod".parse::<Operator>().is_err());
    }
}

//! Binary arithmetic operations
//!
//! Operations follow IEEE-754 directly: division by zero produces an
//! infinity or NaN instead of an error, and the result is shown as-is.

use serde::{Deserialize, Serialize};

/// Type-safe operation enum for the four keypad operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// All operations in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Parses an operator symbol
    #[must_use]
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Name used in element ids
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Subtract => "minus",
            Self::Multiply => "times",
            Self::Divide => "divide",
        }
    }

    /// Applies the operation to `(left, right)`
    #[must_use]
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- Operation enum tests ---

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::Add.symbol(), '+');
        assert_eq!(Operation::Subtract.symbol(), '-');
        assert_eq!(Operation::Multiply.symbol(), '*');
        assert_eq!(Operation::Divide.symbol(), '/');
    }

    #[test]
    fn test_operation_from_symbol() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operation::from_symbol('^'), None);
        assert_eq!(Operation::from_symbol('%'), None);
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Multiply.to_string(), "*");
    }

    #[test]
    fn test_operation_names_unique() {
        let names: std::collections::HashSet<_> =
            Operation::ALL.iter().map(Operation::name).collect();
        assert_eq!(names.len(), 4);
    }

    // --- Arithmetic tests ---

    #[test]
    fn test_apply_basic() {
        assert_eq!(Operation::Add.apply(7.0, 3.0), 10.0);
        assert_eq!(Operation::Subtract.apply(7.0, 3.0), 4.0);
        assert_eq!(Operation::Multiply.apply(7.0, 3.0), 21.0);
        assert_eq!(Operation::Divide.apply(9.0, 3.0), 3.0);
    }

    #[test]
    fn test_divide_by_zero_is_infinite() {
        assert_eq!(Operation::Divide.apply(5.0, 0.0), f64::INFINITY);
        assert_eq!(Operation::Divide.apply(-5.0, 0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_zero_over_zero_is_nan() {
        assert!(Operation::Divide.apply(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_nan_propagates() {
        assert!(Operation::Add.apply(f64::NAN, 1.0).is_nan());
    }

    proptest! {
        #[test]
        fn prop_add_commutative(a in -1e9f64..1e9, b in -1e9f64..1e9) {
            prop_assert_eq!(Operation::Add.apply(a, b), Operation::Add.apply(b, a));
        }

        #[test]
        fn prop_subtract_self_is_zero(a in -1e12f64..1e12) {
            prop_assert_eq!(Operation::Subtract.apply(a, a), 0.0);
        }
    }
}

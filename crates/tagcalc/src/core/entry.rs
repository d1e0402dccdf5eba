//! Entry and equation builder
//!
//! Holds the display value, the human-readable equation line, the pending
//! operator and the stored left operand. Evaluation is strictly binary: one
//! pending operator, applied on equals.

use super::number::{format_js_number, format_number, group_thousands, parse_float, round_up_to};
use super::Operation;

/// The outcome of a successful equals press
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Left operand
    pub left: f64,
    /// Operator applied
    pub operation: Operation,
    /// Right operand
    pub right: f64,
    /// Raw IEEE-754 result
    pub raw: f64,
    /// Result rounded up to the rounding step
    pub rounded: f64,
}

impl Evaluation {
    /// Formats the calculation line, e.g. `"7 + 3 = 1,000"`
    #[must_use]
    pub fn calculation(&self) -> String {
        format!(
            "{} {} {} = {}",
            format_number(self.left),
            self.operation,
            format_number(self.right),
            format_number(self.rounded)
        )
    }
}

/// Calculator entry state
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    display: String,
    equation: String,
    operation: Option<Operation>,
    prev_value: Option<f64>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    /// Creates a fresh state showing `"0"`
    #[must_use]
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            equation: String::new(),
            operation: None,
            prev_value: None,
        }
    }

    /// Raw display value
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Display value with thousands separators
    #[must_use]
    pub fn formatted_display(&self) -> String {
        group_thousands(&self.display)
    }

    /// Running equation line
    #[must_use]
    pub fn equation(&self) -> &str {
        &self.equation
    }

    /// Pending operator, if any
    #[must_use]
    pub fn operation(&self) -> Option<Operation> {
        self.operation
    }

    /// Stored left operand, if any
    #[must_use]
    pub fn prev_value(&self) -> Option<f64> {
        self.prev_value
    }

    /// Appends a digit, `"00"` or `"."` to the display
    ///
    /// A lone `"0"` is replaced. Without a pending operator the equation
    /// mirrors the grouped display; with one, the text is appended to the
    /// equation tail as typed.
    pub fn input(&mut self, text: &str) {
        let new_display = if self.display == "0" {
            text.to_string()
        } else {
            format!("{}{}", self.display, text)
        };

        if self.operation.is_some() {
            self.equation.push_str(text);
        } else {
            self.equation = group_thousands(&new_display);
        }
        self.display = new_display;
    }

    /// Commits the display as the left operand and stores `operation`
    ///
    /// Pressing an operator right after another stores the `"0"` display as
    /// the left operand.
    pub fn choose_operator(&mut self, operation: Operation) {
        self.operation = Some(operation);
        self.prev_value = Some(parse_float(&self.display));
        self.display = "0".to_string();
        self.equation = format!("{} {} ", self.equation, operation);
    }

    /// Applies the pending operator and resets the entry state
    ///
    /// Returns `None` (and changes nothing) when no operator is pending.
    pub fn evaluate(&mut self, rounding_step: f64) -> Option<Evaluation> {
        let operation = self.operation?;
        let left = self.prev_value.unwrap_or(0.0);
        let right = parse_float(&self.display);
        let raw = operation.apply(left, right);
        let rounded = round_up_to(raw, rounding_step);

        self.display = format_js_number(rounded);
        self.equation.clear();
        self.operation = None;
        self.prev_value = None;

        Some(Evaluation {
            left,
            operation,
            right,
            raw,
            rounded,
        })
    }

    /// Single-clear: trims one character from the display and the equation
    ///
    /// A pending operator is dropped when the display was already `"0"`;
    /// the stored left operand is kept.
    pub fn trim_last(&mut self) {
        let display_was_zero = self.display == "0";

        if !display_was_zero {
            self.display.pop();
            if self.display.is_empty() {
                self.display.push('0');
            }
        }

        let mut trimmed = self.equation.trim().to_string();
        trimmed.pop();
        self.equation = trimmed.trim().to_string();

        if self.operation.is_some() && display_was_zero {
            self.operation = None;
        }
    }

    /// Double-clear: resets display, equation, operator and operand
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

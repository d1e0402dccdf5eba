//! Calculator keypad
//!
//! Layout, four columns with `=` spanning two:
//! ```text
//! [ 7 ] [ 8 ] [ 9 ] [ + ]
//! [ 4 ] [ 5 ] [ 6 ] [ - ]
//! [ 1 ] [ 2 ] [ 3 ] [ * ]
//! [ 0 ] [00 ] [ . ] [ / ]
//! [ C ] [    =    ]
//! ```

use super::dom::DomElement;
use crate::core::Operation;

/// Actions that keypad buttons perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeypadAction {
    /// Append a digit (0-9)
    Digit(u8),
    /// Append `"00"`
    DoubleZero,
    /// Append a decimal point
    Decimal,
    /// Choose an operator
    Operator(Operation),
    /// Clear (single or double)
    Clear,
    /// Evaluate
    Equals,
}

impl KeypadAction {
    /// Text appended to the display, for entry actions
    #[must_use]
    pub fn entry_text(&self) -> Option<String> {
        match self {
            Self::Digit(d) => Some(d.to_string()),
            Self::DoubleZero => Some("00".to_string()),
            Self::Decimal => Some(".".to_string()),
            Self::Operator(_) | Self::Clear | Self::Equals => None,
        }
    }

    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::DoubleZero => "00".to_string(),
            Self::Decimal => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Clear => "C".to_string(),
            Self::Equals => "=".to_string(),
        }
    }

    /// Style classes for the button
    #[must_use]
    pub const fn style_class(&self) -> &'static str {
        match self {
            Self::Equals => "col-span-2 bg-blue-500 hover:bg-blue-600",
            Self::Clear => "bg-red-500 hover:bg-red-600 text-white",
            _ => "bg-gray-300 hover:bg-gray-400",
        }
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Number of columns the button spans
    pub col_span: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        let id = match action {
            KeypadAction::Digit(d) => format!("btn-{d}"),
            KeypadAction::DoubleZero => "btn-00".to_string(),
            KeypadAction::Decimal => "btn-decimal".to_string(),
            KeypadAction::Operator(op) => format!("btn-{}", op.name()),
            KeypadAction::Clear => "btn-clear".to_string(),
            KeypadAction::Equals => "btn-equals".to_string(),
        };
        let col_span = if action == KeypadAction::Equals { 2 } else { 1 };
        Self {
            action,
            id,
            row,
            col,
            col_span,
        }
    }
}

/// Keypad layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WasmKeypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for WasmKeypad {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmKeypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{Clear, Decimal, Digit, DoubleZero, Equals, Operator};

        let order = [
            Digit(7),
            Digit(8),
            Digit(9),
            Operator(Operation::Add),
            Digit(4),
            Digit(5),
            Digit(6),
            Operator(Operation::Subtract),
            Digit(1),
            Digit(2),
            Digit(3),
            Operator(Operation::Multiply),
            Digit(0),
            DoubleZero,
            Decimal,
            Operator(Operation::Divide),
            Clear,
            Equals,
        ];

        let cols = 4;
        let buttons: Vec<KeypadButtonDef> = order
            .into_iter()
            .enumerate()
            .map(|(i, action)| KeypadButtonDef::new(action, i / cols, i % cols))
            .collect();
        let rows = buttons.last().map_or(0, |b| b.row + 1);

        Self {
            buttons,
            cols,
            rows,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column, accounting for spans
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons
            .iter()
            .find(|b| b.row == row && col >= b.col && col < b.col + b.col_span)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Creates a keypad container element with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        DomElement::new("div")
            .with_id("calc-keypad")
            .with_class("grid grid-cols-4 gap-2 mb-4")
            .with_children(self.buttons.iter().map(|btn| {
                DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.action.label())
                    .with_class("p-2 text-lg")
                    .with_class(btn.action.style_class())
                    .with_attr("data-row", &btn.row.to_string())
                    .with_attr("data-col", &btn.col.to_string())
            }))
    }

    /// Maps a button click to its action
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<KeypadAction> {
        self.find_button_by_id(element_id).map(|btn| btn.action)
    }

    /// Maps a keyboard key to a keypad action
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<KeypadAction> {
        match key {
            "00" => Some(KeypadAction::DoubleZero),
            "." => Some(KeypadAction::Decimal),
            "Enter" | "=" => Some(KeypadAction::Equals),
            "Escape" | "Backspace" | "c" | "C" => Some(KeypadAction::Clear),
            _ => {
                let mut chars = key.chars();
                let ch = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                if let Some(d) = ch.to_digit(10) {
                    u8::try_from(d).ok().map(KeypadAction::Digit)
                } else {
                    Operation::from_symbol(ch).map(KeypadAction::Operator)
                }
            }
        }
    }
}

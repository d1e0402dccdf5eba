//! Property-based tests for the keypad layout and key mapping

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use tagcalc::core::Operation;
use tagcalc::wasm::{KeypadAction, WasmKeypad};

// ===== Strategy definitions =====

/// Generate any valid digit (0-9)
fn digit_strategy() -> impl Strategy<Value = u8> {
    0u8..=9u8
}

/// Generate any operation
fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop::sample::select(Operation::ALL.to_vec())
}

/// Generate any keypad action
fn keypad_action_strategy() -> impl Strategy<Value = KeypadAction> {
    prop_oneof![
        digit_strategy().prop_map(KeypadAction::Digit),
        Just(KeypadAction::DoubleZero),
        Just(KeypadAction::Decimal),
        operation_strategy().prop_map(KeypadAction::Operator),
        Just(KeypadAction::Equals),
        Just(KeypadAction::Clear),
    ]
}

/// Generate grid positions covered by a button (the last cell of row 4 is empty)
fn grid_position_strategy() -> impl Strategy<Value = (usize, usize)> {
    (0usize..5usize, 0usize..4usize).prop_filter("empty cell", |&(r, c)| (r, c) != (4, 3))
}

// ===== Property tests for KeypadAction =====

proptest! {
    /// Digit actions append their own digit
    #[test]
    fn prop_digit_entry_text(d in digit_strategy()) {
        let text = KeypadAction::Digit(d).entry_text();
        prop_assert_eq!(text, Some(d.to_string()));
    }

    /// Operators are not entry actions and are labelled by their symbol
    #[test]
    fn prop_operator_label_is_symbol(op in operation_strategy()) {
        let action = KeypadAction::Operator(op);
        prop_assert!(action.entry_text().is_none());
        prop_assert_eq!(action.label(), op.symbol().to_string());
    }

    /// Every action has a non-empty label and style
    #[test]
    fn prop_action_has_label(action in keypad_action_strategy()) {
        prop_assert!(!action.label().is_empty());
        prop_assert!(!action.style_class().is_empty());
    }
}

// ===== Property tests for WasmKeypad =====

proptest! {
    /// Every covered grid cell has a button
    #[test]
    fn prop_button_at_valid_position_exists((row, col) in grid_position_strategy()) {
        let keypad = WasmKeypad::new();
        prop_assert!(keypad.get_button_at(row, col).is_some());
    }

    /// Rows past the grid are empty
    #[test]
    fn prop_button_at_invalid_row_missing(row in 5usize..100usize, col in 0usize..4usize) {
        let keypad = WasmKeypad::new();
        prop_assert!(keypad.get_button_at(row, col).is_none());
    }

    /// Columns past the grid are empty
    #[test]
    fn prop_button_at_invalid_col_missing(row in 0usize..5usize, col in 4usize..100usize) {
        let keypad = WasmKeypad::new();
        prop_assert!(keypad.get_button_at(row, col).is_none());
    }

    /// Looking a button up by id lands on the same button
    #[test]
    fn prop_button_id_position_consistency((row, col) in grid_position_strategy()) {
        let keypad = WasmKeypad::new();
        let btn = keypad.get_button_at(row, col).unwrap();
        let found = keypad.find_button_by_id(&btn.id).unwrap();
        prop_assert_eq!(found, btn);
        prop_assert_eq!(keypad.handle_click(&btn.id), Some(btn.action));
    }

    /// Every action on the keypad has exactly one button
    #[test]
    fn prop_every_action_has_one_button(action in keypad_action_strategy()) {
        let keypad = WasmKeypad::new();
        let count = keypad.buttons().iter().filter(|b| b.action == action).count();
        prop_assert_eq!(count, 1);
    }
}

// ===== Property tests for keyboard mapping =====

proptest! {
    /// Digit keys map to digit actions
    #[test]
    fn prop_digit_keys_map_to_digit_actions(d in digit_strategy()) {
        let action = WasmKeypad::key_to_action(&d.to_string());
        prop_assert_eq!(action, Some(KeypadAction::Digit(d)));
    }

    /// Operator symbols map to operator actions
    #[test]
    fn prop_operator_keys_map_to_operator_actions(op in operation_strategy()) {
        let action = WasmKeypad::key_to_action(&op.symbol().to_string());
        prop_assert_eq!(action, Some(KeypadAction::Operator(op)));
    }

    /// Multi-letter keys other than the named ones map to nothing
    #[test]
    fn prop_unknown_keys_map_to_none(key in "[a-zA-Z]{2,10}") {
        let action = WasmKeypad::key_to_action(&key);
        match key.as_str() {
            "Enter" => prop_assert_eq!(action, Some(KeypadAction::Equals)),
            "Escape" | "Backspace" => prop_assert_eq!(action, Some(KeypadAction::Clear)),
            _ => prop_assert!(action.is_none()),
        }
    }

    /// Multi-digit keys other than "00" map to nothing
    #[test]
    fn prop_multi_digit_keys_map_to_none(key in "[0-9]{2,6}") {
        let action = WasmKeypad::key_to_action(&key);
        if key == "00" {
            prop_assert_eq!(action, Some(KeypadAction::DoubleZero));
        } else {
            prop_assert!(action.is_none());
        }
    }
}

// ===== DOM element creation =====

#[test]
fn test_keypad_element_has_one_button_per_def() {
    let keypad = WasmKeypad::new();
    let element = keypad.create_keypad_element();
    assert_eq!(element.children.len(), keypad.button_count());
    for (child, def) in element.children.iter().zip(keypad.buttons()) {
        assert_eq!(child.tag, "button");
        assert_eq!(child.id, def.id);
        assert_eq!(child.text_content, def.action.label());
    }
}

#[test]
fn test_all_buttons_have_unique_ids_and_positions() {
    let keypad = WasmKeypad::new();
    let mut ids = std::collections::HashSet::new();
    let mut positions = std::collections::HashSet::new();
    for btn in keypad.buttons() {
        assert!(ids.insert(btn.id.clone()), "Duplicate ID: {}", btn.id);
        assert!(positions.insert((btn.row, btn.col)), "Duplicate position");
    }
}

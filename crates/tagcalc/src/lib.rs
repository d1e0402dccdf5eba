//! Tagcalc - calculator widget with tagged history
//!
//! A four-operation keypad calculator that rounds every result up to the
//! next thousand, files each calculation under a user tag, ranks tags by
//! their running totals and lets history rows carry free-text memos. All
//! state persists through a pluggable key-value store.
//!
//! # Layers
//!
//! - [`core`]: pure entry state machine, number formatting, history, tags,
//!   memos and the tag leaderboard
//! - [`store`]: key-value backends and the typed [`store::StateStore`]
//! - [`widget`]: the [`CalculatorWidget`] tying the core to a store and a clock
//! - [`wasm`]: keypad layout, mock DOM view and the browser bindings
//! - [`driver`]: front-end agnostic scenario checks
//!
//! # Example
//!
//! ```rust
//! use tagcalc::prelude::*;
//!
//! let mut widget =
//!     CalculatorWidget::load(MemoryStore::new(), FakeClock::new(), WidgetConfig::default())
//!         .unwrap();
//!
//! widget.add_tag("groceries");
//! widget.press_number("7");
//! widget.press_operator(Operation::Add);
//! widget.press_number("3");
//! let entry = widget.press_equals().unwrap();
//!
//! assert_eq!(entry.calculation, "7 + 3 = 1,000");
//! assert_eq!(entry.tag, "groceries");
//! assert_eq!(widget.tag_totals()[0].total, 1000.0);
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod clock;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod prompt;
pub mod store;

/// Web front end - always available for testing
/// (the mock DOM needs no browser)
pub mod wasm;
pub mod widget;

pub use widget::CalculatorWidget;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::clock::{Clock, FakeClock, SystemClock};
    pub use crate::config::{StorageKeys, TagLabels, WidgetConfig};
    pub use crate::core::{
        ClearPress, History, HistoryEntry, MemoMap, Operation, Rank, TagSet, TagTotal,
    };
    pub use crate::driver::{CalculatorDriver, HistoryItem, TotalItem, WidgetDriver};
    pub use crate::error::{CalcError, CalcResult, ConfigError, StoreError, StoreResult};
    pub use crate::prompt::{MemoPrompt, ScriptedPrompt};
    pub use crate::store::{FileStore, KeyValueStore, MemoryStore, StateStore};
    pub use crate::wasm::{DomElement, DomEvent, KeypadAction, MockDom, WasmDriver, WasmKeypad};
    pub use crate::widget::CalculatorWidget;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn widget() -> CalculatorWidget<MemoryStore, FakeClock> {
        CalculatorWidget::load(MemoryStore::new(), FakeClock::new(), WidgetConfig::default())
            .unwrap()
    }

    #[test]
    fn test_prelude_imports() {
        let w = widget();
        assert_eq!(w.formatted_display(), "0");
        assert!(w.current_tag().is_empty());
        assert_eq!(w.selected_tag(), "unclassified");
        assert_eq!(w.tags().len(), 2);
    }

    #[test]
    fn test_keypad_round_trip() {
        let mut w = widget();
        for key in ["1", "2", "*", "1", "0", "Enter"] {
            w.press(WasmKeypad::key_to_action(key).unwrap());
        }
        assert_eq!(w.formatted_display(), "1,000");
        assert_eq!(w.history().latest().unwrap().calculation, "12 * 10 = 1,000");
    }

    #[test]
    fn test_drivers_from_prelude() {
        let mut direct = WidgetDriver::new().unwrap();
        let mut dom = WasmDriver::new().unwrap();
        direct.press_keys(&["4", "/", "2", "="]);
        dom.press_keys(&["4", "/", "2", "="]);
        assert_eq!(direct.display(), dom.display());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::InvalidKey("../x".into());
        assert!(err.to_string().contains("../x"));
    }
}

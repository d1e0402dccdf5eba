//! Browser bindings
//!
//! Backs the widget with `localStorage`, `Date.now()` and `window.prompt`,
//! and hands rendered HTML to the page. Event wiring stays on the JS side:
//! the page forwards clicks, inputs, changes and key presses by element id.

use wasm_bindgen::prelude::*;
use web_sys::console;

use super::dom::DomEvent;
use super::driver::WasmDriver;
use crate::clock::Clock;
use crate::config::WidgetConfig;
use crate::prompt::MemoPrompt;
use crate::store::LocalStorageStore;
use crate::widget::CalculatorWidget;

/// Wall clock read through `Date.now()`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    // Date.now() is a non-negative integral f64 well below 2^53
    fn now_ms(&self) -> u64 {
        let now = js_sys::Date::now();
        if now.is_finite() && now >= 0.0 {
            now as u64
        } else {
            0
        }
    }
}

/// Memo prompt backed by `window.prompt`
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowPrompt;

impl MemoPrompt for WindowPrompt {
    fn ask(&mut self, message: &str) -> Option<String> {
        web_sys::window()?.prompt_with_message(message).ok().flatten()
    }
}

type BrowserDriver = WasmDriver<LocalStorageStore, BrowserClock, WindowPrompt>;

/// Calculator widget bound to the browser
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    driver: BrowserDriver,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Loads state from `localStorage` and renders the widget
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BrowserCalculator, JsValue> {
        console_error_panic_hook::set_once();

        let store = LocalStorageStore::open().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let widget = CalculatorWidget::load(store, BrowserClock, WidgetConfig::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            driver: WasmDriver::with_widget(widget, WindowPrompt),
        })
    }

    /// Current widget markup
    pub fn html(&self) -> String {
        self.driver.dom().root().to_html()
    }

    /// Forwards a click on `element_id`; returns whether it was handled
    pub fn click(&mut self, element_id: &str) -> bool {
        self.driver.dispatch_event(DomEvent::click(element_id))
    }

    /// Forwards text typed into `element_id`
    pub fn input(&mut self, element_id: &str, value: &str) -> bool {
        self.driver.dispatch_event(DomEvent::input(element_id, value))
    }

    /// Forwards a select change on `element_id`
    pub fn change(&mut self, element_id: &str, value: &str) -> bool {
        self.driver.dispatch_event(DomEvent::change(element_id, value))
    }

    /// Forwards a keyboard key
    pub fn key(&mut self, key: &str) -> bool {
        self.driver.dispatch_event(DomEvent::key_press(key))
    }

    /// Formatted display text
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.driver.widget().formatted_display()
    }

    /// Equation line
    #[wasm_bindgen(getter)]
    pub fn equation(&self) -> String {
        self.driver.widget().equation().to_string()
    }

    /// Number of history entries
    #[wasm_bindgen(getter, js_name = historyCount)]
    pub fn history_count(&self) -> usize {
        self.driver.widget().history().len()
    }
}

/// Module start hook
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console::log_1(&"tagcalc initialized".into());
}

//! DOM driver
//!
//! Drives the widget the way a browser user would: events are addressed to
//! rendered element ids, dispatched into widget operations, and the tree is
//! re-rendered after each one. Reads go through the rendered DOM only.

use super::dom::{DomEvent, MockDom};
use super::keypad::WasmKeypad;
use super::view::{
    self, history_row_id, memo_id, parse_history_row_id, total_row_id, ADD_TAG_BUTTON_ID,
    CLEAR_HISTORY_BUTTON_ID, DISPLAY_ID, EQUATION_ID, HISTORY_FILTER_ID, NEW_TAG_INPUT_ID,
    TAG_SELECT_ID,
};
use crate::clock::{Clock, FakeClock};
use crate::config::WidgetConfig;
use crate::driver::{CalculatorDriver, HistoryItem, TotalItem};
use crate::error::CalcResult;
use crate::prompt::{MemoPrompt, ScriptedPrompt};
use crate::store::{KeyValueStore, MemoryStore};
use crate::widget::CalculatorWidget;

/// Widget plus mock DOM, wired through events
#[derive(Debug)]
pub struct WasmDriver<S = MemoryStore, C = FakeClock, P = ScriptedPrompt> {
    widget: CalculatorWidget<S, C>,
    keypad: WasmKeypad,
    dom: MockDom,
    new_tag_draft: String,
    prompt: P,
    clock: Option<FakeClock>,
}

impl WasmDriver {
    /// Creates a driver over an empty in-memory store and a fake clock
    pub fn new() -> CalcResult<Self> {
        let clock = FakeClock::at(1_000_000);
        let widget =
            CalculatorWidget::load(MemoryStore::new(), clock.clone(), WidgetConfig::default())?;
        let mut driver = Self::with_widget(widget, ScriptedPrompt::new());
        driver.clock = Some(clock);
        Ok(driver)
    }
}

impl<S: KeyValueStore, C: Clock, P: MemoPrompt> WasmDriver<S, C, P> {
    /// Wraps an existing widget and renders it
    pub fn with_widget(widget: CalculatorWidget<S, C>, prompt: P) -> Self {
        let mut driver = Self {
            widget,
            keypad: WasmKeypad::new(),
            dom: MockDom::new(),
            new_tag_draft: String::new(),
            prompt,
            clock: None,
        };
        driver.sync_dom();
        driver
    }

    /// The widget
    #[must_use]
    pub fn widget(&self) -> &CalculatorWidget<S, C> {
        &self.widget
    }

    /// The rendered DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// The memo prompt
    pub fn prompt_mut(&mut self) -> &mut P {
        &mut self.prompt
    }

    /// Text typed into the new-tag input
    #[must_use]
    pub fn new_tag_draft(&self) -> &str {
        &self.new_tag_draft
    }

    /// Dispatches an event and re-renders
    ///
    /// Returns false if nothing handles the event.
    pub fn dispatch_event(&mut self, event: DomEvent) -> bool {
        self.dom.record_event(event.clone());
        let handled = match event {
            DomEvent::Click { element_id } => self.handle_click(&element_id),
            DomEvent::Input { element_id, value } if element_id == NEW_TAG_INPUT_ID => {
                self.new_tag_draft = value;
                true
            }
            DomEvent::Change { element_id, value }
                if element_id == TAG_SELECT_ID || element_id == HISTORY_FILTER_ID =>
            {
                self.widget.select_tag(&value);
                true
            }
            DomEvent::KeyPress { key } => match WasmKeypad::key_to_action(&key) {
                Some(action) => {
                    self.widget.press(action);
                    true
                }
                None => false,
            },
            DomEvent::Input { .. } | DomEvent::Change { .. } => false,
        };
        if handled {
            self.sync_dom();
        }
        handled
    }

    fn handle_click(&mut self, element_id: &str) -> bool {
        if let Some(action) = self.keypad.handle_click(element_id) {
            self.widget.press(action);
            return true;
        }
        if element_id == ADD_TAG_BUTTON_ID {
            if self.widget.add_tag(&self.new_tag_draft) {
                self.new_tag_draft.clear();
            }
            return true;
        }
        if element_id == CLEAR_HISTORY_BUTTON_ID {
            self.widget.clear_history();
            return true;
        }
        if let Some(index) = parse_history_row_id(element_id) {
            // Only rendered rows are clickable
            if self.dom.get_element(element_id).is_none() {
                return false;
            }
            self.widget.add_memo(index, &mut self.prompt);
            return true;
        }
        false
    }

    fn sync_dom(&mut self) {
        let tree = view::render(&self.widget, &self.keypad, &self.new_tag_draft);
        self.dom.render(tree);
    }

    fn text(&self, id: &str) -> String {
        self.dom.get_element_text(id).unwrap_or_default().to_string()
    }

    fn select_options(&self, id: &str) -> Vec<String> {
        self.dom
            .get_element(id)
            .map(|select| {
                select
                    .children
                    .iter()
                    .filter_map(|option| option.get_attr("value").map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn history_items(&self) -> Vec<HistoryItem> {
        (0..)
            .map_while(|i| {
                let row = self.dom.get_element(&history_row_id(i))?;
                Some(HistoryItem {
                    tag: row.get_attr("data-tag").unwrap_or_default().to_string(),
                    calculation: row
                        .get_attr("data-calculation")
                        .unwrap_or_default()
                        .to_string(),
                    memo: self
                        .dom
                        .get_element_text(&memo_id(i))
                        .and_then(|text| text.strip_prefix("Memo: "))
                        .map(String::from),
                })
            })
            .collect()
    }

    fn total_items(&self) -> Vec<TotalItem> {
        (0..)
            .map_while(|i| {
                let row_id = total_row_id(i);
                let row = self.dom.get_element(&row_id)?;
                Some(TotalItem {
                    tag: row.get_attr("data-tag").unwrap_or_default().to_string(),
                    total: self.text(&format!("{row_id}-amount")),
                    rank: self
                        .dom
                        .get_element_text(&format!("{row_id}-rank"))
                        .map(String::from),
                })
            })
            .collect()
    }
}

impl<S: KeyValueStore, C: Clock> CalculatorDriver for WasmDriver<S, C, ScriptedPrompt> {
    fn press_key(&mut self, key: &str) {
        self.dispatch_event(DomEvent::key_press(key));
    }

    fn display(&self) -> String {
        self.text(DISPLAY_ID)
    }

    fn equation(&self) -> String {
        self.text(EQUATION_ID)
    }

    fn add_tag(&mut self, name: &str) {
        self.dispatch_event(DomEvent::input(NEW_TAG_INPUT_ID, name));
        self.dispatch_event(DomEvent::click(ADD_TAG_BUTTON_ID));
    }

    fn select_tag(&mut self, tag: &str) {
        self.dispatch_event(DomEvent::change(TAG_SELECT_ID, tag));
    }

    fn tags(&self) -> Vec<String> {
        self.select_options(TAG_SELECT_ID)
    }

    fn clear_history(&mut self) {
        self.dispatch_event(DomEvent::click(CLEAR_HISTORY_BUTTON_ID));
    }

    fn annotate(&mut self, index: usize, memo: &str) {
        self.prompt.push_answer(memo);
        self.dispatch_event(DomEvent::click(&history_row_id(index)));
    }

    fn history(&self) -> Vec<HistoryItem> {
        self.history_items()
    }

    fn totals(&self) -> Vec<TotalItem> {
        self.total_items()
    }

    fn advance_time(&mut self, ms: u64) {
        if let Some(clock) = &self.clock {
            clock.advance(ms);
        }
    }
}

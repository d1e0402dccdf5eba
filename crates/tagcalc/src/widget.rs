//! The calculator widget
//!
//! [`CalculatorWidget`] ties the entry state machine, the clear detector,
//! tags, history and memos together and persists every change through a
//! [`StateStore`]. Store writes are fire-and-forget: a failed write is
//! logged and the in-memory state stays authoritative.

use crate::clock::Clock;
use crate::config::WidgetConfig;
use crate::core::{
    tag_totals, CalculatorState, ClearDetector, ClearPress, History, HistoryEntry, MemoMap,
    Operation, TagSet, TagTotal,
};
use crate::error::{CalcResult, StoreResult};
use crate::prompt::MemoPrompt;
use crate::store::{KeyValueStore, Slot, StateStore, StoreChange, SubscriptionId};
use crate::wasm::KeypadAction;
use tracing::{debug, info, warn};

/// Calculator with tagged, persisted history
#[derive(Debug)]
pub struct CalculatorWidget<S, C> {
    config: WidgetConfig,
    state: CalculatorState,
    clear_detector: ClearDetector,
    history: History,
    tags: TagSet,
    memos: MemoMap,
    current_tag: String,
    selected_tag: String,
    store: StateStore<S>,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> CalculatorWidget<S, C> {
    /// Loads persisted state from `backend` and builds the widget
    ///
    /// Missing keys fall back to defaults. A stored blob that is not valid
    /// JSON fails the whole load. After loading, all three blobs are written
    /// back so the store always holds the current state.
    pub fn load(backend: S, clock: C, config: WidgetConfig) -> CalcResult<Self> {
        config.validate()?;

        let store = StateStore::new(backend, config.storage_keys.clone());
        let history = store.load_history()?.unwrap_or_default();
        let tags = store.load_tags()?.unwrap_or_else(|| {
            TagSet::with_defaults(&config.labels.all_history, &config.labels.unclassified)
        });
        let memos = store.load_memos()?.unwrap_or_default();

        info!(
            entries = history.len(),
            tags = tags.len(),
            memos = memos.len(),
            "loaded calculator state"
        );

        let mut widget = Self {
            state: CalculatorState::new(),
            clear_detector: ClearDetector::new(config.double_clear_window_ms),
            history,
            tags,
            memos,
            current_tag: String::new(),
            selected_tag: config.labels.unclassified.clone(),
            store,
            clock,
            config,
        };
        widget.persist_memos();
        widget.persist_history();
        widget.persist_tags();
        Ok(widget)
    }

    // ----- keypad -----

    /// Dispatches a keypad action
    pub fn press(&mut self, action: KeypadAction) {
        match action {
            KeypadAction::Operator(op) => self.press_operator(op),
            KeypadAction::Clear => {
                self.press_clear();
            }
            KeypadAction::Equals => {
                self.press_equals();
            }
            KeypadAction::Digit(_) | KeypadAction::DoubleZero | KeypadAction::Decimal => {
                if let Some(text) = action.entry_text() {
                    self.press_number(&text);
                }
            }
        }
    }

    /// Appends a digit, `"00"` or `"."`
    pub fn press_number(&mut self, text: &str) {
        self.state.input(text);
        debug!(display = self.state.display(), "entry");
    }

    /// Chooses a pending operator
    pub fn press_operator(&mut self, operation: Operation) {
        self.state.choose_operator(operation);
        debug!(
            operator = %operation,
            left = ?self.state.prev_value(),
            "operator chosen"
        );
    }

    /// Evaluates the pending operation and records it
    ///
    /// Returns the new history entry, or `None` when no operator is pending.
    pub fn press_equals(&mut self) -> Option<&HistoryEntry> {
        let evaluation = self.state.evaluate(self.config.rounding_step)?;
        let entry = HistoryEntry::new(
            self.clock.now_ms(),
            evaluation.calculation(),
            self.entry_tag(),
            evaluation.rounded,
        );
        info!(
            calculation = %entry.calculation,
            tag = %entry.tag,
            raw = evaluation.raw,
            "recorded calculation"
        );
        self.history.record(entry);
        self.persist_history();
        self.history.latest()
    }

    /// Handles a clear press, trimming or resetting depending on timing
    pub fn press_clear(&mut self) -> ClearPress {
        let kind = self.clear_detector.press(self.clock.now_ms());
        match kind {
            ClearPress::Single => self.state.trim_last(),
            ClearPress::Double => self.state.reset(),
        }
        debug!(?kind, display = self.state.display(), "clear");
        kind
    }

    // ----- tags -----

    /// Adds a tag and makes it current and selected
    ///
    /// Empty and duplicate names are ignored; returns whether the tag was
    /// added.
    pub fn add_tag(&mut self, name: &str) -> bool {
        if !self.tags.add(name, &self.config.labels.all_history) {
            debug!(tag = name, "tag rejected");
            return false;
        }
        self.current_tag = name.to_string();
        self.selected_tag = name.to_string();
        info!(tag = name, "added tag");
        self.persist_tags();
        true
    }

    /// Makes `tag` current and selected, resetting the entry state
    pub fn select_tag(&mut self, tag: &str) {
        self.current_tag = tag.to_string();
        self.selected_tag = tag.to_string();
        self.state.reset();
        debug!(tag, "selected tag");
    }

    /// Clears the history and resets tags, keeping memos
    ///
    /// The all-history pseudo-tag becomes selected; the current tag is left
    /// as it was.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.tags = TagSet::with_defaults(
            &self.config.labels.all_history,
            &self.config.labels.unclassified,
        );
        self.selected_tag = self.config.labels.all_history.clone();

        for slot in [Slot::History, Slot::Tags] {
            if let Err(e) = self.store.remove(slot) {
                warn!(?slot, error = %e, "failed to remove stored state");
            }
        }
        self.persist_history();
        self.persist_tags();
        info!("cleared history");
    }

    // ----- memos -----

    /// Asks `prompt` for a memo and stores it for the filtered row `index`
    ///
    /// Cancelled or empty input is ignored; returns whether a memo was
    /// stored.
    pub fn add_memo<P: MemoPrompt + ?Sized>(&mut self, index: usize, prompt: &mut P) -> bool {
        let input = prompt.ask(&self.config.memo_prompt);
        if !self.memos.annotate(index, input) {
            debug!(index, "memo prompt cancelled");
            return false;
        }
        info!(index, "stored memo");
        self.persist_memos();
        true
    }

    /// Memo for the filtered row `index`
    #[must_use]
    pub fn memo(&self, index: usize) -> Option<&str> {
        self.memos.get(index)
    }

    // ----- derived views -----

    /// History rows for the selected tag
    #[must_use]
    pub fn filtered_history(&self) -> Vec<&HistoryEntry> {
        if self.selected_tag == self.config.labels.all_history {
            self.history.filtered(None)
        } else {
            self.history.filtered(Some(&self.selected_tag))
        }
    }

    /// Ranked per-tag totals over the whole history
    #[must_use]
    pub fn tag_totals(&self) -> Vec<TagTotal> {
        tag_totals(self.history.iter())
    }

    // ----- accessors -----

    /// Raw display value
    #[must_use]
    pub fn display(&self) -> &str {
        self.state.display()
    }

    /// Display value with thousands separators
    #[must_use]
    pub fn formatted_display(&self) -> String {
        self.state.formatted_display()
    }

    /// Running equation line
    #[must_use]
    pub fn equation(&self) -> &str {
        self.state.equation()
    }

    /// Entry state
    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Full history, newest first
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Tag list
    #[must_use]
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// All memos
    #[must_use]
    pub fn memos(&self) -> &MemoMap {
        &self.memos
    }

    /// Tag new entries are recorded under; empty until one is chosen
    #[must_use]
    pub fn current_tag(&self) -> &str {
        &self.current_tag
    }

    /// Tag filtering the history view
    #[must_use]
    pub fn selected_tag(&self) -> &str {
        &self.selected_tag
    }

    /// Configuration
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Clock
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Persistence layer
    #[must_use]
    pub fn store(&self) -> &StateStore<S> {
        &self.store
    }

    /// Registers a listener for store writes and removals
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreChange) + 'static,
    {
        self.store.subscribe(listener)
    }

    /// Drops a store listener
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    /// Consumes the widget, returning the store backend
    pub fn into_backend(self) -> S {
        self.store.into_backend()
    }

    fn entry_tag(&self) -> String {
        if self.current_tag.is_empty() {
            self.config.labels.unselected.clone()
        } else {
            self.current_tag.clone()
        }
    }

    fn persist_history(&mut self) {
        let result = self.store.save_history(&self.history);
        log_write_failure(Slot::History, result);
    }

    fn persist_tags(&mut self) {
        let result = self.store.save_tags(&self.tags);
        log_write_failure(Slot::Tags, result);
    }

    fn persist_memos(&mut self) {
        let result = self.store.save_memos(&self.memos);
        log_write_failure(Slot::Memos, result);
    }
}

fn log_write_failure(slot: Slot, result: StoreResult<()>) {
    if let Err(e) = result {
        warn!(?slot, error = %e, "failed to persist state");
    }
}

//! Unified calculator driver
//!
//! Scenario checks are written once against [`CalculatorDriver`] and run
//! against every front end: [`WidgetDriver`] calls the widget directly,
//! [`crate::wasm::WasmDriver`] goes through rendered DOM events.

use crate::clock::FakeClock;
use crate::config::WidgetConfig;
use crate::core::number::format_number;
use crate::error::CalcResult;
use crate::prompt::ScriptedPrompt;
use crate::store::MemoryStore;
use crate::wasm::WasmKeypad;
use crate::widget::CalculatorWidget;

/// Front-end agnostic widget interactions
pub trait CalculatorDriver {
    /// Presses a keyboard key (`"7"`, `"+"`, `"Enter"`, `"Escape"`, ...)
    fn press_key(&mut self, key: &str);

    /// Formatted display text
    fn display(&self) -> String;

    /// Equation line
    fn equation(&self) -> String;

    /// Types a new tag name and confirms it
    fn add_tag(&mut self, name: &str);

    /// Chooses a tag in the selector
    fn select_tag(&mut self, tag: &str);

    /// Tags in selector order
    fn tags(&self) -> Vec<String>;

    /// Clears the history
    fn clear_history(&mut self);

    /// Annotates the visible history row `index` with `memo`
    fn annotate(&mut self, index: usize, memo: &str);

    /// Visible history rows, newest first
    fn history(&self) -> Vec<HistoryItem>;

    /// Leaderboard rows
    fn totals(&self) -> Vec<TotalItem>;

    /// Moves the driver's clock forward
    fn advance_time(&mut self, ms: u64);

    /// Presses each key in turn
    fn press_keys(&mut self, keys: &[&str]) {
        for key in keys {
            self.press_key(key);
        }
    }
}

/// A visible history row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// Tag the entry was recorded under
    pub tag: String,
    /// Calculation line
    pub calculation: String,
    /// Memo shown under the row
    pub memo: Option<String>,
}

/// A visible leaderboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalItem {
    /// Tag name
    pub tag: String,
    /// Formatted total
    pub total: String,
    /// Rank label, if ranked
    pub rank: Option<String>,
}

/// Driver that calls the widget directly
#[derive(Debug)]
pub struct WidgetDriver {
    widget: CalculatorWidget<MemoryStore, FakeClock>,
    clock: FakeClock,
    prompt: ScriptedPrompt,
}

impl WidgetDriver {
    /// Creates a driver over an empty in-memory store
    pub fn new() -> CalcResult<Self> {
        Self::with_config(WidgetConfig::default())
    }

    /// Creates a driver with a custom configuration
    pub fn with_config(config: WidgetConfig) -> CalcResult<Self> {
        let clock = FakeClock::at(1_000_000);
        let widget = CalculatorWidget::load(MemoryStore::new(), clock.clone(), config)?;
        Ok(Self {
            widget,
            clock,
            prompt: ScriptedPrompt::new(),
        })
    }

    /// Underlying widget
    #[must_use]
    pub fn widget(&self) -> &CalculatorWidget<MemoryStore, FakeClock> {
        &self.widget
    }
}

impl CalculatorDriver for WidgetDriver {
    fn press_key(&mut self, key: &str) {
        if let Some(action) = WasmKeypad::key_to_action(key) {
            self.widget.press(action);
        }
    }

    fn display(&self) -> String {
        self.widget.formatted_display()
    }

    fn equation(&self) -> String {
        self.widget.equation().to_string()
    }

    fn add_tag(&mut self, name: &str) {
        self.widget.add_tag(name);
    }

    fn select_tag(&mut self, tag: &str) {
        self.widget.select_tag(tag);
    }

    fn tags(&self) -> Vec<String> {
        self.widget.tags().iter().map(String::from).collect()
    }

    fn clear_history(&mut self) {
        self.widget.clear_history();
    }

    fn annotate(&mut self, index: usize, memo: &str) {
        self.prompt.push_answer(memo);
        self.widget.add_memo(index, &mut self.prompt);
    }

    fn history(&self) -> Vec<HistoryItem> {
        self.widget
            .filtered_history()
            .into_iter()
            .enumerate()
            .map(|(i, entry)| HistoryItem {
                tag: entry.tag.clone(),
                calculation: entry.calculation.clone(),
                memo: self.widget.memo(i).map(String::from),
            })
            .collect()
    }

    fn totals(&self) -> Vec<TotalItem> {
        self.widget
            .tag_totals()
            .into_iter()
            .map(|t| TotalItem {
                tag: t.tag,
                total: format_number(t.total),
                rank: t.rank.map(|r| r.label().to_string()),
            })
            .collect()
    }

    fn advance_time(&mut self, ms: u64) {
        self.clock.advance(ms);
    }
}

// ===== Unified scenario checks =====
// Each check starts from a reset entry, a cleared history and an idle
// clear detector.

fn reset_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.advance_time(1_000);
    driver.press_key("C");
    driver.advance_time(10);
    driver.press_key("C");
    driver.advance_time(1_000);
}

fn settle<D: CalculatorDriver>(driver: &mut D) {
    reset_entry(driver);
    driver.clear_history();
}

/// `7 + 3 =` records `"7 + 3 = 1,000"`
pub fn verify_rounding<D: CalculatorDriver>(driver: &mut D) {
    settle(driver);
    driver.press_keys(&["7", "+", "3"]);
    assert_eq!(driver.equation(), "7 + 3");
    driver.press_key("Enter");

    assert_eq!(driver.display(), "1,000");
    assert!(driver.equation().is_empty());
    let history = driver.history();
    assert_eq!(history[0].calculation, "7 + 3 = 1,000");
    assert_eq!(history[0].tag, "unselected");

    reset_entry(driver);
    driver.press_keys(&["2", "0", "0", "1", "/", "2", "="]);
    assert_eq!(driver.history()[0].calculation, "2,001 / 2 = 2,000");
}

/// Division by zero flows through to the display
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    settle(driver);
    driver.press_keys(&["5", "/", "0", "="]);
    assert_eq!(driver.display(), "Infinity");
    assert_eq!(driver.history()[0].calculation, "5 / 0 = Infinity");
}

/// A single clear trims, a quick second clear resets
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    settle(driver);
    driver.press_keys(&["1", "2", "3"]);
    driver.press_key("C");
    assert_eq!(driver.display(), "12");
    assert_eq!(driver.equation(), "12");

    driver.advance_time(500);
    driver.press_keys(&["+", "4"]);
    driver.press_key("Escape");
    assert_eq!(driver.equation(), "12 +");

    driver.advance_time(100);
    driver.press_key("Backspace");
    assert_eq!(driver.display(), "0");
    assert!(driver.equation().is_empty());
}

/// Tags are added once, appended last, and tag new entries
pub fn verify_tags<D: CalculatorDriver>(driver: &mut D) {
    settle(driver);
    driver.add_tag("shop");
    driver.add_tag("shop");
    driver.add_tag("");
    assert_eq!(driver.tags(), vec!["all-history", "unclassified", "shop"]);

    driver.press_keys(&["1", "+", "1", "="]);
    assert_eq!(driver.history()[0].tag, "shop");

    driver.select_tag("unclassified");
    assert!(driver.history().is_empty());
    driver.select_tag("all-history");
    assert_eq!(driver.history().len(), 1);
}

/// Totals are ranked by deficit from the leader
pub fn verify_totals<D: CalculatorDriver>(driver: &mut D) {
    settle(driver);
    driver.add_tag("big");
    driver.press_keys(&["2", "0", "0", "0", "0", "0", "+", "0", "="]);
    driver.add_tag("small");
    driver.select_tag("small");
    driver.press_keys(&["5", "0", "0", "0", "0", "+", "0", "="]);

    let totals = driver.totals();
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].tag, "big");
    assert_eq!(totals[0].total, "200,000");
    assert_eq!(totals[0].rank.as_deref(), Some("gold"));
    assert_eq!(totals[1].tag, "small");
    assert_eq!(totals[1].rank.as_deref(), Some("gold-2"));
}

/// Memos attach to rows and survive clearing the history
pub fn verify_memos<D: CalculatorDriver>(driver: &mut D) {
    settle(driver);
    driver.press_keys(&["9", "*", "9", "="]);
    driver.annotate(0, "groceries");
    assert_eq!(driver.history()[0].memo.as_deref(), Some("groceries"));

    driver.clear_history();
    assert!(driver.history().is_empty());
    assert_eq!(driver.tags(), vec!["all-history", "unclassified"]);

    driver.press_keys(&["1", "+", "1", "="]);
    assert_eq!(driver.history()[0].memo.as_deref(), Some("groceries"));
}

/// Runs every scenario check
pub fn run_all_scenarios<D: CalculatorDriver>(driver: &mut D) {
    verify_rounding(driver);
    verify_division_by_zero(driver);
    verify_clear(driver);
    verify_tags(driver);
    verify_totals(driver);
    verify_memos(driver);
}

//! Command execution against a file-backed widget
//!
//! Each invocation loads the widget from the data directory, applies one
//! command and exits. Entry state (display, pending operator) is not
//! persisted, so a calculation has to be completed within one `press`.

use crate::commands::{Commands, FormatArg, TagCommand};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Printer;
use serde::Serialize;
use tagcalc::clock::{Clock, SystemClock};
use tagcalc::core::{HistoryEntry, TagTotal};
use tagcalc::prompt::ScriptedPrompt;
use tagcalc::store::{FileStore, KeyValueStore};
use tagcalc::wasm::{KeypadAction, WasmKeypad};
use tagcalc::CalculatorWidget;
use tracing::debug;

/// Result of a `press` command
#[derive(Debug, Clone, PartialEq)]
pub struct PressOutcome {
    /// Entries recorded by `=` presses, oldest first
    pub recorded: Vec<HistoryEntry>,
    /// Equation line after the last key
    pub equation: String,
    /// Formatted display after the last key
    pub display: String,
}

/// One row of the history listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    /// Row index, as used by `memo`
    pub index: usize,
    /// Tag the entry was recorded under
    pub tag: String,
    /// Calculation line
    pub calculation: String,
    /// Memo attached to the row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Expands key tokens into keypad actions
///
/// A token that is itself a key (`"00"`, `"Enter"`, `"7"`) maps directly;
/// anything else is split into single-character keys, so `"7+3="` is four
/// presses.
pub fn parse_keys<S: AsRef<str>>(tokens: &[S]) -> CliResult<Vec<KeypadAction>> {
    let mut actions = Vec::new();
    for token in tokens {
        let token = token.as_ref();
        if let Some(action) = WasmKeypad::key_to_action(token) {
            actions.push(action);
            continue;
        }
        if token.is_empty() {
            return Err(CliError::unknown_key(token));
        }
        for ch in token.chars() {
            let action = WasmKeypad::key_to_action(ch.encode_utf8(&mut [0; 4]))
                .ok_or_else(|| CliError::unknown_key(token))?;
            actions.push(action);
        }
    }
    Ok(actions)
}

/// Widget session for one CLI invocation
#[derive(Debug)]
pub struct Session<S, C> {
    widget: CalculatorWidget<S, C>,
}

impl Session<FileStore, SystemClock> {
    /// Loads the widget from the configured data directory
    pub fn open(config: &CliConfig) -> CliResult<Self> {
        debug!(data_dir = %config.data_dir().display(), "opening store");
        let store = FileStore::new(config.data_dir());
        Self::with_store(store, SystemClock, config)
    }
}

impl<S: KeyValueStore, C: Clock> Session<S, C> {
    /// Loads the widget from `store`
    pub fn with_store(store: S, clock: C, config: &CliConfig) -> CliResult<Self> {
        let widget = CalculatorWidget::load(store, clock, config.widget.clone())?;
        Ok(Self { widget })
    }

    /// The widget
    #[must_use]
    pub fn widget(&self) -> &CalculatorWidget<S, C> {
        &self.widget
    }

    /// Consumes the session, returning its store
    pub fn into_store(self) -> S {
        self.widget.into_backend()
    }

    /// Selects `tag` (if given) and presses each key
    ///
    /// Keys are validated before anything is pressed.
    pub fn press<T: AsRef<str>>(
        &mut self,
        tag: Option<&str>,
        keys: &[T],
    ) -> CliResult<PressOutcome> {
        let actions = parse_keys(keys)?;
        if let Some(tag) = tag {
            self.widget.select_tag(tag);
        }

        let mut recorded = Vec::new();
        for action in actions {
            if action == KeypadAction::Equals {
                if let Some(entry) = self.widget.press_equals() {
                    recorded.push(entry.clone());
                }
            } else {
                self.widget.press(action);
            }
        }

        Ok(PressOutcome {
            recorded,
            equation: self.widget.equation().trim().to_string(),
            display: self.widget.formatted_display(),
        })
    }

    /// History rows for `tag`, or all rows
    pub fn history(&mut self, tag: Option<&str>) -> Vec<HistoryRow> {
        let all = self.widget.config().labels.all_history.clone();
        self.widget.select_tag(tag.unwrap_or(all.as_str()));
        self.widget
            .filtered_history()
            .into_iter()
            .enumerate()
            .map(|(index, entry)| HistoryRow {
                index,
                tag: entry.tag.clone(),
                calculation: entry.calculation.clone(),
                memo: self.widget.memo(index).map(String::from),
            })
            .collect()
    }

    /// Ranked per-tag totals
    #[must_use]
    pub fn totals(&self) -> Vec<TagTotal> {
        self.widget.tag_totals()
    }

    /// Tag names in order
    #[must_use]
    pub fn tags(&self) -> Vec<String> {
        self.widget.tags().iter().map(String::from).collect()
    }

    /// Adds a tag; returns false if it was empty or already present
    pub fn add_tag(&mut self, name: &str) -> bool {
        self.widget.add_tag(name)
    }

    /// Attaches `text` to history row `index` of the `tag` listing
    pub fn memo(&mut self, tag: Option<&str>, index: usize, text: &str) -> CliResult<()> {
        let rows = self.history(tag).len();
        if index >= rows {
            return Err(CliError::invalid_argument(format!(
                "history row {index} does not exist ({rows} rows)"
            )));
        }
        let mut prompt = ScriptedPrompt::new().answer(text);
        if !self.widget.add_memo(index, &mut prompt) {
            return Err(CliError::invalid_argument("memo text must not be empty"));
        }
        Ok(())
    }

    /// Clears the history and resets tags
    pub fn clear_history(&mut self) {
        self.widget.clear_history();
    }
}

/// Runs one command
pub fn execute(config: &CliConfig, command: Commands, printer: &Printer) -> CliResult<()> {
    let open = || Session::open(config);
    match command {
        Commands::Press(args) => {
            let outcome = open()?.press(args.tag.as_deref(), args.keys.as_slice())?;
            printer.lines(printer.press_lines(&outcome))
        }
        Commands::History(args) => {
            let rows = open()?.history(args.tag.as_deref());
            match args.format {
                FormatArg::Text => printer.lines(printer.history_lines(&rows)),
                FormatArg::Json => printer.lines([serde_json::to_string_pretty(&rows)?]),
            }
        }
        Commands::Totals(args) => {
            let totals = open()?.totals();
            match args.format {
                FormatArg::Text => printer.lines(printer.totals_lines(&totals)),
                FormatArg::Json => printer.lines([serde_json::to_string_pretty(&totals)?]),
            }
        }
        Commands::Tags => printer.lines(open()?.tags()),
        Commands::Tag(args) => match args.command {
            TagCommand::Add { name } => {
                if open()?.add_tag(&name) {
                    printer.success(&format!("Added tag `{name}`"));
                } else {
                    printer.warning(&format!("Tag `{name}` is empty or already exists"));
                }
                Ok(())
            }
        },
        Commands::Memo(args) => {
            open()?.memo(args.tag.as_deref(), args.index, &args.text)?;
            printer.success(&format!("Saved memo for row {}", args.index));
            Ok(())
        }
        Commands::ClearHistory => {
            open()?.clear_history();
            printer.success("Cleared history");
            Ok(())
        }
        Commands::Config => printer.lines([serde_json::to_string_pretty(config)?]),
    }
}

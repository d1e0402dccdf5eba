//! Output formatting

use crate::error::CliResult;
use crate::runner::{HistoryRow, PressOutcome};
use console::{style, Style, Term};
use tagcalc::core::number::format_number;
use tagcalc::core::{Rank, TagTotal};

/// Terminal style for a rank badge
#[must_use]
pub fn rank_style(rank: Rank) -> Style {
    match rank {
        Rank::Gold => Style::new().yellow().bold(),
        Rank::Gold2 => Style::new().yellow(),
        Rank::Silver => Style::new().white().dim(),
        Rank::Black => Style::new().black().on_white(),
    }
}

/// Writes command output to stdout and status messages to stderr
#[derive(Debug)]
pub struct Printer {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Printer {
    /// Create a new printer
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print lines of command output
    pub fn lines<I, S>(&self, lines: I) -> CliResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.out.write_line(line.as_ref())?;
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("!").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Lines for a press result
    #[must_use]
    pub fn press_lines(&self, outcome: &PressOutcome) -> Vec<String> {
        let mut lines: Vec<String> = outcome
            .recorded
            .iter()
            .map(|entry| format!("recorded {}", entry.display()))
            .collect();
        if !outcome.equation.is_empty() {
            lines.push(format!("equation {}", outcome.equation));
        }
        let display = if self.use_color {
            style(&outcome.display).bold().to_string()
        } else {
            outcome.display.clone()
        };
        lines.push(format!("display  {display}"));
        lines
    }

    /// Lines for a history listing
    #[must_use]
    pub fn history_lines(&self, rows: &[HistoryRow]) -> Vec<String> {
        if rows.is_empty() {
            return vec!["(no history)".to_string()];
        }
        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            let tag = if self.use_color {
                style(format!("[{}]", row.tag)).cyan().to_string()
            } else {
                format!("[{}]", row.tag)
            };
            lines.push(format!("{:>3}  {tag} {}", row.index, row.calculation));
            if let Some(memo) = &row.memo {
                lines.push(format!("     Memo: {memo}"));
            }
        }
        lines
    }

    /// Lines for the ranked totals
    #[must_use]
    pub fn totals_lines(&self, totals: &[TagTotal]) -> Vec<String> {
        if totals.is_empty() {
            return vec!["(no totals)".to_string()];
        }
        let width = totals.iter().map(|t| t.tag.chars().count()).max().unwrap_or(0);
        totals
            .iter()
            .enumerate()
            .map(|(i, total)| {
                let mut line = format!(
                    "{:>2}. {:<width$}  {:>12}",
                    i + 1,
                    total.tag,
                    format_number(total.total)
                );
                if !total.is_leader() {
                    line.push_str(&format!("  (-{})", format_number(total.difference)));
                }
                if let Some(rank) = total.rank {
                    let badge = if self.use_color {
                        rank_style(rank).apply_to(rank.label()).to_string()
                    } else {
                        rank.label().to_string()
                    };
                    line.push_str(&format!("  {badge}"));
                }
                line
            })
            .collect()
    }
}

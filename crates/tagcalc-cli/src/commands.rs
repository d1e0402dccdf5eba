//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// tagcalc: calculator with tagged history, ranked tag totals and memos
#[derive(Parser, Debug)]
#[command(name = "tagcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the stored history, tags and memos
    #[arg(long, env = "TAGCALC_DATA_DIR", default_value = ".tagcalc", global = true)]
    pub data_dir: PathBuf,

    /// Widget configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress status messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press keypad keys and record any completed calculation
    ///
    /// Keys are digits, `00`, `.`, `+`, `-`, `*`, `/`, `=` (or `Enter`) and
    /// `C` (or `Escape`). Tokens such as `7+3=` are split into single keys.
    Press(PressArgs),

    /// List the calculation history
    History(HistoryArgs),

    /// Show per-tag totals ranked by deficit from the leader
    Totals(TotalsArgs),

    /// List tags
    Tags,

    /// Manage tags
    Tag(TagArgs),

    /// Attach a memo to a history row
    Memo(MemoArgs),

    /// Clear the history and reset tags (memos are kept)
    ClearHistory,

    /// Show the effective configuration
    Config,
}

/// Arguments for the press command
#[derive(Args, Debug)]
pub struct PressArgs {
    /// Tag to select before pressing
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Key tokens
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    pub keys: Vec<String>,
}

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Only show entries with this tag
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the totals command
#[derive(Args, Debug)]
pub struct TotalsArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: FormatArg,
}

/// Arguments for the tag command
#[derive(Args, Debug)]
pub struct TagArgs {
    /// Tag action
    #[command(subcommand)]
    pub command: TagCommand,
}

/// Tag actions
#[derive(Subcommand, Debug)]
pub enum TagCommand {
    /// Add a tag and make it current
    Add {
        /// Tag name
        name: String,
    },
}

/// Arguments for the memo command
#[derive(Args, Debug)]
pub struct MemoArgs {
    /// Tag filter the index refers to
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Row index in the (filtered) history listing
    pub index: usize,

    /// Memo text
    pub text: String,
}

/// Output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}

/// Color argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;

    #[test]
    fn test_parse_press_command() {
        let cli = Cli::parse_from(["tagcalc", "press", "7", "+", "3", "="]);
        if let Commands::Press(args) = cli.command {
            assert_eq!(args.keys, vec!["7", "+", "3", "="]);
            assert!(args.tag.is_none());
        } else {
            panic!("expected Press command");
        }
    }

    #[test]
    fn test_parse_press_with_minus_key() {
        let cli = Cli::parse_from(["tagcalc", "press", "--tag", "rent", "9", "-", "4", "="]);
        if let Commands::Press(args) = cli.command {
            assert_eq!(args.tag.as_deref(), Some("rent"));
            assert_eq!(args.keys, vec!["9", "-", "4", "="]);
        } else {
            panic!("expected Press command");
        }
    }

    #[test]
    fn test_press_requires_keys() {
        assert!(Cli::try_parse_from(["tagcalc", "press"]).is_err());
    }

    #[test]
    fn test_parse_history_json() {
        let cli = Cli::parse_from(["tagcalc", "history", "--tag", "a", "--format", "json"]);
        if let Commands::History(args) = cli.command {
            assert_eq!(args.tag.as_deref(), Some("a"));
            assert_eq!(args.format, FormatArg::Json);
        } else {
            panic!("expected History command");
        }
    }

    #[test]
    fn test_parse_tag_add() {
        let cli = Cli::parse_from(["tagcalc", "tag", "add", "shop"]);
        if let Commands::Tag(TagArgs {
            command: TagCommand::Add { name },
        }) = cli.command
        {
            assert_eq!(name, "shop");
        } else {
            panic!("expected Tag add command");
        }
    }

    #[test]
    fn test_parse_memo() {
        let cli = Cli::parse_from(["tagcalc", "memo", "2", "taxi home"]);
        if let Commands::Memo(args) = cli.command {
            assert_eq!(args.index, 2);
            assert_eq!(args.text, "taxi home");
        } else {
            panic!("expected Memo command");
        }
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::parse_from([
            "tagcalc",
            "totals",
            "--data-dir",
            "/tmp/x",
            "-vv",
            "--color",
            "never",
        ]);
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/x"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(ColorChoice::from(cli.color), ColorChoice::Never);
        assert!(matches!(cli.command, Commands::Totals(_)));
    }

    #[test]
    fn test_parse_clear_history() {
        let cli = Cli::parse_from(["tagcalc", "clear-history", "-q"]);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::ClearHistory));
    }
}

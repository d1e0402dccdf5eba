//! tagcalc CLI library
//!
//! Command-line front end for the tagcalc widget. Each invocation loads
//! state from a data directory, runs one command and writes state back.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod logging;
mod output;
pub mod runner;

pub use commands::{
    Cli, ColorArg, Commands, FormatArg, HistoryArgs, MemoArgs, PressArgs, TagArgs, TagCommand,
    TotalsArgs,
};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::init_logging;
pub use output::{rank_style, Printer};
pub use runner::{execute, parse_keys, HistoryRow, PressOutcome, Session};

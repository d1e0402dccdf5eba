//! tagcalc: calculator with tagged history
//!
//! ## Usage
//!
//! ```bash
//! tagcalc tag add groceries            # Add a tag and make it current
//! tagcalc press --tag groceries 7+3=   # Record "7 + 3 = 1,000"
//! tagcalc history                      # List every entry with memos
//! tagcalc memo 0 "weekly shop"         # Annotate row 0
//! tagcalc totals                       # Ranked per-tag totals
//! ```

use clap::Parser;
use std::process::ExitCode;
use tagcalc::config::WidgetConfig;
use tagcalc_cli::{execute, init_logging, Cli, CliConfig, CliResult, Printer, Verbosity};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli)?;
    init_logging(config.verbosity);

    let printer = Printer::new(config.color.should_color(), config.verbosity.is_quiet());
    execute(&config, cli.command, &printer)
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let widget = match &cli.config {
        Some(path) => WidgetConfig::from_json_file(path)?,
        None => WidgetConfig::default(),
    };

    Ok(CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_data_dir(cli.data_dir.clone())
        .with_widget(widget))
}

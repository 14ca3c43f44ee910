use std::io::{stdin, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::Level;

use crate::application::Ledger;
use crate::domain::ReportMonth;
use crate::io::{ExportFormat, ExportOptions};

mod menu;

pub use menu::*;

/// Budget Planner - income, expenses and budget-vs-actual from the console
#[derive(Parser, Debug)]
#[command(name = "budget-planner")]
#[command(about = "Record income and expenses, set monthly budget limits and export a report")]
#[command(version)]
pub struct Cli {
    /// Where option 5 writes the report
    #[arg(short, long, default_value = "report.txt")]
    pub output: PathBuf,

    /// Report format: text, json, csv
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Currency label appended to amounts (e.g. "Rs")
    #[arg(long)]
    pub currency: Option<String>,

    /// Report month (YYYY-MM, defaults to the current month)
    #[arg(long)]
    pub month: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the export settings, validating format and month.
    pub fn export_options(&self) -> Result<ExportOptions> {
        let format: ExportFormat = self
            .format
            .parse()
            .map_err(|e| anyhow!("Invalid export format '{}': {}", self.format, e))?;

        let month = match &self.month {
            Some(month) => ReportMonth::parse(month)
                .with_context(|| format!("Invalid month '{}'. Use YYYY-MM", month))?,
            None => ReportMonth::current(),
        };

        Ok(ExportOptions {
            format,
            month: Some(month),
            currency: self.currency.clone().filter(|c| !c.trim().is_empty()),
        })
    }

    pub fn run(self) -> Result<()> {
        init_logging(self.verbose);

        let settings = MenuSettings {
            output: self.output.clone(),
            export: self.export_options()?,
        };
        tracing::debug!(output = %settings.output.display(), format = %settings.export.format, "Starting menu");

        let mut ledger = Ledger::new();
        let stdin = stdin();
        let mut menu = Menu::new(&mut ledger, stdin.lock(), stdout(), settings);
        menu.run()
    }
}

/// Log to stderr so prompts on stdout stay clean.
/// WARN by default, DEBUG with `--verbose`.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // A second init (e.g. from tests) is not an error worth surfacing
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

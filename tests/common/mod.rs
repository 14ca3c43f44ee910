// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use budget_planner::application::Ledger;
use budget_planner::domain::{Cents, parse_cents};
use budget_planner::io::{ExportFormat, ExportOptions};
use tempfile::TempDir;

/// Decimal string to cents, for readable fixtures.
pub fn cents(amount: &str) -> Cents {
    parse_cents(amount).unwrap()
}

/// Ledger from the canonical scenario: income 1000, Food 200 + 50, Food budget 300.
pub fn food_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.record_income(cents("1000")).unwrap();
    ledger.record_expense(cents("200"), "Food").unwrap();
    ledger.record_expense(cents("50"), "Food").unwrap();
    ledger.set_budget("Food", cents("300")).unwrap();
    ledger
}

pub fn options(format: ExportFormat) -> ExportOptions {
    ExportOptions {
        format,
        ..Default::default()
    }
}

/// Render the text report into memory.
pub fn render(ledger: &Ledger) -> String {
    let mut buf = Vec::new();
    ledger
        .export_report(&mut buf, &options(ExportFormat::Text))
        .unwrap();
    String::from_utf8(buf).unwrap()
}

/// Lines between `heading` and the next section heading, trimmed.
pub fn section<'a>(report: &'a str, heading: &str) -> Vec<&'a str> {
    const HEADINGS: [&str; 3] = ["Income:", "Expenses:", "Budget vs Actual:"];
    report
        .lines()
        .skip_while(|line| *line != heading)
        .skip(1)
        .take_while(|line| !HEADINGS.contains(line))
        .map(str::trim)
        .collect()
}

pub fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::application::{AppError, BudgetReport};
use crate::domain::{ReportMonth, format_amount};

pub const REPORT_TITLE: &str = "=== Monthly Budget Report ===";
pub const INCOME_HEADING: &str = "Income:";
pub const EXPENSES_HEADING: &str = "Expenses:";
pub const BUDGET_HEADING: &str = "Budget vs Actual:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!(
                "unknown export format '{}' (expected text, json or csv)",
                other
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a report is rendered.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub month: Option<ReportMonth>,
    /// Label appended to amounts in the text format, e.g. "Rs"
    pub currency: Option<String>,
}

/// What an export wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub format: ExportFormat,
    pub incomes: usize,
    pub expenses: usize,
    pub budgets: usize,
}

/// Renders a report snapshot and writes it to a destination.
pub struct Exporter<'a> {
    report: &'a BudgetReport,
    options: &'a ExportOptions,
}

impl<'a> Exporter<'a> {
    pub fn new(report: &'a BudgetReport, options: &'a ExportOptions) -> Self {
        Self { report, options }
    }

    /// Plain-text report: header, income, expenses, budget vs actual.
    /// Pure; the same report always renders to the same text.
    pub fn render_text(&self) -> String {
        let currency = self.options.currency.as_deref();
        let amount = |cents| format_amount(cents, currency);
        let mut out = String::new();

        // Writing into a String cannot fail
        let _ = writeln!(out, "{}", REPORT_TITLE);
        if let Some(month) = self.report.month {
            let _ = writeln!(out, "Month: {}", month.label());
        }

        let _ = writeln!(out, "{}", INCOME_HEADING);
        if self.report.incomes.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for income in &self.report.incomes {
            let _ = writeln!(out, "  {}", amount(income.amount_cents));
        }

        let _ = writeln!(out, "{}", EXPENSES_HEADING);
        if self.report.expenses.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for expense in &self.report.expenses {
            let _ = writeln!(
                out,
                "  {} ({})",
                amount(expense.amount_cents),
                expense.category
            );
        }

        let _ = writeln!(out, "{}", BUDGET_HEADING);
        if self.report.budget_vs_actual.is_empty() {
            let _ = writeln!(out, "  (none)");
        }
        for row in &self.report.budget_vs_actual {
            let _ = writeln!(
                out,
                "  {}: Budget={}, Spent={}, Variance={}",
                row.category,
                amount(row.limit),
                amount(row.spent),
                amount(row.variance)
            );
        }

        out
    }

    /// Write the report in the configured format and flush.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<ExportSummary, AppError> {
        match self.options.format {
            ExportFormat::Text => {
                writer.write_all(self.render_text().as_bytes())?;
                writer.flush()?;
            }
            ExportFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, self.report)?;
                writeln!(writer)?;
                writer.flush()?;
            }
            ExportFormat::Csv => self.write_csv(writer)?,
        }

        Ok(ExportSummary {
            format: self.options.format,
            incomes: self.report.incomes.len(),
            expenses: self.report.expenses.len(),
            budgets: self.report.budget_vs_actual.len(),
        })
    }

    /// Create or truncate `path` and write the report into it.
    /// The file is closed when this returns, on success or failure.
    pub fn write_to_path(&self, path: &Path) -> Result<ExportSummary, AppError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
    }

    fn write_csv<W: Write>(&self, writer: W) -> Result<(), AppError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "section",
            "category",
            "amount_cents",
            "limit_cents",
            "spent_cents",
            "variance_cents",
        ])?;

        for income in &self.report.incomes {
            let amount = income.amount_cents.to_string();
            csv_writer.write_record(["income", "", amount.as_str(), "", "", ""])?;
        }

        for expense in &self.report.expenses {
            let amount = expense.amount_cents.to_string();
            csv_writer.write_record([
                "expense",
                expense.category.as_str(),
                amount.as_str(),
                "",
                "",
                "",
            ])?;
        }

        for row in &self.report.budget_vs_actual {
            let (limit, spent, variance) = (
                row.limit.to_string(),
                row.spent.to_string(),
                row.variance.to_string(),
            );
            csv_writer.write_record([
                "budget",
                row.category.as_str(),
                "",
                limit.as_str(),
                spent.as_str(),
                variance.as_str(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

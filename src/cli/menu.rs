//! Interactive numbered menu.
//!
//! The menu only parses what the user types; every rule about what may be
//! recorded lives in [`Ledger`]. Input and output are generic so a session can
//! be driven from a byte buffer.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, warn};

use crate::application::Ledger;
use crate::domain::{Cents, format_amount, parse_cents};
use crate::io::ExportOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddIncome,
    AddExpense,
    SetBudget,
    ShowVariance,
    ExportReport,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::AddIncome),
            "2" => Some(MenuChoice::AddExpense),
            "3" => Some(MenuChoice::SetBudget),
            "4" => Some(MenuChoice::ShowVariance),
            "5" => Some(MenuChoice::ExportReport),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Where and how option 5 exports.
#[derive(Debug, Clone)]
pub struct MenuSettings {
    pub output: PathBuf,
    pub export: ExportOptions,
}

pub struct Menu<'a, R, W> {
    ledger: &'a mut Ledger,
    input: R,
    output: W,
    settings: MenuSettings,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(ledger: &'a mut Ledger, input: R, output: W, settings: MenuSettings) -> Self {
        Self {
            ledger,
            input,
            output,
            settings,
        }
    }

    /// Loop until the user picks Exit or input runs out.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "==== Budget Planner ====")?;
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Choose an option (1-6): ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&line) {
                Some(MenuChoice::Exit) => ControlFlow::Break(()),
                Some(choice) => self.handle(choice)?,
                None => {
                    writeln!(self.output, "Invalid choice. Try again.")?;
                    ControlFlow::Continue(())
                }
            };
            if flow.is_break() {
                break;
            }
        }

        writeln!(self.output, "Goodbye.")?;
        self.output.flush()?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "==== Main Menu ====")?;
        writeln!(self.output, "1. Add Income")?;
        writeln!(self.output, "2. Add Expense")?;
        writeln!(self.output, "3. Set Budget")?;
        writeln!(self.output, "4. Show Variance")?;
        writeln!(self.output, "5. Export Report")?;
        writeln!(self.output, "6. Exit")?;
        Ok(())
    }

    /// Break means input ended mid-operation.
    fn handle(&mut self, choice: MenuChoice) -> Result<ControlFlow<()>> {
        debug!(?choice, "Menu choice");
        match choice {
            MenuChoice::AddIncome => self.add_income(),
            MenuChoice::AddExpense => self.add_expense(),
            MenuChoice::SetBudget => self.set_budget(),
            MenuChoice::ShowVariance => self.show_variance().map(ControlFlow::Continue),
            MenuChoice::ExportReport => self.export_report().map(ControlFlow::Continue),
            MenuChoice::Exit => Ok(ControlFlow::Break(())),
        }
    }

    fn add_income(&mut self) -> Result<ControlFlow<()>> {
        let Some(amount) = self.prompt_amount("Enter income amount: ")? else {
            return Ok(ControlFlow::Break(()));
        };

        let recorded = self.ledger.record_income(amount).map(|e| e.amount_cents);
        match recorded {
            Ok(cents) => {
                let shown = self.money(cents);
                writeln!(self.output, "Income of {} added.", shown)?;
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn add_expense(&mut self) -> Result<ControlFlow<()>> {
        let Some(amount) = self.prompt_amount("Enter expense amount: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let Some(category) = self.prompt("Enter category: ")? else {
            return Ok(ControlFlow::Break(()));
        };

        let recorded = self
            .ledger
            .record_expense(amount, &category)
            .map(|e| (e.amount_cents, e.category));
        match recorded {
            Ok((cents, category)) => {
                let message = format!("Expense of {} in {} added.", self.money(cents), category);
                writeln!(self.output, "{}", message)?;
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn set_budget(&mut self) -> Result<ControlFlow<()>> {
        let Some(category) = self.prompt("Enter the budget category name: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        let question = format!("Enter budget limit for {}: ", category.trim());
        let Some(limit) = self.prompt_amount(&question)? else {
            return Ok(ControlFlow::Break(()));
        };

        match self.ledger.set_budget(&category, limit) {
            Ok(None) => {
                let message = format!(
                    "Budget set for {}: {}",
                    category.trim(),
                    self.money(limit)
                );
                writeln!(self.output, "{}", message)?;
            }
            Ok(Some(previous)) => {
                let message = format!(
                    "Budget for {} updated: {} -> {}",
                    category.trim(),
                    self.money(previous),
                    self.money(limit)
                );
                writeln!(self.output, "{}", message)?;
            }
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(ControlFlow::Continue(()))
    }

    fn show_variance(&mut self) -> Result<()> {
        if self.ledger.budgets().is_empty() {
            writeln!(self.output, "No budgets set yet.")?;
            return Ok(());
        }

        let rows = self.ledger.variance_report();
        let summary = self.ledger.summary();

        writeln!(self.output, "=== Budget vs Actual Expenses ===")?;
        writeln!(
            self.output,
            "{:<20} {:>12} {:>12} {:>12}",
            "CATEGORY", "BUDGET", "SPENT", "VARIANCE"
        )?;
        writeln!(self.output, "{}", "-".repeat(59))?;
        for row in &rows {
            let line = format!(
                "{:<20} {:>12} {:>12} {:>12}{}",
                row.category,
                self.money(row.limit),
                self.money(row.spent),
                self.money(row.variance),
                if row.is_over_budget() { "  OVER" } else { "" }
            );
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output, "{}", "-".repeat(59))?;

        let totals = format!(
            "Total income: {}  Total expenses: {}  Net: {}",
            self.money(summary.total_income),
            self.money(summary.total_expenses),
            self.money(summary.net)
        );
        writeln!(self.output, "{}", totals)?;
        Ok(())
    }

    fn export_report(&mut self) -> Result<()> {
        let path = self.settings.output.clone();
        match self
            .ledger
            .export_report_to_path(&path, &self.settings.export)
        {
            Ok(summary) => writeln!(
                self.output,
                "Report saved to '{}' ({}).",
                path.display(),
                summary.format
            )?,
            Err(e) => writeln!(self.output, "Failed to export report: {}", e)?,
        }
        Ok(())
    }

    /// Print `message` and read one line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer parses as money. Sign is not checked here.
    fn prompt_amount(&mut self, message: &str) -> Result<Option<Cents>> {
        loop {
            let Some(answer) = self.prompt(message)? else {
                return Ok(None);
            };
            match parse_cents(&answer) {
                Ok(cents) => return Ok(Some(cents)),
                Err(e) => {
                    warn!(input = %answer, "Unparseable amount");
                    writeln!(
                        self.output,
                        "Invalid amount '{}' ({}). Use '50.00' or '50'.",
                        answer, e
                    )?;
                }
            }
        }
    }

    fn money(&self, cents: Cents) -> String {
        format_amount(cents, self.settings.export.currency.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn settings() -> MenuSettings {
        MenuSettings {
            output: PathBuf::from("unused-report.txt"),
            export: ExportOptions::default(),
        }
    }

    fn run_session(ledger: &mut Ledger, script: &str) -> String {
        let mut out = Vec::new();
        Menu::new(ledger, Cursor::new(script.as_bytes()), &mut out, settings())
            .run()
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse(" 4 "), Some(MenuChoice::ShowVariance));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn test_exit_immediately() {
        let mut ledger = Ledger::new();
        let out = run_session(&mut ledger, "6\n");
        assert!(out.contains("==== Main Menu ===="));
        assert!(out.ends_with("Goodbye.\n"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut ledger = Ledger::new();
        let out = run_session(&mut ledger, "1\n");
        assert!(out.ends_with("Goodbye.\n"));
        assert!(ledger.incomes().is_empty());
    }

    #[test]
    fn test_invalid_choice_loops() {
        let mut ledger = Ledger::new();
        let out = run_session(&mut ledger, "9\nabc\n6\n");
        assert_eq!(out.matches("Invalid choice. Try again.").count(), 2);
    }

    #[test]
    fn test_amount_reprompts_until_parseable() {
        let mut ledger = Ledger::new();
        let out = run_session(&mut ledger, "1\nlots\n1000\n6\n");
        assert!(out.contains("Invalid amount 'lots'"));
        assert!(out.contains("Income of 1000.00 added."));
        assert_eq!(ledger.summary().total_income, 100000);
    }

    #[test]
    fn test_ledger_rejection_returns_to_menu() {
        let mut ledger = Ledger::new();
        let out = run_session(&mut ledger, "2\n-5\nFood\n2\n10\n\n6\n");
        assert_eq!(out.matches("Error: ").count(), 2);
        assert!(ledger.expenses().is_empty());
    }

    #[test]
    fn test_variance_without_budgets() {
        let mut ledger = Ledger::new();
        let out = run_session(&mut ledger, "4\n6\n");
        assert!(out.contains("No budgets set yet."));
    }

    #[test]
    fn test_budget_session_shows_variance() {
        let mut ledger = Ledger::new();
        let script = "1\n1000\n2\n200\nFood\n2\n50\nFood\n3\nFood\n300\n3\nFood\n300\n4\n6\n";
        let out = run_session(&mut ledger, script);

        assert!(out.contains("Budget set for Food: 300.00"));
        assert!(out.contains("Budget for Food updated: 300.00 -> 300.00"));
        assert!(out.contains("Food"));
        assert!(out.contains("250.00"));
        assert!(out.contains("Net: 750.00"));
        assert_eq!(ledger.budgets().len(), 1);
        assert_eq!(ledger.variance_report()[0].variance, 5000);
    }

    #[test]
    fn test_oversized_expenses_do_not_end_the_session() {
        let mut ledger = Ledger::new();
        let script = "2\n50000000000000000\nFood\n2\n50000000000000000\nFood\n3\nFood\n100\n4\n6\n";
        let out = run_session(&mut ledger, script);

        assert!(out.contains("Error: Amount of 5000000000000000000 cents would overflow"));
        assert!(out.contains("=== Budget vs Actual Expenses ==="));
        assert!(out.ends_with("Goodbye.\n"));
        assert_eq!(ledger.expenses().len(), 1);
    }
}

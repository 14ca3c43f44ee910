use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::domain::{
    BudgetBook, BudgetLimit, Cents, ExpenseEntry, IncomeEntry, ReportMonth, ValidationError,
    VarianceRow, compute_variance, spent_in_category, total_expenses, total_income,
};
use crate::io::{ExportOptions, ExportSummary, Exporter};

use super::{AppError, BudgetReport, LedgerSummary};

/// In-memory holder of income, expenses and budget limits.
/// This is the primary interface for any client (interactive menu, service, tests).
///
/// Mutators validate first and only then append or overwrite, so a rejected call
/// never changes state.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    incomes: Vec<IncomeEntry>,
    expenses: Vec<ExpenseEntry>,
    budgets: BudgetBook,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Mutations
    // ========================

    /// Record an income amount. Zero is allowed, negatives are not, and the
    /// running income total must stay representable.
    pub fn record_income(&mut self, amount_cents: Cents) -> Result<IncomeEntry, ValidationError> {
        let entry = IncomeEntry::new(amount_cents)
            .and_then(|entry| {
                checked_total(total_income(&self.incomes), entry.amount_cents)?;
                Ok(entry)
            })
            .inspect_err(|e| warn!("Rejected income: {}", e))?;
        debug!(amount_cents, "Recorded income");
        self.incomes.push(entry.clone());
        Ok(entry)
    }

    /// Record an expense against a category.
    pub fn record_expense(
        &mut self,
        amount_cents: Cents,
        category: &str,
    ) -> Result<ExpenseEntry, ValidationError> {
        let entry = ExpenseEntry::new(amount_cents, category)
            .and_then(|entry| {
                checked_total(total_expenses(&self.expenses), entry.amount_cents)?;
                Ok(entry)
            })
            .inspect_err(|e| warn!("Rejected expense: {}", e))?;
        debug!(amount_cents, category = %entry.category, "Recorded expense");
        self.expenses.push(entry.clone());
        Ok(entry)
    }

    /// Set or replace the limit for a category.
    /// Returns the limit it replaced, if any.
    pub fn set_budget(
        &mut self,
        category: &str,
        limit_cents: Cents,
    ) -> Result<Option<Cents>, ValidationError> {
        let budget = BudgetLimit::new(category, limit_cents)
            .inspect_err(|e| warn!("Rejected budget: {}", e))?;
        debug!(category = %budget.category, limit_cents, "Set budget");
        Ok(self.budgets.set(budget))
    }

    // ========================
    // Queries
    // ========================

    /// Budget-vs-actual rows, one per budgeted category in insertion order.
    pub fn variance_report(&self) -> Vec<VarianceRow> {
        compute_variance(&self.budgets, &self.expenses)
    }

    pub fn incomes(&self) -> &[IncomeEntry] {
        &self.incomes
    }

    pub fn expenses(&self) -> &[ExpenseEntry] {
        &self.expenses
    }

    pub fn budgets(&self) -> &BudgetBook {
        &self.budgets
    }

    pub fn budget_for(&self, category: &str) -> Option<Cents> {
        self.budgets.get(category.trim())
    }

    pub fn spent_in(&self, category: &str) -> Cents {
        spent_in_category(category.trim(), &self.expenses)
    }

    pub fn summary(&self) -> LedgerSummary {
        let total_income = total_income(&self.incomes);
        let total_expenses = total_expenses(&self.expenses);
        LedgerSummary {
            income_count: self.incomes.len(),
            expense_count: self.expenses.len(),
            total_income,
            total_expenses,
            net: total_income - total_expenses,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.incomes.is_empty() && self.expenses.is_empty() && self.budgets.is_empty()
    }

    /// Snapshot of the current state in report form.
    pub fn report(&self, month: Option<ReportMonth>) -> BudgetReport {
        BudgetReport {
            month,
            incomes: self.incomes.clone(),
            expenses: self.expenses.clone(),
            budget_vs_actual: self.variance_report(),
            summary: self.summary(),
        }
    }

    // ========================
    // Export
    // ========================

    /// Write the report to any stream. The ledger is not modified.
    pub fn export_report<W: Write>(
        &self,
        writer: W,
        options: &ExportOptions,
    ) -> Result<ExportSummary, AppError> {
        let report = self.report(options.month);
        Exporter::new(&report, options).write_to(writer)
    }

    /// Write the report to a file, creating or truncating it.
    pub fn export_report_to_path(
        &self,
        path: &Path,
        options: &ExportOptions,
    ) -> Result<ExportSummary, AppError> {
        let report = self.report(options.month);
        let summary = Exporter::new(&report, options)
            .write_to_path(path)
            .inspect_err(|e| warn!(path = %path.display(), "Export failed: {}", e))?;
        info!(
            path = %path.display(),
            format = %summary.format,
            "Exported report"
        );
        Ok(summary)
    }
}

/// Every per-category and overall sum is bounded by these totals, so keeping
/// them in range keeps every aggregate in range.
fn checked_total(total: Cents, amount_cents: Cents) -> Result<Cents, ValidationError> {
    total
        .checked_add(amount_cents)
        .ok_or(ValidationError::AmountTooLarge(amount_cents))
}

/// Cloneable handle to one Ledger behind a single exclusive lock.
///
/// Every operation takes the lock for its whole duration.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<Mutex<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn with<T>(&self, f: impl FnOnce(&mut Ledger) -> T) -> Result<T, AppError> {
        let mut ledger = self
            .inner
            .lock()
            .map_err(|e| AppError::LockPoisoned(e.to_string()))?;
        Ok(f(&mut ledger))
    }

    pub fn record_income(&self, amount_cents: Cents) -> Result<(), AppError> {
        self.with(|l| l.record_income(amount_cents).map(|_| ()))?
            .map_err(AppError::from)
    }

    pub fn record_expense(&self, amount_cents: Cents, category: &str) -> Result<(), AppError> {
        self.with(|l| l.record_expense(amount_cents, category).map(|_| ()))?
            .map_err(AppError::from)
    }

    pub fn set_budget(&self, category: &str, limit_cents: Cents) -> Result<Option<Cents>, AppError> {
        self.with(|l| l.set_budget(category, limit_cents))?
            .map_err(AppError::from)
    }

    pub fn variance_report(&self) -> Result<Vec<VarianceRow>, AppError> {
        self.with(|l| l.variance_report())
    }

    pub fn summary(&self) -> Result<LedgerSummary, AppError> {
        self.with(|l| l.summary())
    }

    pub fn export_report<W: Write>(
        &self,
        writer: W,
        options: &ExportOptions,
    ) -> Result<ExportSummary, AppError> {
        self.with(|l| l.export_report(writer, options))?
    }

    /// Clone of the current state.
    pub fn snapshot(&self) -> Result<Ledger, AppError> {
        self.with(|l| l.clone())
    }
}

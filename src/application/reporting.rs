use serde::{Deserialize, Serialize};

use crate::domain::{Cents, ExpenseEntry, IncomeEntry, ReportMonth, VarianceRow};

/// Income/expense totals for the whole ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub income_count: usize,
    pub expense_count: usize,
    pub total_income: Cents,
    pub total_expenses: Cents,
    pub net: Cents,
}

/// Everything an exported report contains, captured at one point in time.
///
/// Every export format renders from this snapshot, so they agree on content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<ReportMonth>,
    pub incomes: Vec<IncomeEntry>,
    pub expenses: Vec<ExpenseEntry>,
    pub budget_vs_actual: Vec<VarianceRow>,
    pub summary: LedgerSummary,
}

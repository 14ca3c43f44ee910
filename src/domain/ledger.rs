use serde::{Deserialize, Serialize};

use super::{BudgetBook, Cents, ExpenseEntry, IncomeEntry};

/// Budget-vs-actual for one budgeted category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceRow {
    pub category: String,
    pub limit: Cents,
    pub spent: Cents,
    /// limit - spent; negative means over budget
    pub variance: Cents,
}

impl VarianceRow {
    pub fn is_over_budget(&self) -> bool {
        self.variance < 0
    }
}

/// Sum of expense amounts recorded against exactly `category`.
pub fn spent_in_category(category: &str, expenses: &[ExpenseEntry]) -> Cents {
    expenses
        .iter()
        .filter(|e| e.is_in(category))
        .map(|e| e.amount_cents)
        .sum()
}

pub fn total_income(incomes: &[IncomeEntry]) -> Cents {
    incomes.iter().map(|i| i.amount_cents).sum()
}

pub fn total_expenses(expenses: &[ExpenseEntry]) -> Cents {
    expenses.iter().map(|e| e.amount_cents).sum()
}

/// One row per budgeted category, in the order categories were first budgeted.
/// Categories with expenses but no budget are left out.
pub fn compute_variance(budgets: &BudgetBook, expenses: &[ExpenseEntry]) -> Vec<VarianceRow> {
    budgets
        .iter()
        .map(|budget| {
            let spent = spent_in_category(&budget.category, expenses);
            VarianceRow {
                category: budget.category.clone(),
                limit: budget.limit_cents,
                spent,
                variance: budget.limit_cents - spent,
            }
        })
        .collect()
}

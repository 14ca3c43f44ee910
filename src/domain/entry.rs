use serde::{Deserialize, Serialize};

use super::{Cents, ValidationError, validate_amount, validate_category};

/// A single recorded income amount. Entries are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeEntry {
    pub amount_cents: Cents,
}

impl IncomeEntry {
    pub fn new(amount_cents: Cents) -> Result<Self, ValidationError> {
        Ok(Self {
            amount_cents: validate_amount(amount_cents)?,
        })
    }
}

/// A recorded expense tagged with the category it counts against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    pub amount_cents: Cents,
    pub category: String,
}

impl ExpenseEntry {
    pub fn new(amount_cents: Cents, category: &str) -> Result<Self, ValidationError> {
        let amount_cents = validate_amount(amount_cents)?;
        let category = validate_category(category)?;
        Ok(Self {
            amount_cents,
            category,
        })
    }

    pub fn is_in(&self, category: &str) -> bool {
        self.category == category
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_rejects_negative_before_category() {
        assert_eq!(
            ExpenseEntry::new(-500, ""),
            Err(ValidationError::NegativeAmount(-500))
        );
    }

    #[test]
    fn test_expense_category_matching_is_exact() {
        let expense = ExpenseEntry::new(2000, " Food ").unwrap();
        assert_eq!(expense.category, "Food");
        assert!(expense.is_in("Food"));
        assert!(!expense.is_in("food"));
    }
}

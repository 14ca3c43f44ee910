use serde::{Deserialize, Serialize};

use super::{Cents, ValidationError, validate_category, validate_limit};

/// Spending limit for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub category: String,
    pub limit_cents: Cents,
}

impl BudgetLimit {
    pub fn new(category: &str, limit_cents: Cents) -> Result<Self, ValidationError> {
        let category = validate_category(category)?;
        let limit_cents = validate_limit(&category, limit_cents)?;
        Ok(Self {
            category,
            limit_cents,
        })
    }
}

/// Category -> limit mapping that remembers the order categories were first set.
///
/// Holds at most one limit per category. Setting an existing category replaces
/// its limit in place, so iteration order is first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBook {
    limits: Vec<BudgetLimit>,
}

impl BudgetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. Returns the previous limit if the category was already set.
    pub fn set(&mut self, budget: BudgetLimit) -> Option<Cents> {
        match self
            .limits
            .iter_mut()
            .find(|existing| existing.category == budget.category)
        {
            Some(existing) => Some(std::mem::replace(
                &mut existing.limit_cents,
                budget.limit_cents,
            )),
            None => {
                self.limits.push(budget);
                None
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<Cents> {
        self.limits
            .iter()
            .find(|b| b.category == category)
            .map(|b| b.limit_cents)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BudgetLimit> {
        self.limits.iter()
    }

    pub fn len(&self) -> usize {
        self.limits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}

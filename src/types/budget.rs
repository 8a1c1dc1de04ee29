//! Budget types for the budget ledger
//!
//! A budget caps the cumulative expense amount admitted for one category.

use super::transaction::Category;
use rust_decimal::Decimal;

/// Spending ceiling for a single category
///
/// At most one budget exists per category; setting another one for the same
/// category replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Budget {
    /// Category the limit applies to (unique key)
    pub category: Category,

    /// Upper bound on the sum of expense amounts in `category`
    ///
    /// Must be strictly positive to be accepted by the ledger.
    pub limit: Decimal,
}

impl Budget {
    /// Create a budget value
    ///
    /// No rules are checked here; the ledger validates on `set_budget`.
    pub fn new(category: impl Into<Category>, limit: Decimal) -> Self {
        Budget {
            category: category.into(),
            limit,
        }
    }
}

/// Budget together with what has been spent against it
///
/// Produced for reports. `remaining` is negative when a budget was lowered
/// below spending that had already been admitted.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub category: Category,
    pub limit: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

impl BudgetStatus {
    pub fn new(budget: Budget, spent: Decimal) -> Self {
        BudgetStatus {
            remaining: budget.limit - spent,
            category: budget.category,
            limit: budget.limit,
            spent,
        }
    }

    pub fn is_over_limit(&self) -> bool {
        self.spent > self.limit
    }
}

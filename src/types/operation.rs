//! Ledger operations read from an input source
//!
//! Each row of an operations file becomes one [`LedgerOperation`]. The
//! processing strategies replay them against a ledger in order.

use super::budget::Budget;
use super::transaction::{Transaction, TransactionDraft};

/// A single request against the ledger
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerOperation {
    /// Install or replace the budget for a category
    SetBudget(Budget),

    /// Attempt to admit a transaction
    AddTransaction(TransactionDraft),
}

impl LedgerOperation {
    /// Category the operation touches
    ///
    /// Operations on different categories never influence each other's
    /// outcome, which is what lets the async strategy run them in parallel.
    pub fn category(&self) -> &str {
        match self {
            LedgerOperation::SetBudget(budget) => &budget.category,
            LedgerOperation::AddTransaction(draft) => &draft.category,
        }
    }
}

/// What a successful [`LedgerOperation`] produced
#[derive(Debug, Clone, PartialEq)]
pub enum OperationOutcome {
    /// The transaction was admitted under a fresh identifier
    Admitted(Transaction),

    /// The budget was installed
    BudgetSet(Budget),
}

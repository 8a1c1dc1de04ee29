//! Single-owner ledger store
//!
//! This module provides the `Ledger`, which owns the transaction log and the
//! budget table and decides whether a candidate transaction is admitted.
//!
//! Admission runs three steps:
//! 1. Per-entity validation (see [`crate::core::validation`])
//! 2. For expenses, the spending check: the new category total must stay
//!    representable and, if the category is budgeted, within its limit
//! 3. Assign an identifier and append to the log
//!
//! A rejection at any step leaves the ledger exactly as it was.
//!
//! # Spending
//!
//! Category spending is not stored. It is recomputed from the log on every
//! query, so it can never drift from the transactions actually admitted.
//!
//! `Ledger` takes `&mut self` for writes and is not shareable on its own; use
//! [`crate::core::SharedLedger`] for concurrent callers.

use crate::core::validation::{validate_budget, validate_transaction};
use crate::types::{
    Budget, BudgetStatus, Category, LedgerError, LedgerOperation, OperationOutcome, Transaction,
    TransactionDraft, TransactionKind,
};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// In-memory ledger of admitted transactions and category budgets
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Admitted transactions in insertion order
    transactions: Vec<Transaction>,

    /// Current budget per category
    budgets: HashMap<Category, Budget>,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Ledger {
            transactions: Vec::new(),
            budgets: HashMap::new(),
        }
    }

    /// Admit a transaction, checking its date against today's local date
    ///
    /// # Errors
    ///
    /// - Any validation error, unchanged
    /// - `BudgetExceeded` if an expense would push its category over budget
    /// - `ArithmeticOverflow` if the spending total cannot be represented
    pub fn add_transaction(&mut self, draft: TransactionDraft) -> Result<Transaction, LedgerError> {
        self.add_transaction_as_of(draft, Local::now().date_naive())
    }

    /// Admit a transaction, treating `today` as the current date
    pub fn add_transaction_as_of(
        &mut self,
        draft: TransactionDraft,
        today: NaiveDate,
    ) -> Result<Transaction, LedgerError> {
        let kind = validate_transaction(&draft, today).inspect_err(|e| {
            tracing::warn!(category = %draft.category, error = %e, "transaction rejected");
        })?;

        if kind == TransactionKind::Expense {
            self.check_spending(&draft.category, draft.amount)
                .inspect_err(|e| {
                    tracing::warn!(category = %draft.category, error = %e, "expense rejected");
                })?;
        }

        // Validation guarantees the date is present
        let date = draft.date.ok_or(LedgerError::MissingDate)?;
        let transaction = Transaction::admit(draft, date, kind);

        tracing::debug!(
            id = %transaction.id(),
            category = transaction.category(),
            amount = %transaction.amount(),
            kind = %transaction.kind(),
            "transaction admitted"
        );

        self.transactions.push(transaction.clone());
        Ok(transaction)
    }

    /// Reject an expense of `amount` that the category cannot absorb
    ///
    /// Every category must keep a representable spending total, budgeted or
    /// not. Categories without a budget are otherwise never blocked.
    fn check_spending(&self, category: &str, amount: Decimal) -> Result<(), LedgerError> {
        let spent = self.category_spending(category)?;
        let projected = spent
            .checked_add(amount)
            .ok_or_else(|| LedgerError::arithmetic_overflow(category))?;

        let Some(budget) = self.budgets.get(category) else {
            return Ok(());
        };

        if projected > budget.limit {
            return Err(LedgerError::budget_exceeded(
                category,
                budget.limit,
                spent,
                amount,
            ));
        }

        Ok(())
    }

    /// Install or replace the budget for `budget.category`
    ///
    /// Replacing a budget does not re-check transactions already admitted.
    pub fn set_budget(&mut self, budget: Budget) -> Result<Budget, LedgerError> {
        validate_budget(&budget).inspect_err(|e| {
            tracing::warn!(category = %budget.category, error = %e, "budget rejected");
        })?;

        tracing::debug!(category = %budget.category, limit = %budget.limit, "budget set");

        self.budgets.insert(budget.category.clone(), budget.clone());
        Ok(budget)
    }

    /// Route an input operation to `set_budget` or `add_transaction`
    pub fn apply(&mut self, operation: LedgerOperation) -> Result<OperationOutcome, LedgerError> {
        match operation {
            LedgerOperation::SetBudget(budget) => {
                self.set_budget(budget).map(OperationOutcome::BudgetSet)
            }
            LedgerOperation::AddTransaction(draft) => {
                self.add_transaction(draft).map(OperationOutcome::Admitted)
            }
        }
    }

    /// Snapshot of admitted transactions in insertion order
    pub fn list_transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    /// Snapshot of all budgets, in no particular order
    pub fn list_budgets(&self) -> Vec<Budget> {
        self.budgets.values().cloned().collect()
    }

    /// Budgets with their spending, sorted by category
    pub fn budget_statuses(&self) -> Result<Vec<BudgetStatus>, LedgerError> {
        let mut statuses = self
            .budgets
            .values()
            .map(|budget| {
                let spent = self.category_spending(&budget.category)?;
                Ok(BudgetStatus::new(budget.clone(), spent))
            })
            .collect::<Result<Vec<_>, LedgerError>>()?;

        statuses.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(statuses)
    }

    /// Budget currently configured for `category`, if any
    pub fn budget(&self, category: &str) -> Option<&Budget> {
        self.budgets.get(category)
    }

    /// Sum of admitted expense amounts in `category`
    ///
    /// Zero when the category has no expenses.
    pub fn category_spending(&self, category: &str) -> Result<Decimal, LedgerError> {
        self.transactions
            .iter()
            .filter(|tx| tx.is_expense() && tx.category() == category)
            .try_fold(Decimal::ZERO, |total, tx| {
                total
                    .checked_add(tx.amount())
                    .ok_or_else(|| LedgerError::arithmetic_overflow(category))
            })
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Drop every transaction and budget
    pub fn reset(&mut self) {
        self.transactions.clear();
        self.budgets.clear();
    }
}

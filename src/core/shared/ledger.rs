//! Thread-safe ledger for concurrent callers
//!
//! This module provides `SharedLedger`, which wraps a [`Ledger`] in a single
//! `RwLock` covering the whole aggregate.
//!
//! # Locking
//!
//! - `add_transaction` holds the write lock across validation, the spending
//!   sum, the budget comparison and the append. Two concurrent expenses in the
//!   same category therefore cannot both pass against a stale total.
//! - `set_budget` and `reset` hold the write lock.
//! - Reads hold the read lock and return owned snapshots, so they run
//!   alongside each other but never observe a half-applied write.
//!
//! A poisoned lock is recovered rather than propagated: every write either
//! completes or returns before touching the aggregate, so the inner ledger is
//! consistent even if a holder panicked.

use crate::core::Ledger;
use crate::types::{
    Budget, BudgetStatus, LedgerError, LedgerOperation, OperationOutcome, Transaction,
    TransactionDraft,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Ledger shared between threads behind one reader-writer lock
///
/// Wrap in `Arc` to hand out to worker tasks.
#[derive(Debug, Default)]
pub struct SharedLedger {
    inner: RwLock<Ledger>,
}

impl SharedLedger {
    /// Create an empty shared ledger
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Ledger::new()),
        }
    }

    /// Take ownership of an existing ledger
    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            inner: RwLock::new(ledger),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Admit a transaction atomically with respect to other writers
    pub fn add_transaction(&self, draft: TransactionDraft) -> Result<Transaction, LedgerError> {
        self.write().add_transaction(draft)
    }

    /// Admit a transaction against an explicit current date
    pub fn add_transaction_as_of(
        &self,
        draft: TransactionDraft,
        today: NaiveDate,
    ) -> Result<Transaction, LedgerError> {
        self.write().add_transaction_as_of(draft, today)
    }

    /// Install or replace a category budget
    pub fn set_budget(&self, budget: Budget) -> Result<Budget, LedgerError> {
        self.write().set_budget(budget)
    }

    /// Apply one input operation under the write lock
    pub fn apply(&self, operation: LedgerOperation) -> Result<OperationOutcome, LedgerError> {
        self.write().apply(operation)
    }

    pub fn list_transactions(&self) -> Vec<Transaction> {
        self.read().list_transactions()
    }

    pub fn list_budgets(&self) -> Vec<Budget> {
        self.read().list_budgets()
    }

    pub fn budget_statuses(&self) -> Result<Vec<BudgetStatus>, LedgerError> {
        self.read().budget_statuses()
    }

    pub fn category_spending(&self, category: &str) -> Result<Decimal, LedgerError> {
        self.read().category_spending(category)
    }

    pub fn transaction_count(&self) -> usize {
        self.read().transaction_count()
    }

    pub fn reset(&self) {
        self.write().reset();
    }

    /// Copy of the current aggregate, taken under one read lock
    pub fn snapshot(&self) -> Ledger {
        self.read().clone()
    }

    /// Unwrap into the inner ledger once no other handle exists
    pub fn into_inner(self) -> Ledger {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

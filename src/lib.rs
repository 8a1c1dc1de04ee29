//! Budget Ledger Library
//! # Overview
//!
//! This library tracks income and expense transactions against per-category
//! spending budgets, and rejects any expense that would push a category over
//! its configured limit.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (transactions, budgets, operations, errors)
//! - [`core`] - The ledger engine:
//!   - [`core::validation`] - Per-entity admission rules
//!   - [`core::ledger`] - Transaction log, budget table and budget enforcement
//!   - [`core::shared`] - Thread-safe ledger and category-partitioned batches
//! - [`io`] - CSV operation files and reports
//! - [`strategy`] - Sync and async processing pipelines
//! - [`cli`] - CLI arguments parsing
//! - [`logging`] - Tracing subscriber setup
//!
//! # Budget Enforcement
//!
//! Current spending for a category is the sum of its admitted expense
//! amounts. An expense is admitted only if spending plus its amount stays
//! within the category budget. Income, and expenses in categories without a
//! budget, are never blocked.
//!
//! # Example
//!
//! ```
//! use budget_ledger::{Budget, Ledger, TransactionDraft, TransactionKind};
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let mut ledger = Ledger::new();
//! ledger.set_budget(Budget::new("food", Decimal::new(5000, 0))).unwrap();
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let draft = TransactionDraft::new(Decimal::new(1000, 0), "food", date, TransactionKind::Expense);
//! ledger.add_transaction(draft).unwrap();
//!
//! let draft = TransactionDraft::new(Decimal::new(4500, 0), "food", date, TransactionKind::Expense);
//! assert!(ledger.add_transaction(draft).unwrap_err().is_budget_exceeded());
//! assert_eq!(ledger.category_spending("food").unwrap(), Decimal::new(1000, 0));
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{BatchProcessor, Ledger, SharedLedger};
pub use types::{
    Budget, BudgetStatus, ErrorKind, LedgerError, LedgerOperation, OperationOutcome, Transaction,
    TransactionDraft, TransactionId, TransactionKind,
};

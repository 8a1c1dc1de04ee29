//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: candidate and admitted transactions, identifiers, kinds
//! - `budget`: per-category spending limits
//! - `operation`: input operations replayed against a ledger
//! - `error`: Error types for the budget ledger

pub mod budget;
pub mod error;
pub mod operation;
pub mod transaction;

pub use budget::{Budget, BudgetStatus};
pub use error::{ErrorKind, LedgerError};
pub use operation::{LedgerOperation, OperationOutcome};
pub use transaction::{Category, Transaction, TransactionDraft, TransactionId, TransactionKind};

//! Core business logic module
//!
//! This module contains the ledger engine:
//! - `validation` - per-entity admission rules
//! - `ledger` - single-owner store and budget enforcement
//! - `shared` - thread-safe wrapper and category-partitioned batch processing

pub mod ledger;
pub mod shared;
pub mod validation;

pub use ledger::Ledger;
pub use shared::{BatchProcessor, SharedLedger};
pub use validation::{validate_budget, validate_transaction};

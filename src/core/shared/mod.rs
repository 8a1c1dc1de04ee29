//! Concurrent implementations of the ledger
//!
//! - **SharedLedger**: the ledger behind one `RwLock`, safe to share via `Arc`
//! - **BatchProcessor**: applies batches of operations with one task per
//!   category against a shared ledger

pub mod batch_processor;
pub mod ledger;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use ledger::SharedLedger;

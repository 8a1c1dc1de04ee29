//! Processing strategy module
//!
//! This module defines the Strategy pattern for complete processing
//! pipelines: read an operations file, replay it against a ledger, and write a
//! report. Different implementations (synchronous, asynchronous batch) can be
//! selected at runtime and produce the same budget report for the same input.

use crate::cli::{ReportKind, StrategyType};
use crate::core::Ledger;
use crate::io::{write_budget_report, write_transactions_report};
use crate::types::{LedgerError, OperationOutcome};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Counts of what happened to each input row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    /// Transactions admitted into the ledger
    pub admitted: usize,
    /// Budgets installed or replaced
    pub budgets_set: usize,
    /// Operations the ledger rejected (invalid input or budget exceeded)
    pub rejected: usize,
    /// Rows that could not be decoded
    pub malformed: usize,
}

impl ProcessingSummary {
    /// Tally the result of one ledger operation
    pub fn record(&mut self, result: &Result<OperationOutcome, LedgerError>) {
        match result {
            Ok(OperationOutcome::Admitted(_)) => self.admitted += 1,
            Ok(OperationOutcome::BudgetSet(_)) => self.budgets_set += 1,
            Err(_) => self.rejected += 1,
        }
    }
}

/// Processing strategy trait for complete pipelines
pub trait ProcessingStrategy: Send + Sync {
    /// Replay `input_path` against a fresh ledger and write the report
    ///
    /// Rows that fail to decode, and operations the ledger rejects, are logged
    /// and counted; processing continues with the next row.
    ///
    /// # Errors
    ///
    /// Only fatal conditions: the input cannot be opened, the runtime cannot
    /// be started, or the report cannot be written.
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError>;
}

/// Write the selected report for `ledger`
pub fn write_report(
    ledger: &Ledger,
    report: ReportKind,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    match report {
        ReportKind::Budgets => write_budget_report(&ledger.budget_statuses()?, output),
        ReportKind::Transactions => write_transactions_report(&ledger.list_transactions(), output),
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// `config` is only used by the async strategy; `None` means defaults.
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    report: ReportKind,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(report)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, report))
        }
    }
}

//! Synchronous processing strategy
//!
//! Streams rows one at a time through a single [`Ledger`] in file order,
//! then writes the selected report. Memory use is bounded by the ledger
//! itself, not by the input file.

use crate::cli::ReportKind;
use crate::core::Ledger;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{write_report, ProcessingStrategy, ProcessingSummary};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use budget_ledger::cli::ReportKind;
/// use budget_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(ReportKind::Budgets);
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("operations.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy {
    report: ReportKind,
}

impl SyncProcessingStrategy {
    pub fn new(report: ReportKind) -> Self {
        Self { report }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError> {
        let mut ledger = Ledger::new();
        let mut summary = ProcessingSummary::default();

        let reader = SyncReader::new(input_path)?;
        tracing::info!(input = %input_path.display(), "processing operations (sync)");

        for next in reader {
            match next {
                Ok(operation) => {
                    // Rejections are logged by the ledger
                    let result = ledger.apply(operation);
                    summary.record(&result);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed row");
                    summary.malformed += 1;
                }
            }
        }

        write_report(&ledger, self.report, output)?;

        tracing::info!(?summary, "processing finished");
        Ok(summary)
    }
}

//! Asynchronous batch processing strategy
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (category partitioning + tasks)
//!     └── SharedLedger (one RwLock over the whole ledger)
//! ```
//!
//! Batches are processed one after another so a category's operations keep
//! their file order even when they span batches. Within a batch, categories
//! run in parallel on a tokio multi-threaded runtime.

use crate::cli::ReportKind;
use crate::core::{BatchProcessor, SharedLedger};
use crate::io::async_reader::AsyncReader;
use crate::io::sync_reader::open_input;
use crate::strategy::{write_report, ProcessingStrategy, ProcessingSummary};
use crate::types::LedgerError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of rows per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a BatchConfig, replacing zero values with defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches,
                default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
    report: ReportKind,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig, report: ReportKind) -> Self {
        Self { config, report }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    fn process(
        &self,
        input_path: &Path,
        output: &mut dyn Write,
    ) -> Result<ProcessingSummary, LedgerError> {
        // Open synchronously first so a missing file reports the same error
        // as the sync strategy
        let file = open_input(input_path)?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| LedgerError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        tracing::info!(
            input = %input_path.display(),
            batch_size = self.config.batch_size,
            workers = self.config.max_concurrent_batches,
            "processing operations (async)"
        );

        let (ledger, summary) = runtime.block_on(async {
            let ledger = Arc::new(SharedLedger::new());
            let processor = BatchProcessor::new(Arc::clone(&ledger));
            let mut summary = ProcessingSummary::default();

            let file = tokio::fs::File::from_std(file);
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }
                summary.malformed += batch.malformed;

                // Wait for the whole batch before reading the next one
                for result in processor.process_batch(batch.operations).await {
                    summary.record(&result.result);
                }
            }

            (ledger, summary)
        });

        write_report(&ledger.snapshot(), self.report, output)?;

        tracing::info!(?summary, "processing finished");
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::SyncProcessingStrategy;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "op,category,amount,kind,date,description\n";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(HEADER.as_bytes())
            .expect("Failed to write to temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[rstest]
    #[case::zero_batch_size(0, 4, 1000, 4)]
    #[case::zero_workers(10, 0, 10, num_cpus::get())]
    #[case::custom(10, 4, 10, 4)]
    fn test_batch_config_new(
        #[case] batch_size: usize,
        #[case] workers: usize,
        #[case] expected_batch_size: usize,
        #[case] expected_workers: usize,
    ) {
        let config = BatchConfig::new(batch_size, workers);
        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent_batches, expected_workers);
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncProcessingStrategy::new(BatchConfig::default(), ReportKind::Budgets);
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);
        assert!(matches!(result, Err(LedgerError::FileNotFound { .. })));
    }

    #[test]
    fn test_async_strategy_maintains_ordering_across_batches() {
        // Budget, fill and overflow of "food" straddle several 2-row batches
        let file = create_temp_csv(
            "budget,food,100\n\
             budget,rent,900\n\
             transaction,food,60,expense,2024-01-01,\n\
             transaction,rent,900,expense,2024-01-01,\n\
             transaction,food,50,expense,2024-01-02,\n\
             budget,food,200\n\
             transaction,food,50,expense,2024-01-03,\n",
        );

        let strategy = AsyncProcessingStrategy::new(BatchConfig::new(2, 4), ReportKind::Budgets);
        let mut output = Vec::new();

        let summary = strategy.process(file.path(), &mut output).unwrap();

        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.admitted, 3);
        assert_eq!(summary.budgets_set, 3);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "category,limit,spent,remaining\n\
             food,200.00,110.00,90.00\n\
             rent,900.00,900.00,0.00\n"
        );
    }

    #[test]
    fn test_async_matches_sync_budget_report() {
        let mut content = String::new();
        for i in 0..5 {
            content.push_str(&format!("budget,cat{i},{}\n", 100 * (i + 1)));
        }
        for round in 0..30 {
            for i in 0..5 {
                content.push_str(&format!(
                    "transaction,cat{i},{},expense,2024-02-{:02},\n",
                    7 + round % 5,
                    1 + round % 28
                ));
            }
        }
        content.push_str("transaction,cat0,-1,expense,2024-02-01,\n");
        let file = create_temp_csv(&content);

        let mut sync_output = Vec::new();
        let sync_summary = SyncProcessingStrategy::new(ReportKind::Budgets)
            .process(file.path(), &mut sync_output)
            .unwrap();

        let mut async_output = Vec::new();
        let async_summary =
            AsyncProcessingStrategy::new(BatchConfig::new(7, 4), ReportKind::Budgets)
                .process(file.path(), &mut async_output)
                .unwrap();

        assert_eq!(sync_summary, async_summary);
        assert_eq!(sync_output, async_output);
    }

    #[test]
    fn test_async_strategy_counts_malformed_rows() {
        let file = create_temp_csv("budget,food,abc\nbudget,rent,10\n");

        let strategy = AsyncProcessingStrategy::new(BatchConfig::default(), ReportKind::Budgets);
        let mut output = Vec::new();

        let summary = strategy.process(file.path(), &mut output).unwrap();
        assert_eq!(summary.malformed, 1);
        assert_eq!(summary.budgets_set, 1);
    }
}

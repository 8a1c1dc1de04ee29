//! Batch processing with category-based partitioning
//!
//! This module provides the `BatchProcessor`, which applies a batch of ledger
//! operations against a [`SharedLedger`] with one tokio task per category.
//!
//! # Why partition by category
//!
//! Whether an operation succeeds depends only on earlier operations in the
//! same category: budgets are keyed by category and the budget check sums
//! only that category's expenses. Keeping each category's operations in file
//! order while running categories in parallel therefore yields the same
//! outcomes as replaying the whole file sequentially.
//!
//! Each admission still goes through the ledger's single write lock, so the
//! check-then-append step stays atomic whatever the task interleaving.

use std::collections::HashMap;
use std::sync::Arc;

use super::SharedLedger;
use crate::types::{Category, LedgerError, LedgerOperation, OperationOutcome};

/// Result of applying a single operation
#[derive(Debug, Clone)]
pub struct ProcessingResult {
    /// The operation that was applied
    pub operation: LedgerOperation,

    /// What it produced, or why it was rejected
    pub result: Result<OperationOutcome, LedgerError>,
}

/// Batch processor with category-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    ledger: Arc<SharedLedger>,
}

impl BatchProcessor {
    /// Create a processor applying operations to `ledger`
    pub fn new(ledger: Arc<SharedLedger>) -> Self {
        Self { ledger }
    }

    /// Split a batch into per-category sub-batches
    ///
    /// Every operation lands in exactly one sub-batch and keeps its relative
    /// order within that category.
    pub fn partition_by_category(
        &self,
        batch: Vec<LedgerOperation>,
    ) -> HashMap<Category, Vec<LedgerOperation>> {
        let mut category_batches: HashMap<Category, Vec<LedgerOperation>> = HashMap::new();

        for operation in batch {
            category_batches
                .entry(operation.category().to_string())
                .or_default()
                .push(operation);
        }

        category_batches
    }

    /// Apply one category's operations in order
    ///
    /// Failures are captured in the results and do not stop the sequence.
    pub async fn process_category_operations(
        &self,
        operations: Vec<LedgerOperation>,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::with_capacity(operations.len());

        for operation in operations {
            let result = self.ledger.apply(operation.clone());
            results.push(ProcessingResult { operation, result });
        }

        results
    }

    /// Apply a batch, one spawned task per category
    ///
    /// Results are grouped by category; their order across categories is
    /// unspecified.
    pub async fn process_batch(&self, batch: Vec<LedgerOperation>) -> Vec<ProcessingResult> {
        let category_batches = self.partition_by_category(batch);

        let mut tasks = Vec::with_capacity(category_batches.len());
        for (_category, operations) in category_batches {
            let processor = self.clone();
            tasks.push(tokio::spawn(async move {
                processor.process_category_operations(operations).await
            }));
        }

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(category_results) => results.extend(category_results),
                Err(e) => tracing::error!(error = %e, "category task panicked"),
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Budget, TransactionDraft, TransactionKind};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn budget(category: &str, limit: i64) -> LedgerOperation {
        LedgerOperation::SetBudget(Budget::new(category, Decimal::new(limit, 0)))
    }

    fn expense(category: &str, amount: i64) -> LedgerOperation {
        LedgerOperation::AddTransaction(TransactionDraft::new(
            Decimal::new(amount, 0),
            category,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            TransactionKind::Expense,
        ))
    }

    #[test]
    fn test_partition_keeps_per_category_order() {
        let processor = BatchProcessor::new(Arc::new(SharedLedger::new()));
        let batch = vec![
            budget("food", 100),
            expense("rent", 1),
            expense("food", 2),
            expense("rent", 3),
            expense("food", 4),
        ];

        let partitions = processor.partition_by_category(batch);

        assert_eq!(partitions.len(), 2);
        assert_eq!(
            partitions["food"],
            vec![budget("food", 100), expense("food", 2), expense("food", 4)]
        );
        assert_eq!(partitions["rent"], vec![expense("rent", 1), expense("rent", 3)]);
    }

    #[tokio::test]
    async fn test_process_batch_applies_budget_before_later_expenses() {
        let ledger = Arc::new(SharedLedger::new());
        let processor = BatchProcessor::new(Arc::clone(&ledger));

        let results = processor
            .process_batch(vec![
                expense("food", 80),
                budget("food", 100),
                expense("food", 30),
                expense("rent", 500),
                expense("food", 20),
            ])
            .await;

        assert_eq!(results.len(), 5);
        let rejected: Vec<_> = results.iter().filter(|r| r.result.is_err()).collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].operation, expense("food", 30));
        assert_eq!(ledger.category_spending("food").unwrap(), Decimal::new(100, 0));
        assert_eq!(ledger.category_spending("rent").unwrap(), Decimal::new(500, 0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_process_batch_many_categories() {
        let ledger = Arc::new(SharedLedger::new());
        let processor = BatchProcessor::new(Arc::clone(&ledger));

        let mut batch = Vec::new();
        for i in 0..10 {
            batch.push(budget(&format!("c{i}"), 50));
        }
        for _ in 0..10 {
            for i in 0..10 {
                batch.push(expense(&format!("c{i}"), 10));
            }
        }

        let results = processor.process_batch(batch).await;

        assert_eq!(results.len(), 110);
        assert_eq!(results.iter().filter(|r| r.result.is_err()).count(), 50);
        for i in 0..10 {
            assert_eq!(
                ledger.category_spending(&format!("c{i}")).unwrap(),
                Decimal::new(50, 0)
            );
        }
    }
}

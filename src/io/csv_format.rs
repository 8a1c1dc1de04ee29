//! CSV format handling for ledger operations and reports
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to ledger operations
//! - Budget and transaction report serialization
//!
//! All functions are pure (no file I/O) for easy testing.
//!
//! # Input format
//!
//! ```text
//! op,category,amount,kind,date,description
//! budget,food,5000,,,
//! transaction,food,1000,expense,2024-03-01,groceries
//! ```
//!
//! Decoding only checks that fields parse. Domain rules such as positive
//! amounts or known kinds are left to the ledger. The `op` and `kind` columns
//! are case-insensitive in the file and reach the ledger lowercased.

use crate::types::{
    Budget, BudgetStatus, LedgerError, LedgerOperation, Transaction, TransactionDraft,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV record structure for deserialization
///
/// Matches the input columns: op, category, amount, kind, date, description.
/// Budget rows only use the first three; trailing columns may be omitted.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CsvRecord {
    pub op: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Treat a missing or blank field as absent
fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.trim().is_empty())
}

fn parse_amount(field: Option<String>) -> Result<Decimal, LedgerError> {
    let raw = non_empty(field).ok_or_else(|| LedgerError::invalid_amount(""))?;
    Decimal::from_str(raw.trim()).map_err(|_| LedgerError::invalid_amount(&raw))
}

fn parse_date(field: Option<String>) -> Result<Option<NaiveDate>, LedgerError> {
    non_empty(field)
        .map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                .map_err(|_| LedgerError::invalid_date(&raw))
        })
        .transpose()
}

/// Convert a CsvRecord to a LedgerOperation
///
/// # Errors
///
/// - `InvalidOperation` if `op` is not `budget` or `transaction`
/// - `InvalidAmount` if the amount is missing or not a decimal
/// - `InvalidDate` if a date is present but not `YYYY-MM-DD`
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<LedgerOperation, LedgerError> {
    match csv_record.op.to_lowercase().as_str() {
        "budget" => {
            let limit = parse_amount(csv_record.amount)?;
            Ok(LedgerOperation::SetBudget(Budget::new(
                csv_record.category,
                limit,
            )))
        }
        "transaction" => {
            let amount = parse_amount(csv_record.amount)?;
            let date = parse_date(csv_record.date)?;

            Ok(LedgerOperation::AddTransaction(TransactionDraft {
                amount,
                category: csv_record.category,
                description: non_empty(csv_record.description),
                date,
                kind: csv_record.kind.unwrap_or_default().to_lowercase(),
            }))
        }
        _ => Err(LedgerError::invalid_operation(&csv_record.op)),
    }
}

/// Render an amount with at least two decimals
///
/// Amounts finer than a cent keep their significant digits rather than
/// being rounded away.
fn format_amount(amount: Decimal) -> String {
    let normalized = amount.normalize();
    if normalized.scale() > 2 {
        normalized.to_string()
    } else {
        format!("{:.2}", amount)
    }
}

fn write_error(context: &str, error: csv::Error) -> LedgerError {
    LedgerError::IoError {
        message: format!("{}: {}", context, error),
    }
}

/// Write the budget report
///
/// Columns: category, limit, spent, remaining. Rows are sorted by category
/// and amounts printed with two decimals.
pub fn write_budget_report(
    statuses: &[BudgetStatus],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["category", "limit", "spent", "remaining"])
        .map_err(|e| write_error("Failed to write CSV header", e))?;

    let mut sorted = statuses.to_vec();
    sorted.sort_by(|a, b| a.category.cmp(&b.category));

    for status in sorted {
        writer
            .write_record(&[
                status.category,
                format_amount(status.limit),
                format_amount(status.spent),
                format_amount(status.remaining),
            ])
            .map_err(|e| write_error("Failed to write budget record", e))?;
    }

    writer
        .flush()
        .map_err(|e| LedgerError::IoError {
            message: format!("Failed to flush output: {}", e),
        })?;

    Ok(())
}

/// Write the transaction report
///
/// Columns: id, date, kind, category, amount, description, in ledger order.
pub fn write_transactions_report(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["id", "date", "kind", "category", "amount", "description"])
        .map_err(|e| write_error("Failed to write CSV header", e))?;

    for tx in transactions {
        writer
            .write_record(&[
                tx.id().to_string(),
                tx.date().format(DATE_FORMAT).to_string(),
                tx.kind().to_string(),
                tx.category().to_string(),
                format_amount(tx.amount()),
                tx.description().unwrap_or_default().to_string(),
            ])
            .map_err(|e| write_error("Failed to write transaction record", e))?;
    }

    writer
        .flush()
        .map_err(|e| LedgerError::IoError {
            message: format!("Failed to flush output: {}", e),
        })?;

    Ok(())
}
